//! Request handling.
//!
//! # Responsibilities
//! - Name the request ID header set by the middleware stack
//! - Extract the location to resolve (path and query) from a request
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Fragments never reach the server; only path and query are resolved

use axum::http::{HeaderMap, Uri};

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// The request ID set by `SetRequestIdLayer`, or "unknown".
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// The location a request asks the router to resolve.
pub fn location(uri: &Uri) -> &str {
    uri.path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_location_keeps_query() {
        let uri: Uri = "http://localhost:5173/chords?root=A".parse().unwrap();
        assert_eq!(location(&uri), "/chords?root=A");

        let uri: Uri = "/metronome".parse().unwrap();
        assert_eq!(location(&uri), "/metronome");
    }

    #[test]
    fn test_request_id() {
        let mut headers = HeaderMap::new();
        assert_eq!(request_id(&headers), "unknown");

        headers.insert(X_REQUEST_ID, HeaderValue::from_static("abc-123"));
        assert_eq!(request_id(&headers), "abc-123");
    }
}
