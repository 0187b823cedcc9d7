//! Response construction.
//!
//! # Responsibilities
//! - Turn a navigation outcome into an HTTP response
//! - Map routing errors to appropriate HTTP status codes
//!
//! # Design Decisions
//! - A location reached through a redirect answers 308 with the final
//!   location, so the browser URL ends up on the real route
//! - Unknown paths and names are 404 with a JSON body the client can render
//!   as its not-found view
//! - Malformed tables and failed view loads are server errors

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::routing::{Navigation, RoutingError};

#[derive(Debug, Serialize)]
struct ErrorBody {
    kind: &'static str,
    error: String,
}

impl IntoResponse for RoutingError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            RoutingError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            RoutingError::UnknownRouteName { .. } => (StatusCode::NOT_FOUND, "unknown_route_name"),
            RoutingError::CyclicRedirect { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "cyclic_redirect"),
            RoutingError::ViewLoad { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "view_load"),
        };
        let body = ErrorBody {
            kind,
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Response for a resolved location: redirect to the final location if the
/// route was reached through a redirect, otherwise the active route.
pub fn location_response(navigation: Navigation) -> Response {
    match navigation {
        Navigation::Activated(active) if active.redirected_from.is_some() => {
            match HeaderValue::from_str(&active.full_path) {
                Ok(location) => (
                    StatusCode::PERMANENT_REDIRECT,
                    [(header::LOCATION, location)],
                    Json(active),
                )
                    .into_response(),
                Err(_) => (StatusCode::OK, Json(active)).into_response(),
            }
        }
        other => navigation_response(other),
    }
}

/// Response for a navigation by name: always the active route itself.
pub fn navigation_response(navigation: Navigation) -> Response {
    match navigation {
        Navigation::Activated(active) => (StatusCode::OK, Json(active)).into_response(),
        Navigation::Superseded => (
            StatusCode::CONFLICT,
            Json(ErrorBody {
                kind: "superseded",
                error: "navigation superseded by a newer request".to_string(),
            }),
        )
            .into_response(),
    }
}
