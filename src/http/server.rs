//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Dispatch every other location to the view router (history mode)

use axum::{routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::http::handlers;
use crate::lifecycle::signals::shutdown_signal;
use crate::routing::{Router as ViewRouter, RouteTarget, TableError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<ViewRouter>,
}

/// HTTP shell hosting the view router.
///
/// The shell resolves with [`crate::routing::EagerViews`]: routes marked
/// `lazy` activate without waiting. Embedders that load view bundles build
/// their own [`ViewRouter::with_loader`].
pub struct HttpServer {
    app: Router,
    config: AppConfig,
    router: Arc<ViewRouter>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig) -> Result<Self, TableError> {
        let table = config.route_table()?;
        let lazy = table
            .routes()
            .filter(|r| matches!(r.target(), RouteTarget::View { lazy: true, .. }))
            .count();
        if lazy > 0 {
            tracing::debug!(lazy_routes = lazy, "Shell activates lazy views eagerly");
        }
        let router = Arc::new(ViewRouter::new(table, config.router.base()));

        let state = AppState {
            router: router.clone(),
        };
        let app = Self::build_router(&config, state);

        Ok(Self { app, config, router })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            .route("/_router/status", get(handlers::get_status))
            .route("/_router/routes", get(handlers::get_routes))
            .route("/_router/active", get(handlers::get_active))
            .route("/_router/navigate/{name}", get(handlers::navigate_named))
            .fallback(handlers::resolve_location)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server until Ctrl+C or a shutdown broadcast.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            base_path = %self.router.base_path().as_str(),
            routes = self.router.table().len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The axum application, for driving requests without a socket.
    pub fn app(&self) -> Router {
        self.app.clone()
    }

    /// The view router the shell resolves against.
    pub fn router(&self) -> &Arc<ViewRouter> {
        &self.router
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn get(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, headers, json)
    }

    #[tokio::test]
    async fn test_root_redirects_to_scales() {
        let server = HttpServer::new(AppConfig::default()).unwrap();
        let (status, headers, body) = get(server.app(), "/").await;

        assert_eq!(status, StatusCode::PERMANENT_REDIRECT);
        assert_eq!(headers[header::LOCATION], "/scales");
        assert_eq!(body["view"], "ScalesView");
        assert!(headers.contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_view_route_and_not_found() {
        let server = HttpServer::new(AppConfig::default()).unwrap();

        let (status, _, body) = get(server.app(), "/progressions").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "progressions");

        let (status, _, body) = get(server.app(), "/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["kind"], "not_found");

        let (_, _, active) = get(server.app(), "/_router/active").await;
        assert_eq!(active["view"], "ProgressionsView");
    }

    #[tokio::test]
    async fn test_navigate_by_name() {
        let mut config = AppConfig::default();
        config.router.base_path = "/music".into();
        let server = HttpServer::new(config).unwrap();

        let (status, _, body) = get(server.app(), "/_router/navigate/chords?root=Bb").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["full_path"], "/music/chords?root=Bb");

        let (status, _, body) = get(server.app(), "/_router/navigate/tuner").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["kind"], "unknown_route_name");
        assert_eq!(server.router().active().unwrap().view.as_str(), "ChordsView");
    }

    #[tokio::test]
    async fn test_lazy_routes_activate_immediately() {
        let mut config = AppConfig::default();
        for route in config.routes.iter_mut().filter(|r| r.view.is_some()) {
            route.lazy = true;
        }
        let server = HttpServer::new(config).unwrap();

        let (status, _, body) = get(server.app(), "/chords").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["view"], "ChordsView");

        let (_, _, routes) = get(server.app(), "/_router/routes").await;
        assert_eq!(routes[2]["target"]["lazy"], true);
        assert_eq!(server.router().state(), crate::routing::RouterState::Idle);
    }

    #[tokio::test]
    async fn test_routes_and_status() {
        let server = HttpServer::new(AppConfig::default()).unwrap();

        let (_, _, routes) = get(server.app(), "/_router/routes").await;
        let routes = routes.as_array().unwrap();
        assert_eq!(routes.len(), 5);
        assert_eq!(routes[0]["path"], "/");
        assert_eq!(routes[0]["target"]["kind"], "redirect");
        assert_eq!(routes[0]["target"]["to"], "/scales");
        assert_eq!(routes[4]["target"]["view"], "MetronomeView");

        let (_, _, status) = get(server.app(), "/_router/status").await;
        assert_eq!(status["state"], "idle");
        assert_eq!(status["routes"], 5);
    }
}
