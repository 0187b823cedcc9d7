use axum::{
    extract::{Path, RawQuery, State},
    http::{HeaderMap, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use url::form_urlencoded;

use crate::http::request;
use crate::http::response::{location_response, navigation_response};
use crate::http::server::AppState;
use crate::routing::{ActiveRoute, Route, RouterState};

#[derive(Serialize)]
pub struct ShellStatus {
    pub version: &'static str,
    pub base_path: String,
    pub state: RouterState,
    pub routes: usize,
}

pub async fn get_status(State(state): State<AppState>) -> Json<ShellStatus> {
    Json(ShellStatus {
        version: env!("CARGO_PKG_VERSION"),
        base_path: state.router.base_path().as_str().to_string(),
        state: state.router.state(),
        routes: state.router.table().len(),
    })
}

pub async fn get_routes(State(state): State<AppState>) -> Json<Vec<Route>> {
    Json(state.router.table().routes().cloned().collect())
}

pub async fn get_active(State(state): State<AppState>) -> Json<Option<ActiveRoute>> {
    Json(state.router.active())
}

/// Reverse lookup: activate the route called `name`.
pub async fn navigate_named(
    State(state): State<AppState>,
    Path(name): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    let params: Vec<(String, String)> = query
        .as_deref()
        .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default();
    let params: Vec<(&str, &str)> = params
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();

    tracing::debug!(
        request_id = %request::request_id(&headers),
        route = %name,
        "Navigate by name"
    );

    match state.router.navigate(&name, &params).await {
        Ok(navigation) => navigation_response(navigation),
        Err(e) => e.into_response(),
    }
}

/// History-mode fallback: resolve whatever location was requested.
pub async fn resolve_location(State(state): State<AppState>, headers: HeaderMap, uri: Uri) -> Response {
    let location = request::location(&uri);

    tracing::debug!(
        request_id = %request::request_id(&headers),
        location = %location,
        "Resolving location"
    );

    match state.router.resolve(location).await {
        Ok(navigation) => location_response(navigation),
        Err(e) => e.into_response(),
    }
}
