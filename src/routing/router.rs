//! Navigation and the active-route slot.
//!
//! # Responsibilities
//! - Resolve a location (or a route name) to a single view
//! - Load lazy views before activating them
//! - Own the active-route slot; everyone else observes it read-only
//! - Track the `Idle` / `Resolving` state
//!
//! # State Transitions
//! ```text
//! Idle → Resolving: navigation requested
//! Resolving → Idle: view activated, or navigation failed
//! Resolving → Resolving: a newer navigation supersedes the pending one
//! ```
//!
//! # Design Decisions
//! - Last request wins: each navigation takes a ticket, and only the holder
//!   of the newest ticket may write the active slot
//! - A superseded navigation returns `Navigation::Superseded`, not an error
//! - Failures never touch the active slot

use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use tokio::sync::watch;
use url::form_urlencoded;

use crate::routing::error::RoutingError;
use crate::routing::matcher::{BasePath, Location};
use crate::routing::table::{Resolution, RouteTable};
use crate::routing::view::{EagerViews, ViewId, ViewLoader};

/// Whether a navigation is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouterState {
    Idle,
    Resolving,
}

/// Contents of the active-route slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveRoute {
    /// Name of the activated route, if it has one.
    pub name: Option<String>,
    pub view: ViewId,
    /// Declared path of the activated route, without the base path.
    pub path: String,
    /// Final location including base path, query and fragment.
    pub full_path: String,
    pub query: Option<String>,
    /// Declared path of the redirect that led here.
    pub redirected_from: Option<String>,
}

impl ActiveRoute {
    fn new(resolution: &Resolution<'_>, base: &BasePath, location: &Location<'_>) -> Self {
        let path = resolution.route.path().to_string();
        Self {
            name: resolution.route.name().map(str::to_string),
            view: resolution.view.clone(),
            full_path: location.with_path(&base.join(&path)),
            path,
            query: location.query.map(str::to_string),
            redirected_from: resolution.redirected_from.map(str::to_string),
        }
    }

    /// Decoded query parameters, in order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query
            .as_deref()
            .map(|q| {
                form_urlencoded::parse(q.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Outcome of a navigation that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The view is now active.
    Activated(ActiveRoute),
    /// A newer navigation started before this one finished.
    Superseded,
}

impl Navigation {
    pub fn activated(&self) -> Option<&ActiveRoute> {
        match self {
            Navigation::Activated(active) => Some(active),
            Navigation::Superseded => None,
        }
    }

    pub fn into_activated(self) -> Option<ActiveRoute> {
        match self {
            Navigation::Activated(active) => Some(active),
            Navigation::Superseded => None,
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, Navigation::Superseded)
    }
}

/// Resolves navigations against a static [`RouteTable`].
pub struct Router<L = EagerViews> {
    table: RouteTable,
    base: BasePath,
    loader: L,
    /// Ticket of the newest navigation; guards every slot write.
    current: Mutex<u64>,
    active: watch::Sender<Option<ActiveRoute>>,
    state: watch::Sender<RouterState>,
}

impl Router<EagerViews> {
    /// Create a router whose views are all bundled.
    pub fn new(table: RouteTable, base: BasePath) -> Self {
        Self::with_loader(table, base, EagerViews)
    }

    /// The music application with no base path.
    pub fn music_app() -> Self {
        Self::new(RouteTable::music_app(), BasePath::default())
    }
}

impl<L: ViewLoader> Router<L> {
    pub fn with_loader(table: RouteTable, base: BasePath, loader: L) -> Self {
        let (active, _) = watch::channel(None);
        let (state, _) = watch::channel(RouterState::Idle);
        Self {
            table,
            base,
            loader,
            current: Mutex::new(0),
            active,
            state,
        }
    }

    /// Resolve a base-prefixed location and activate its view.
    ///
    /// Redirects are followed before anything is activated.
    pub async fn resolve(&self, location: &str) -> Result<Navigation, RoutingError> {
        let ticket = self.begin();
        let result = self.run(location, ticket).await;
        self.finish(ticket);

        match &result {
            Ok(Navigation::Activated(active)) => tracing::debug!(
                location = %location,
                route = active.name.as_deref().unwrap_or("-"),
                view = %active.view,
                redirected_from = active.redirected_from.as_deref().unwrap_or("-"),
                "View activated"
            ),
            Ok(Navigation::Superseded) => {
                tracing::debug!(location = %location, "Navigation superseded")
            }
            Err(e) if matches!(e, RoutingError::NotFound { .. }) => {
                tracing::warn!(location = %location, error = %e, "No route matched")
            }
            Err(e) => tracing::error!(location = %location, error = %e, "Navigation failed"),
        }
        result
    }

    /// Activate a route by name, with optional query parameters.
    pub async fn navigate(&self, name: &str, params: &[(&str, &str)]) -> Result<Navigation, RoutingError> {
        let location = self.href(name, params).inspect_err(|e| {
            tracing::warn!(error = %e, "Reverse lookup failed");
        })?;
        self.resolve(&location).await
    }

    /// Base-prefixed location of a named route, without activating it.
    pub fn href(&self, name: &str, params: &[(&str, &str)]) -> Result<String, RoutingError> {
        let route = self
            .table
            .find_by_name(name)
            .ok_or_else(|| RoutingError::UnknownRouteName {
                name: name.to_string(),
            })?;

        let mut href = self.base.join(route.path());
        if !params.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(params)
                .finish();
            href.push('?');
            href.push_str(&query);
        }
        Ok(href)
    }

    async fn run(&self, location: &str, ticket: u64) -> Result<Navigation, RoutingError> {
        let parsed = Location::parse(location);
        let relative = self
            .base
            .strip(parsed.path)
            .ok_or_else(|| RoutingError::NotFound {
                path: parsed.path.to_string(),
            })?;

        let resolution = self.table.follow(relative)?;

        if resolution.lazy {
            let loaded = self.loader.load(resolution.view).await;
            if !self.is_current(ticket) {
                return Ok(Navigation::Superseded);
            }
            loaded.map_err(|e| RoutingError::ViewLoad {
                view: resolution.view.clone(),
                reason: e.to_string(),
            })?;
        }

        let active = ActiveRoute::new(&resolution, &self.base, &parsed);
        if self.commit(ticket, &active) {
            Ok(Navigation::Activated(active))
        } else {
            Ok(Navigation::Superseded)
        }
    }

    fn begin(&self) -> u64 {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        *current += 1;
        self.state.send_replace(RouterState::Resolving);
        *current
    }

    fn finish(&self, ticket: u64) {
        let current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if *current == ticket {
            self.state.send_replace(RouterState::Idle);
        }
    }

    fn is_current(&self, ticket: u64) -> bool {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) == ticket
    }

    fn commit(&self, ticket: u64, active: &ActiveRoute) -> bool {
        let current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if *current != ticket {
            return false;
        }
        self.active.send_replace(Some(active.clone()));
        true
    }

    /// The currently active route, if any navigation has succeeded yet.
    pub fn active(&self) -> Option<ActiveRoute> {
        self.active.borrow().clone()
    }

    /// Observe the active-route slot.
    pub fn subscribe(&self) -> watch::Receiver<Option<ActiveRoute>> {
        self.active.subscribe()
    }

    pub fn state(&self) -> RouterState {
        *self.state.borrow()
    }

    pub fn watch_state(&self) -> watch::Receiver<RouterState> {
        self.state.subscribe()
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn base_path(&self) -> &BasePath {
        &self.base
    }
}
