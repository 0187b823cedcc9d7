//! Routing error definitions.

use thiserror::Error;

use crate::routing::view::ViewId;

/// Errors returned by a navigation.
///
/// None of these are fatal: the router stays usable and the active route is
/// left as it was before the failed navigation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// No route matches the location, or the location is outside the base path.
    #[error("no route matches '{path}'")]
    NotFound { path: String },

    /// Reverse lookup by name failed.
    #[error("no route named '{name}'")]
    UnknownRouteName { name: String },

    /// Following redirects revisited a path.
    #[error("redirect cycle: {}", .chain.join(" -> "))]
    CyclicRedirect { chain: Vec<String> },

    /// A lazy view could not be made available.
    #[error("failed to load view {view}: {reason}")]
    ViewLoad { view: ViewId, reason: String },
}

/// Errors raised while building a [`RouteTable`](crate::routing::RouteTable).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("route path '{0}' must start with '/'")]
    RelativePath(String),

    #[error("redirect target '{0}' must start with '/'")]
    RelativeRedirect(String),

    #[error("duplicate route name '{0}'")]
    DuplicateName(String),

    #[error("duplicate route path '{0}'")]
    DuplicatePath(String),

    #[error("route '{0}' must declare exactly one of `view` or `redirect`")]
    AmbiguousTarget(String),
}
