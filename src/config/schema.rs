//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router
//! shell. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::{BasePath, MatchOptions, Route, RouteTable, RouteTarget, TableError, ViewId};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration for the shell.
    pub listener: ListenerConfig,

    /// Base path and matching options.
    pub router: RouterConfig,

    /// Route table, in declaration order.
    pub routes: Vec<RouteConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            router: RouterConfig::default(),
            routes: RouteConfig::music_app(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl AppConfig {
    /// Compile the declared routes into a [`RouteTable`].
    pub fn route_table(&self) -> Result<RouteTable, TableError> {
        let routes = self
            .routes
            .iter()
            .map(Route::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        RouteTable::new(routes, self.router.match_options())
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:5173").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5173".to_string(),
        }
    }
}

/// Router configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Deployment prefix for every route path. Overridden by `BASE_URL`.
    pub base_path: String,

    /// Reject a trailing slash on requested paths.
    pub strict: bool,

    /// Case-sensitive path matching.
    pub sensitive: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        let options = MatchOptions::default();
        Self {
            base_path: "/".to_string(),
            strict: options.strict,
            sensitive: options.sensitive,
        }
    }
}

impl RouterConfig {
    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            strict: self.strict,
            sensitive: self.sensitive,
        }
    }

    pub fn base(&self) -> BasePath {
        BasePath::new(&self.base_path)
    }
}

/// One `[[routes]]` entry: a path bound to a view or to a redirect.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RouteConfig {
    /// Path to match exactly (e.g. "/scales").
    pub path: String,

    /// Symbolic name for reverse lookup.
    #[serde(default)]
    pub name: Option<String>,

    /// View to activate.
    #[serde(default)]
    pub view: Option<String>,

    /// Path to redirect to.
    #[serde(default)]
    pub redirect: Option<String>,

    /// Load the view on first activation.
    ///
    /// Only a router built with a [`crate::routing::ViewLoader`] waits on
    /// this. The HTTP shell has no view bundles to fetch and activates lazy
    /// routes immediately.
    #[serde(default)]
    pub lazy: bool,
}

impl RouteConfig {
    /// The built-in music application table.
    pub fn music_app() -> Vec<Self> {
        let view = |path: &str, name: &str, view: &str| Self {
            path: path.to_string(),
            name: Some(name.to_string()),
            view: Some(view.to_string()),
            redirect: None,
            lazy: false,
        };
        vec![
            Self {
                path: "/".to_string(),
                name: None,
                view: None,
                redirect: Some("/scales".to_string()),
                lazy: false,
            },
            view("/scales", "scales", "ScalesView"),
            view("/chords", "chords", "ChordsView"),
            view("/progressions", "progressions", "ProgressionsView"),
            view("/metronome", "metronome", "MetronomeView"),
        ]
    }
}

impl TryFrom<&RouteConfig> for Route {
    type Error = TableError;

    fn try_from(config: &RouteConfig) -> Result<Self, Self::Error> {
        let target = match (&config.view, &config.redirect) {
            (Some(view), None) => RouteTarget::View {
                view: ViewId::new(view.clone()),
                lazy: config.lazy,
            },
            (None, Some(to)) => RouteTarget::Redirect { to: to.clone() },
            _ => return Err(TableError::AmbiguousTarget(config.path.clone())),
        };
        Ok(Route::new(config.path.clone(), config.name.clone(), target))
    }
}

/// Timeout configuration for the shell.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
