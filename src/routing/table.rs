//! Route table: declaration, lookup and redirect following.
//!
//! # Responsibilities
//! - Store the declared routes in order
//! - Look up a route by path (first match wins) or by name
//! - Follow redirects to a view, detecting cycles
//!
//! # Design Decisions
//! - Immutable after construction (shared without locks)
//! - O(1) name lookup via HashMap
//! - O(n) path scan (the table holds a handful of routes)
//! - Explicit NotFound rather than a silent default

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::routing::error::{RoutingError, TableError};
use crate::routing::matcher::{ExactPathMatcher, MatchOptions, Matcher};
use crate::routing::view::ViewId;

/// What a route does once matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouteTarget {
    /// Activate a view.
    View { view: ViewId, lazy: bool },
    /// Continue resolution at another path.
    Redirect { to: String },
}

/// A declarative binding from a path to a view or to another path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    path: String,
    name: Option<String>,
    target: RouteTarget,
}

impl Route {
    pub fn new(path: impl Into<String>, name: Option<String>, target: RouteTarget) -> Self {
        Self {
            path: path.into(),
            name,
            target,
        }
    }

    /// A named route activating a bundled view.
    pub fn view(path: impl Into<String>, name: impl Into<String>, view: impl Into<ViewId>) -> Self {
        Self {
            path: path.into(),
            name: Some(name.into()),
            target: RouteTarget::View {
                view: view.into(),
                lazy: false,
            },
        }
    }

    /// A named route whose view is loaded on first activation.
    pub fn lazy_view(path: impl Into<String>, name: impl Into<String>, view: impl Into<ViewId>) -> Self {
        Self {
            path: path.into(),
            name: Some(name.into()),
            target: RouteTarget::View {
                view: view.into(),
                lazy: true,
            },
        }
    }

    /// An unnamed redirect.
    pub fn redirect(path: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: None,
            target: RouteTarget::Redirect { to: to.into() },
        }
    }

    /// Give the route a name for reverse lookup.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn target(&self) -> &RouteTarget {
        &self.target
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self.target, RouteTarget::Redirect { .. })
    }
}

/// Outcome of following a path through the table to a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'a> {
    /// The view route resolution ended at.
    pub route: &'a Route,
    pub view: &'a ViewId,
    pub lazy: bool,
    /// Path of the first route matched, when it was a redirect.
    pub redirected_from: Option<&'a str>,
}

#[derive(Debug)]
struct CompiledRoute {
    route: Route,
    matcher: Box<dyn Matcher>,
}

/// Ordered, immutable set of routes.
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<CompiledRoute>,
    by_name: HashMap<String, usize>,
    options: MatchOptions,
}

impl RouteTable {
    /// Check and compile a table.
    ///
    /// Redirect targets are not checked here; a dangling or cyclic redirect
    /// surfaces at resolution time (configuration loading rejects both).
    pub fn new(routes: Vec<Route>, options: MatchOptions) -> Result<Self, TableError> {
        let mut names = HashSet::new();
        let mut paths = HashSet::new();

        for route in &routes {
            if !route.path.starts_with('/') {
                return Err(TableError::RelativePath(route.path.clone()));
            }
            if let RouteTarget::Redirect { to } = &route.target {
                if !to.starts_with('/') {
                    return Err(TableError::RelativeRedirect(to.clone()));
                }
            }
            // Two paths the matcher cannot tell apart leave the second unreachable.
            if !paths.insert(options.normalize(&route.path)) {
                return Err(TableError::DuplicatePath(route.path.clone()));
            }
            if let Some(name) = &route.name {
                if !names.insert(name.as_str()) {
                    return Err(TableError::DuplicateName(name.clone()));
                }
            }
        }

        Ok(Self::compile(routes, options))
    }

    /// The music application's table: `/` redirects to `/scales`, and four
    /// named views.
    pub fn music_app() -> Self {
        Self::compile(Self::music_app_routes(), MatchOptions::default())
    }

    /// The routes of [`RouteTable::music_app`], for callers that need other options.
    pub fn music_app_routes() -> Vec<Route> {
        vec![
            Route::redirect("/", "/scales"),
            Route::view("/scales", "scales", "ScalesView"),
            Route::view("/chords", "chords", "ChordsView"),
            Route::view("/progressions", "progressions", "ProgressionsView"),
            Route::view("/metronome", "metronome", "MetronomeView"),
        ]
    }

    fn compile(routes: Vec<Route>, options: MatchOptions) -> Self {
        let by_name = routes
            .iter()
            .enumerate()
            .filter_map(|(idx, r)| r.name.clone().map(|n| (n, idx)))
            .collect();

        let routes = routes
            .into_iter()
            .map(|route| CompiledRoute {
                matcher: Box::new(ExactPathMatcher::new(route.path.clone(), options)),
                route,
            })
            .collect();

        Self {
            routes,
            by_name,
            options,
        }
    }

    /// First route whose path matches `path`.
    pub fn find_by_path(&self, path: &str) -> Option<&Route> {
        self.routes
            .iter()
            .find(|c| c.matcher.matches(path))
            .map(|c| &c.route)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Route> {
        self.by_name.get(name).map(|&idx| &self.routes[idx].route)
    }

    /// Match `path` and follow redirects until a view route is reached.
    pub fn follow(&self, path: &str) -> Result<Resolution<'_>, RoutingError> {
        let mut visited: Vec<&str> = Vec::new();
        let mut current = path;

        loop {
            let route = self
                .find_by_path(current)
                .ok_or_else(|| RoutingError::NotFound {
                    path: current.to_string(),
                })?;

            if visited.contains(&route.path()) {
                let mut chain: Vec<String> = visited.iter().map(|p| p.to_string()).collect();
                chain.push(route.path().to_string());
                return Err(RoutingError::CyclicRedirect { chain });
            }
            visited.push(route.path());

            match route.target() {
                RouteTarget::View { view, lazy } => {
                    return Ok(Resolution {
                        route,
                        view,
                        lazy: *lazy,
                        redirected_from: (visited.len() > 1).then(|| visited[0]),
                    });
                }
                RouteTarget::Redirect { to } => current = to.as_str(),
            }
        }
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter().map(|c| &c.route)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn options(&self) -> MatchOptions {
        self.options
    }
}
