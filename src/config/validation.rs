//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every route has exactly one target and absolute paths
//! - Check referential integrity (redirects point at declared paths)
//! - Detect redirect cycles and an unresolvable root
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::{BTreeSet, HashSet};
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::routing::{Route, RouteTable, RoutingError};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    InvalidBindAddress(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("router.base_path '{0}' must start with '/'")]
    RelativeBasePath(String),

    #[error("route path '{0}' must start with '/'")]
    RelativePath(String),

    #[error("route '{0}' must declare exactly one of `view` or `redirect`")]
    AmbiguousTarget(String),

    #[error("route '{path}' redirects to '{target}', which must start with '/'")]
    RelativeRedirect { path: String, target: String },

    #[error("duplicate route name '{0}'")]
    DuplicateName(String),

    #[error("duplicate route path '{0}'")]
    DuplicatePath(String),

    #[error("route '{path}' redirects to undeclared path '{target}'")]
    DanglingRedirect { path: String, target: String },

    #[error("redirect cycle: {}", .0.join(" -> "))]
    RedirectCycle(Vec<String>),

    #[error("'/' must resolve to a view")]
    UnresolvedRoot,
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    let base = config.router.base_path.trim();
    if !base.is_empty() && !base.starts_with('/') {
        errors.push(ValidationError::RelativeBasePath(config.router.base_path.clone()));
    }

    let options = config.router.match_options();
    let mut names = HashSet::new();
    let mut paths = HashSet::new();
    let mut routes = Vec::new();
    let mut well_formed = true;

    for route in &config.routes {
        if !route.path.starts_with('/') {
            errors.push(ValidationError::RelativePath(route.path.clone()));
            well_formed = false;
        }
        if let Some(target) = &route.redirect {
            if !target.starts_with('/') {
                errors.push(ValidationError::RelativeRedirect {
                    path: route.path.clone(),
                    target: target.clone(),
                });
                well_formed = false;
            }
        }
        if !paths.insert(options.normalize(&route.path)) {
            errors.push(ValidationError::DuplicatePath(route.path.clone()));
            well_formed = false;
        }
        if let Some(name) = &route.name {
            if !names.insert(name.as_str()) {
                errors.push(ValidationError::DuplicateName(name.clone()));
                well_formed = false;
            }
        }
        match Route::try_from(route) {
            Ok(r) => routes.push(r),
            Err(_) => {
                errors.push(ValidationError::AmbiguousTarget(route.path.clone()));
                well_formed = false;
            }
        }
    }

    // Redirect checks need a table, which needs the per-route checks to pass.
    if well_formed {
        match RouteTable::new(routes, options) {
            Ok(table) => check_redirects(&table, &mut errors),
            Err(e) => tracing::debug!(error = %e, "Route table rejected after per-route checks"),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_redirects(table: &RouteTable, errors: &mut Vec<ValidationError>) {
    let mut cycles_seen: HashSet<BTreeSet<String>> = HashSet::new();

    for route in table.routes().filter(|r| r.is_redirect()) {
        match table.follow(route.path()) {
            Ok(_) => {}
            Err(RoutingError::NotFound { path }) => {
                errors.push(ValidationError::DanglingRedirect {
                    path: route.path().to_string(),
                    target: path,
                });
            }
            Err(RoutingError::CyclicRedirect { chain }) => {
                // Every route on a cycle reaches it; report each cycle once.
                let start = chain.last().cloned().unwrap_or_default();
                let cycle: Vec<String> = chain
                    .iter()
                    .skip_while(|p| **p != start)
                    .cloned()
                    .collect();
                if cycles_seen.insert(cycle.iter().cloned().collect()) {
                    errors.push(ValidationError::RedirectCycle(cycle));
                }
            }
            Err(_) => {}
        }
    }

    if table.follow("/").is_err() {
        errors.push(ValidationError::UnresolvedRoot);
    }
}
