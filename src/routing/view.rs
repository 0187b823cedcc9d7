//! View references and on-demand view loading.
//!
//! A view is opaque to the router: it is named by a [`ViewId`] and, for lazy
//! routes, made available through a [`ViewLoader`] before activation.

use std::fmt;
use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable identifier of a view component (e.g. `ScalesView`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ViewId(String);

impl ViewId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ViewId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A lazy view failed to load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ViewLoadError(pub String);

/// Makes lazy views available before the router activates them.
pub trait ViewLoader: Send + Sync {
    /// Resolves once `view` can be rendered.
    fn load(&self, view: &ViewId) -> impl Future<Output = Result<(), ViewLoadError>> + Send;
}

/// Loader for builds where every view is bundled up front.
#[derive(Debug, Clone, Copy, Default)]
pub struct EagerViews;

impl ViewLoader for EagerViews {
    fn load(&self, _view: &ViewId) -> impl Future<Output = Result<(), ViewLoadError>> + Send {
        std::future::ready(Ok(()))
    }
}
