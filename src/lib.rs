//! View router for the music theory single-page application.
//!
//! Maps `/scales`, `/chords`, `/progressions` and `/metronome` to their
//! views, redirects `/` to `/scales`, and ships a small HTTP shell that
//! serves the application in history mode.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Navigation, Router, RoutingError};
