//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML), or the built-in music app table
//!     → loader.rs (parse & deserialize, apply BASE_URL)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → AppConfig::route_table() → RouteTable
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; the route table never changes afterwards
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::AppConfig;
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::RouteConfig;
pub use schema::RouterConfig;
pub use validation::ValidationError;
