//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing, config, http produce:
//!     → tracing events with structured fields (location, route, view)
//!     → tower-http TraceLayer spans per request, tagged with x-request-id
//!
//! Consumers:
//!     → logging.rs (fmt subscriber to stdout)
//! ```
//!
//! # Design Decisions
//! - Library code only emits events; the binary installs the subscriber
//! - RUST_LOG wins over the configured level

pub mod logging;

pub use logging::init_logging;
