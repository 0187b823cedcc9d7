//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Navigation event (initial load, link, back/forward)
//!     → matcher.rs (strip base path, split query/fragment, exact match)
//!     → table.rs (route lookup, follow redirects)
//!     → view.rs (load lazy view, if any)
//!     → router.rs (commit to the active-route slot)
//!
//! Table compilation (at startup):
//!     Route[]
//!     → Check names and paths are unique
//!     → Compile exact-path matchers
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Table built once at startup, immutable at runtime
//! - Exact path matching only (no params, no wildcards)
//! - Deterministic: same location always resolves to the same route
//! - First declared match wins
//! - Only successful navigations write the active-route slot

pub mod error;
pub mod history;
pub mod matcher;
pub mod router;
pub mod table;
pub mod view;

pub use error::{RoutingError, TableError};
pub use history::History;
pub use matcher::{BasePath, Location, MatchOptions};
pub use router::{ActiveRoute, Navigation, Router, RouterState};
pub use table::{Route, RouteTable, RouteTarget};
pub use view::{EagerViews, ViewId, ViewLoadError, ViewLoader};
