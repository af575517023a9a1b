//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (host, path)
//!     → router.rs (route lookup)
//!     → matcher.rs (host check, path pattern capture)
//!     → Return: RouteMatch { name, params } or no match
//!
//! Route Compilation (at startup / reload):
//!     RouteConfig[]
//!     → Parse path patterns
//!     → Sort by priority
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Route names are what pages attach to
//! - First match wins (ordered by priority)

pub mod matcher;
pub mod router;

pub use matcher::{PathPattern, PatternError};
pub use router::{RouteMatch, Router};
