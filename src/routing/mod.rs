//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → router.rs (route lookup, longest prefix first)
//!     → matcher.rs (evaluate prefix match)
//!     → dispatch to static or proxy handler
//!
//! Route Compilation (at startup):
//!     RouteSet
//!     → build handlers (ServeDir / upstream client)
//!     → sort by prefix length
//!     → freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: longest prefix wins, ties keep configuration order

pub mod matcher;
pub mod router;

pub use router::Router;
