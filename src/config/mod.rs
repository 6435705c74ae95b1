//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (JSON) or CLI flags
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouteSet (validated, immutable)
//!     → shared via Arc with the router for the process lifetime
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - Validation separates syntactic (serde) from semantic checks
//! - All semantic errors are reported at once, before any socket opens

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ProxyConfig, RouteEntry};
pub use validation::{validate_config, RouteSet, RouteSpec, RouteTarget, ValidationError};
