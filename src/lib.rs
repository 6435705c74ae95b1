//! Prefix-routed HTTP front door.
//!
//! One listening port; each request is dispatched by longest path-prefix
//! match either to a local static file tree (with optional fallback page
//! for misses) or to a reverse-proxied upstream HTTP origin.

pub mod config;
pub mod http;
pub mod observability;
pub mod routing;

pub use config::{load_config, validate_config, ProxyConfig, RouteSet};
pub use http::HttpServer;
