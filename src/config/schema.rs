//! Configuration schema definitions.
//!
//! This module defines the raw, on-disk configuration structure for the
//! gateway. All types derive Serde traits for deserialization from the JSON
//! config file; semantic checks live in `validation.rs`.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
///
/// Matches the JSON config file shape:
///
/// ```json
/// { "version": 1, "listen": 9000, "proxy": [
///     { "prefix": "/static/", "root": "dist", "fallback": "index.html" },
///     { "prefix": "/api/", "upstream": "http://localhost:3000" }
/// ]}
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Config file format version.
    pub version: u32,

    /// Port the gateway listens on.
    #[serde(default = "default_listen")]
    pub listen: u16,

    /// Route definitions, one per path prefix.
    pub proxy: Vec<RouteEntry>,
}

/// One raw route entry as written in the config file.
///
/// Exactly one of `root`/`upstream` must be set; this is not representable
/// in the schema itself and is enforced by `validation::validate_config`.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct RouteEntry {
    /// Path prefix to match, e.g. `/api/`. Also the strip key when
    /// forwarding or resolving files.
    pub prefix: String,

    /// Root directory of static files, e.g. `dist`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,

    /// File served in place of a 404 under a static root, e.g. `index.html`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,

    /// Upstream origin URL, e.g. `http://localhost:3000`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream: Option<String>,
}

fn default_listen() -> u16 {
    9000
}
