//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Enforce "exactly one of root/upstream" per route
//! - Validate upstream URLs (absolute, scheme + host)
//! - Detect duplicate prefixes
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: ProxyConfig -> Result<RouteSet, Vec<ValidationError>>
//! - Runs before any socket is bound; invalid config never reaches the router

use std::collections::HashSet;
use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use crate::config::schema::{ProxyConfig, RouteEntry};

/// A semantic error in one route entry, naming the offending field.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("route {index}: `prefix` is required and must not be empty")]
    EmptyPrefix { index: usize },

    #[error("route {index} ({prefix:?}): `prefix` must begin with '/'")]
    PrefixNotRooted { index: usize, prefix: String },

    #[error("route {index} ({prefix:?}): exactly one of `root` or `upstream` must be set, found neither")]
    MissingTarget { index: usize, prefix: String },

    #[error("route {index} ({prefix:?}): exactly one of `root` or `upstream` must be set, found both")]
    ConflictingTarget { index: usize, prefix: String },

    #[error("route {index} ({prefix:?}): `fallback` is only valid together with `root`")]
    FallbackWithoutRoot { index: usize, prefix: String },

    #[error("route {index} ({prefix:?}): invalid `upstream` URL: {source}")]
    InvalidUpstream {
        index: usize,
        prefix: String,
        #[source]
        source: url::ParseError,
    },

    #[error("route {index} ({prefix:?}): `upstream` must be an absolute http:// URL, got scheme {scheme:?}")]
    UnsupportedScheme {
        index: usize,
        prefix: String,
        scheme: String,
    },

    #[error("route {index} ({prefix:?}): `upstream` URL has no host")]
    MissingHost { index: usize, prefix: String },

    #[error("duplicate route prefix {prefix:?}")]
    DuplicatePrefix { prefix: String },

    #[error("no routes configured")]
    NoRoutes,
}

/// Where a route sends matched requests.
///
/// The enum makes "exactly one of root/upstream" structurally true for the
/// rest of the system; only `validate_config` constructs it.
#[derive(Debug, Clone)]
pub enum RouteTarget {
    /// Serve files under `root`, optionally substituting `fallback` for
    /// lookups that miss.
    Static {
        root: PathBuf,
        fallback: Option<String>,
    },
    /// Forward to an upstream HTTP origin.
    Proxy { origin: Url },
}

/// One validated route: a prefix and its target.
#[derive(Debug, Clone)]
pub struct RouteSpec {
    /// Matched against the request path; also the strip key.
    pub prefix: String,
    pub target: RouteTarget,
}

/// The validated, immutable routing configuration.
///
/// Built once at startup from a [`ProxyConfig`], then shared read-only for
/// the process lifetime.
#[derive(Debug, Clone)]
pub struct RouteSet {
    /// Port to listen on.
    pub listen: u16,
    /// Routes in configuration order.
    pub routes: Vec<RouteSpec>,
}

/// Validate a raw config into a [`RouteSet`], collecting every error.
pub fn validate_config(config: &ProxyConfig) -> Result<RouteSet, Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut routes = Vec::new();
    let mut seen_prefixes: HashSet<&str> = HashSet::new();

    if config.proxy.is_empty() {
        errors.push(ValidationError::NoRoutes);
    }

    for (index, entry) in config.proxy.iter().enumerate() {
        if entry.prefix.is_empty() {
            errors.push(ValidationError::EmptyPrefix { index });
            continue;
        }
        if !entry.prefix.starts_with('/') {
            errors.push(ValidationError::PrefixNotRooted {
                index,
                prefix: entry.prefix.clone(),
            });
            continue;
        }
        if !seen_prefixes.insert(entry.prefix.as_str()) {
            errors.push(ValidationError::DuplicatePrefix {
                prefix: entry.prefix.clone(),
            });
            continue;
        }

        match validate_entry(index, entry) {
            Ok(target) => routes.push(RouteSpec {
                prefix: entry.prefix.clone(),
                target,
            }),
            Err(e) => errors.push(e),
        }
    }

    if errors.is_empty() {
        Ok(RouteSet {
            listen: config.listen,
            routes,
        })
    } else {
        Err(errors)
    }
}

/// Check one entry's target fields and produce its [`RouteTarget`].
fn validate_entry(index: usize, entry: &RouteEntry) -> Result<RouteTarget, ValidationError> {
    let prefix = entry.prefix.clone();

    match (&entry.root, &entry.upstream) {
        (Some(_), Some(_)) => Err(ValidationError::ConflictingTarget { index, prefix }),
        (None, None) => Err(ValidationError::MissingTarget { index, prefix }),
        (Some(root), None) => Ok(RouteTarget::Static {
            root: PathBuf::from(root),
            fallback: entry.fallback.clone(),
        }),
        (None, Some(upstream)) => {
            // A fallback on a proxy route would never be served; reject it
            // instead of ignoring it silently.
            if entry.fallback.is_some() {
                return Err(ValidationError::FallbackWithoutRoot { index, prefix });
            }

            let origin = Url::parse(upstream).map_err(|source| {
                ValidationError::InvalidUpstream {
                    index,
                    prefix: prefix.clone(),
                    source,
                }
            })?;

            // The outbound client speaks plain HTTP only.
            if origin.scheme() != "http" {
                return Err(ValidationError::UnsupportedScheme {
                    index,
                    prefix,
                    scheme: origin.scheme().to_string(),
                });
            }
            if origin.host_str().is_none() {
                return Err(ValidationError::MissingHost { index, prefix });
            }

            Ok(RouteTarget::Proxy { origin })
        }
    }
}
