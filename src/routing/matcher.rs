//! Route matching logic.
//!
//! # Responsibilities
//! - Match request paths against a configured prefix
//! - Strip the matched prefix when handing off to a handler
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - A prefix ending in '/' is a subtree root and also matches the exact
//!   parent path (`/static/` matches `/static`)
//! - A prefix without a trailing '/' matches exactly or at a '/' boundary
//!   (`/api` matches `/api` and `/api/v1`, never `/apix`)
//! - No regex to guarantee O(n) matching

use axum::body::Body;
use axum::http::Request;

/// Matches the request path against a route prefix.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The configured prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Length of the prefix, used to order routes longest-first.
    pub fn len(&self) -> usize {
        self.prefix.len()
    }

    /// Returns true if the request path falls under this prefix.
    pub fn matches(&self, req: &Request<Body>) -> bool {
        self.matches_path(req.uri().path())
    }

    fn matches_path(&self, path: &str) -> bool {
        if let Some(parent) = self.prefix.strip_suffix('/') {
            // Subtree prefix: everything below it, plus the bare parent.
            path.starts_with(&self.prefix) || path == parent
        } else {
            path == self.prefix
                || (path.starts_with(&self.prefix)
                    && path.as_bytes().get(self.prefix.len()) == Some(&b'/'))
        }
    }
}

/// Strip `prefix` from `path`, keeping the remainder rooted at '/'.
///
/// The prefix is removed without its trailing slash, so the remainder always
/// begins with '/' and joins cleanly onto an origin path:
/// `strip_prefix("/api/widgets", "/api/")` is `/widgets`, and
/// `"/base"` + `"/widgets"` is `/base/widgets`. An exhausted path (the bare
/// parent of a subtree prefix) becomes `/`.
pub fn strip_prefix<'a>(path: &'a str, prefix: &str) -> &'a str {
    let parent = prefix.strip_suffix('/').unwrap_or(prefix);
    let rest = path.strip_prefix(parent).unwrap_or(path);
    if rest.is_empty() {
        "/"
    } else {
        rest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(path: &str) -> Request<Body> {
        Request::builder()
            .uri(format!("http://example.com{}", path))
            .body(Body::default())
            .unwrap()
    }

    #[test]
    fn subtree_prefix_matches_descendants_and_parent() {
        let matcher = PathPrefixMatcher::new("/static/");

        assert!(matcher.matches(&request("/static/foo.txt")));
        assert!(matcher.matches(&request("/static/")));
        assert!(matcher.matches(&request("/static")));
        assert!(!matcher.matches(&request("/staticfoo")));
        assert!(!matcher.matches(&request("/images/foo.txt")));
    }

    #[test]
    fn bare_prefix_matches_on_segment_boundary() {
        let matcher = PathPrefixMatcher::new("/api");

        assert!(matcher.matches(&request("/api")));
        assert!(matcher.matches(&request("/api/v1")));
        assert!(!matcher.matches(&request("/apix")));
    }

    #[test]
    fn root_prefix_matches_everything() {
        let matcher = PathPrefixMatcher::new("/");

        assert!(matcher.matches(&request("/")));
        assert!(matcher.matches(&request("/anything/at/all")));
    }

    #[test]
    fn strip_keeps_leading_slash() {
        assert_eq!(strip_prefix("/api/widgets", "/api/"), "/widgets");
        assert_eq!(strip_prefix("/api/widgets", "/api"), "/widgets");
        assert_eq!(strip_prefix("/api", "/api/"), "/");
        assert_eq!(strip_prefix("/static/a/b.txt", "/static/"), "/a/b.txt");
    }

    #[test]
    fn strip_under_root_prefix_is_identity() {
        assert_eq!(strip_prefix("/foo.txt", "/"), "/foo.txt");
        assert_eq!(strip_prefix("/", "/"), "/");
    }
}
