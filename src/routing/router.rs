//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Compile a validated [`RouteSet`] into handlers
//! - Look up the matching route for a request (longest prefix wins)
//! - Dispatch the request to the matched handler
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) path prefix scan (acceptable for typical route counts)
//! - Routes sorted longest-prefix-first at compile time; the sort is stable
//!   so equal-length prefixes keep configuration order
//! - Explicit no-match (plain 404) rather than silent default

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::config::{RouteSet, RouteTarget};
use crate::http::proxy::UpstreamHandler;
use crate::http::static_files::StaticHandler;
use crate::routing::matcher::PathPrefixMatcher;

/// A compiled route: its matcher plus the handler requests dispatch to.
#[derive(Debug)]
pub struct Route {
    matcher: PathPrefixMatcher,
    handler: RouteHandler,
}

/// The two handling strategies a route can resolve to.
#[derive(Debug)]
pub enum RouteHandler {
    Static(StaticHandler),
    Proxy(UpstreamHandler),
}

impl Route {
    /// The prefix this route is registered under.
    pub fn prefix(&self) -> &str {
        self.matcher.prefix()
    }

    /// Run the route's handler against a request.
    pub async fn handle(&self, req: Request<Body>) -> Response {
        match &self.handler {
            RouteHandler::Static(h) => h.handle(req).await,
            RouteHandler::Proxy(h) => h.handle(req).await,
        }
    }
}

/// The gateway's dispatch table. Compiled once at startup, then read-only.
#[derive(Debug)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    /// Compile a validated route set into a dispatch table.
    pub fn new(set: &RouteSet) -> Self {
        let mut routes: Vec<Route> = set
            .routes
            .iter()
            .map(|spec| {
                let handler = match &spec.target {
                    RouteTarget::Static { root, fallback } => {
                        tracing::info!(
                            prefix = %spec.prefix,
                            root = %root.display(),
                            fallback = fallback.as_deref().unwrap_or(""),
                            "Serving static directory"
                        );
                        RouteHandler::Static(StaticHandler::new(
                            &spec.prefix,
                            root,
                            fallback.as_deref(),
                        ))
                    }
                    RouteTarget::Proxy { origin } => {
                        tracing::info!(
                            prefix = %spec.prefix,
                            origin = %origin,
                            "Proxying to upstream"
                        );
                        RouteHandler::Proxy(UpstreamHandler::new(&spec.prefix, origin))
                    }
                };
                Route {
                    matcher: PathPrefixMatcher::new(&spec.prefix),
                    handler,
                }
            })
            .collect();

        // Longest prefix wins; stable, so ties keep configuration order.
        routes.sort_by(|a, b| b.matcher.len().cmp(&a.matcher.len()));

        Self { routes }
    }

    /// Find the route for a request, if any.
    pub fn match_request(&self, req: &Request<Body>) -> Option<&Route> {
        self.routes.iter().find(|route| route.matcher.matches(req))
    }

    /// Dispatch a request to its route's handler.
    pub async fn dispatch(&self, req: Request<Body>) -> Response {
        match self.match_request(&req) {
            Some(route) => {
                tracing::debug!(
                    prefix = %route.prefix(),
                    path = %req.uri().path(),
                    "Route matched"
                );
                route.handle(req).await
            }
            None => {
                tracing::debug!(path = %req.uri().path(), "No route matched");
                (StatusCode::NOT_FOUND, "No matching route found").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RouteSpec;
    use std::path::PathBuf;

    fn static_spec(prefix: &str) -> RouteSpec {
        RouteSpec {
            prefix: prefix.to_string(),
            target: RouteTarget::Static {
                root: PathBuf::from("dist"),
                fallback: None,
            },
        }
    }

    fn request(path: &str) -> Request<Body> {
        Request::builder()
            .uri(format!("http://example.com{}", path))
            .body(Body::default())
            .unwrap()
    }

    #[test]
    fn longest_prefix_wins() {
        let set = RouteSet {
            listen: 9000,
            routes: vec![
                static_spec("/"),
                static_spec("/static/"),
                static_spec("/static/assets/"),
            ],
        };
        let router = Router::new(&set);

        let matched = router
            .match_request(&request("/static/assets/app.js"))
            .unwrap();
        assert_eq!(matched.prefix(), "/static/assets/");

        let matched = router.match_request(&request("/static/app.js")).unwrap();
        assert_eq!(matched.prefix(), "/static/");

        let matched = router.match_request(&request("/index.html")).unwrap();
        assert_eq!(matched.prefix(), "/");
    }

    #[test]
    fn no_match_without_root_route() {
        let set = RouteSet {
            listen: 9000,
            routes: vec![static_spec("/static/")],
        };
        let router = Router::new(&set);

        assert!(router.match_request(&request("/api/widgets")).is_none());
    }
}
