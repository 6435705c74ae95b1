//! Static file serving under a route prefix.
//!
//! # Responsibilities
//! - Strip the matched prefix from the request path
//! - Resolve the remainder under the configured root directory
//! - Delegate file semantics (index files, conditional requests, ranges,
//!   content types) to `ServeDir`
//! - Apply fallback interception when a fallback file is configured
//!
//! # Design Decisions
//! - A lookup miss is the file server's plain 404 unless a fallback is
//!   configured; the handler itself never invents a body
//! - Prefix stripping happens here, not in the router, so the file server
//!   only ever sees root-relative paths

use std::convert::Infallible;
use std::path::Path;

use axum::body::Body;
use axum::http::{Request, Uri};
use axum::response::Response;
use tower::ServiceExt;
use tower_http::services::ServeDir;

use crate::http::fallback::FallbackPage;
use crate::routing::matcher::strip_prefix;

/// Serves files under a root directory for a given prefix.
#[derive(Debug, Clone)]
pub struct StaticHandler {
    prefix: String,
    serve_dir: ServeDir,
    fallback: Option<FallbackPage>,
}

impl StaticHandler {
    /// Create a handler for `root` mounted at `prefix`, with an optional
    /// fallback file (relative to `root`) substituted for misses.
    pub fn new(prefix: &str, root: &Path, fallback: Option<&str>) -> Self {
        Self {
            prefix: prefix.to_string(),
            serve_dir: ServeDir::new(root),
            fallback: fallback.map(|filename| FallbackPage::new(root, filename)),
        }
    }

    /// Serve one request. Emits exactly one response.
    pub async fn handle(&self, req: Request<Body>) -> Response {
        let method = req.method().clone();
        let req = strip_request_prefix(req, &self.prefix);

        let result: Result<_, Infallible> = self.serve_dir.clone().oneshot(req).await;
        let response = match result {
            Ok(res) => res.map(Body::new),
            Err(never) => match never {},
        };

        match &self.fallback {
            Some(page) => page.intercept(&method, response).await,
            None => response,
        }
    }
}

/// Rebuild the request URI with the route prefix removed.
fn strip_request_prefix(req: Request<Body>, prefix: &str) -> Request<Body> {
    let (mut parts, body) = req.into_parts();
    let stripped = strip_prefix(parts.uri.path(), prefix);

    if stripped != parts.uri.path() {
        let target = match parts.uri.query() {
            Some(query) => format!("{stripped}?{query}"),
            None => stripped.to_string(),
        };
        if let Ok(uri) = target.parse::<Uri>() {
            parts.uri = uri;
        }
    }

    Request::from_parts(parts, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::{header, Method, StatusCode};
    use std::io::Write;

    fn static_root() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("foo.txt")).unwrap();
        write!(file, "hello").unwrap();
        let mut index = std::fs::File::create(dir.path().join("index.html")).unwrap();
        write!(index, "<html>app</html>").unwrap();
        dir
    }

    fn request(path: &str) -> Request<Body> {
        Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn serves_file_under_prefix() {
        let root = static_root();
        let handler = StaticHandler::new("/static/", root.path(), None);

        let response = handler.handle(request("/static/foo.txt")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"hello");
    }

    #[tokio::test]
    async fn miss_without_fallback_is_404() {
        let root = static_root();
        let handler = StaticHandler::new("/static/", root.path(), None);

        let response = handler.handle(request("/static/missing.txt")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn miss_with_fallback_serves_fallback_page() {
        let root = static_root();
        let handler = StaticHandler::new("/static/", root.path(), Some("index.html"));

        let response = handler.handle(request("/static/no/such/page")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"<html>app</html>");
    }

    #[tokio::test]
    async fn hit_with_fallback_still_serves_the_file() {
        let root = static_root();
        let handler = StaticHandler::new("/static/", root.path(), Some("index.html"));

        let response = handler.handle(request("/static/foo.txt")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"hello");
    }

    #[tokio::test]
    async fn directory_index_is_served_at_prefix_root() {
        let root = static_root();
        let handler = StaticHandler::new("/static/", root.path(), None);

        let response = handler.handle(request("/static/")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"<html>app</html>");
    }
}
