//! Fallback interception for static routes.
//!
//! # Responsibilities
//! - Observe the response produced by a static handler
//! - Suppress a 404 outcome entirely (status, headers, body)
//! - Serve the configured fallback file in its place
//!
//! # Design Decisions
//! - Interception happens on the complete response value, the tower
//!   equivalent of decorating a response writer: the wrapped handler runs
//!   to completion unaware, and its miss never reaches the client
//! - Once a response is suppressed it is consumed; nothing the wrapped
//!   handler produced can surface later in the same request
//! - `Content-Type: text/html; charset=utf-8` is forced on the fallback
//!   response so client-side-routed apps always get their entry page

use std::convert::Infallible;
use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::response::Response;
use tower::ServiceExt;
use tower_http::services::ServeFile;

/// A local file served in place of a static-route 404.
#[derive(Debug, Clone)]
pub struct FallbackPage {
    file: PathBuf,
}

impl FallbackPage {
    /// Fallback to `filename` under the static root.
    pub fn new(root: &Path, filename: &str) -> Self {
        Self {
            file: root.join(filename),
        }
    }

    /// Inspect a static handler's response.
    ///
    /// Anything but a 404 passes through untouched. A 404 is dropped whole
    /// and the fallback file is streamed instead, with the file server's own
    /// success status.
    pub async fn intercept(&self, method: &Method, response: Response) -> Response {
        if response.status() != StatusCode::NOT_FOUND {
            return response;
        }

        tracing::debug!(file = %self.file.display(), "Suppressing 404, serving fallback");
        drop(response);
        self.serve(method).await
    }

    /// Stream the fallback file. A missing fallback file surfaces as the
    /// file server's 404, exactly as the lookup miss would have.
    async fn serve(&self, method: &Method) -> Response {
        let req = match Request::builder()
            .method(method.clone())
            .uri("/")
            .body(Body::empty())
        {
            Ok(req) => req,
            Err(e) => {
                tracing::error!(error = %e, "Failed to build fallback request");
                return Response::builder()
                    .status(StatusCode::INTERNAL_SERVER_ERROR)
                    .body(Body::empty())
                    .unwrap_or_default();
            }
        };

        let result: Result<_, Infallible> = ServeFile::new(&self.file).oneshot(req).await;
        let mut response = match result {
            Ok(res) => res.map(Body::new),
            Err(never) => match never {},
        };

        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/html; charset=utf-8"),
        );
        response
    }
}
