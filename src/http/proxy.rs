//! Reverse proxying to an upstream origin.
//!
//! # Responsibilities
//! - Rewrite the request line: strip the route prefix, prepend the origin's
//!   own path, preserve the query string
//! - Rewrite headers: Host to the origin, X-Forwarded-Host / X-Origin-Host
//!   appended for upstream observability
//! - Forward with a bounded connect timeout and relay the response unchanged
//!
//! # Design Decisions
//! - One client per route: one upstream per route means no pooling across
//!   origins to coordinate
//! - Only the TCP connect is bounded (5s); established connections stream
//!   without a deadline, so long upstream responses pass through
//! - Connect failure maps to 502 for the one affected request, never a crash
//! - Hop-by-hop headers are stripped before forwarding (RFC 9110 §7.6.1)

use std::fmt;
use std::time::Duration;

use axum::body::Body;
use axum::http::request::Parts;
use axum::http::uri::{Authority, PathAndQuery, Scheme};
use axum::http::{header, HeaderName, HeaderValue, Request, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use url::Url;

use crate::routing::matcher::strip_prefix;

/// Outbound TCP connect bound. Established connections have no deadline.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Headers that belong to the inbound hop, never forwarded.
const HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

pub const X_FORWARDED_HOST: &str = "x-forwarded-host";
pub const X_ORIGIN_HOST: &str = "x-origin-host";

/// Forwards requests under a prefix to one upstream HTTP origin.
#[derive(Clone)]
pub struct UpstreamHandler {
    prefix: String,
    authority: Authority,
    /// The origin URL's own path with any trailing slash removed; prepended
    /// to the stripped request path.
    origin_path: String,
    client: Client<HttpConnector, Body>,
}

impl UpstreamHandler {
    /// Build a handler for `origin`, mounted at `prefix`.
    ///
    /// `origin` comes out of config validation: absolute, http scheme, host
    /// present. Runs at startup, before the listener binds.
    pub fn new(prefix: &str, origin: &Url) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(CONNECT_TIMEOUT));
        let client = Client::builder(TokioExecutor::new()).build(connector);

        let host = origin.host_str().unwrap_or_default();
        let authority = match origin.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };
        let authority: Authority = authority
            .parse()
            .expect("validated origin URL has a well-formed host");

        Self {
            prefix: prefix.to_string(),
            authority,
            origin_path: origin.path().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Forward one request and relay the upstream response.
    pub async fn handle(&self, req: Request<Body>) -> Response {
        let (mut parts, body) = req.into_parts();

        if let Err(e) = self.rewrite(&mut parts) {
            tracing::error!(origin = %self.authority, error = %e, "Request rewrite failed");
            return (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response();
        }

        let outbound = Request::from_parts(parts, body);
        match self.client.request(outbound).await {
            Ok(response) => {
                let (parts, body) = response.into_parts();
                Response::from_parts(parts, Body::new(body))
            }
            Err(e) => {
                tracing::error!(origin = %self.authority, error = %e, "Upstream request failed");
                (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
            }
        }
    }

    /// Rewrite request parts in place for the upstream hop.
    fn rewrite(&self, parts: &mut Parts) -> Result<(), axum::http::Error> {
        // Path: strip the matched prefix, prepend the origin's path.
        let rest = strip_prefix(parts.uri.path(), &self.prefix);
        let mut target = format!("{}{}", self.origin_path, rest);
        if let Some(query) = parts.uri.query() {
            target.push('?');
            target.push_str(query);
        }
        let path_and_query: PathAndQuery = target.parse()?;

        parts.uri = Uri::builder()
            .scheme(Scheme::HTTP)
            .authority(self.authority.clone())
            .path_and_query(path_and_query)
            .build()?;

        // Headers: drop hop-by-hop, record the original host, point Host at
        // the origin.
        let original_host = parts.headers.get(header::HOST).cloned();
        for name in &HOP_BY_HOP {
            parts.headers.remove(name);
        }
        if let Some(host) = original_host {
            parts.headers.append(X_FORWARDED_HOST, host);
        }
        let origin_host = HeaderValue::from_str(self.authority.as_str())?;
        parts.headers.append(X_ORIGIN_HOST, origin_host.clone());
        parts.headers.insert(header::HOST, origin_host);

        Ok(())
    }
}

impl fmt::Debug for UpstreamHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamHandler")
            .field("prefix", &self.prefix)
            .field("authority", &self.authority)
            .field("origin_path", &self.origin_path)
            .finish_non_exhaustive()
    }
}
