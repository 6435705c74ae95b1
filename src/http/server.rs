//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum app: every path funnels into one dispatch handler
//! - Wire up middleware (request ID, trace logging)
//! - Serve on a bound listener until shutdown
//!
//! # Design Decisions
//! - The dispatch table is owned by an `Arc<Router>` in handler state, not
//!   registered through any global server state
//! - No inbound request timeout: the only deadline in the system is the
//!   proxy handler's outbound connect bound
//! - Graceful shutdown on ctrl-c

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::response::Response;
use axum::routing::any;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::RouteSet;
use crate::http::request::{RequestIdLayer, X_REQUEST_ID};
use crate::routing::Router as GatewayRouter;

/// HTTP server for the gateway.
pub struct HttpServer {
    app: Router,
}

impl HttpServer {
    /// Build the server from a validated route set.
    pub fn new(route_set: &RouteSet) -> Self {
        let router = Arc::new(GatewayRouter::new(route_set));

        let app = Router::new()
            .route("/{*path}", any(dispatch))
            .route("/", any(dispatch))
            .with_state(router)
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http());

        Self { app }
    }

    /// Serve connections on the given listener until shutdown.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Single entry point for every inbound request: look up the route by
/// longest prefix and hand off to its handler.
async fn dispatch(
    State(router): State<Arc<GatewayRouter>>,
    request: Request<Body>,
) -> Response {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
        "Dispatching request"
    );

    router.dispatch(request).await
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
