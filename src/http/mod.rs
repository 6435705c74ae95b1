//! HTTP handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, single dispatch handler)
//!     → request.rs (add request ID)
//!     → [routing layer picks the route]
//!     → static_files.rs (+ fallback.rs) or proxy.rs
//!     → Response streamed to client
//! ```

pub mod fallback;
pub mod proxy;
pub mod request;
pub mod server;
pub mod static_files;

pub use fallback::FallbackPage;
pub use proxy::UpstreamHandler;
pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
pub use static_files::StaticHandler;
