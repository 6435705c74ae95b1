//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via tracing; the request ID from `http::request`
//!   flows through every per-request log line
//! - No metrics endpoint; log output is the only telemetry surface

pub mod logging;
