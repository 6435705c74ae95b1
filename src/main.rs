//! Gateway entry point.
//!
//! Thin wrapper around the library: parse flags, assemble a validated
//! `RouteSet` (from a JSON config file or from single-route flags), bind the
//! listener, and serve. Config and bind failures are fatal here, before any
//! request is handled; everything after is per-request and recoverable.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio::net::TcpListener;

use webgate::config::{self, ConfigError, ProxyConfig, RouteEntry, RouteSet};
use webgate::observability;
use webgate::HttpServer;

/// Prefix-routed HTTP front door: static files and upstream proxying behind
/// one listening port.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Opt {
    /// Config file (JSON)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Server listening port (ignored when --config is given)
    #[arg(short = 'l', long, default_value_t = 9000)]
    listen: u16,

    /// Prefix of request path, example: /api/
    #[arg(long, default_value = "/")]
    prefix: String,

    /// Root path of static files, example: dist
    #[arg(long)]
    root: Option<String>,

    /// Upstream server, example: http://localhost:3000
    #[arg(long)]
    upstream: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let opt = Opt::parse();

    observability::logging::init();

    let route_set = match load_routes(&opt) {
        Ok(set) => set,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let listener = match TcpListener::bind(("0.0.0.0", route_set.listen)).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(port = route_set.listen, error = %e, "Failed to bind");
            return ExitCode::FAILURE;
        }
    };

    let server = HttpServer::new(&route_set);
    if let Err(e) = server.run(listener).await {
        tracing::error!(error = %e, "Server error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Build the route set from a config file, or collapse the single-route
/// flags into one.
fn load_routes(opt: &Opt) -> Result<RouteSet, ConfigError> {
    match &opt.config {
        Some(path) => config::load_config(path),
        None => {
            let config = ProxyConfig {
                version: 0,
                listen: opt.listen,
                proxy: vec![RouteEntry {
                    prefix: opt.prefix.clone(),
                    root: opt.root.clone(),
                    fallback: None,
                    upstream: opt.upstream.clone(),
                }],
            };
            Ok(config::validate_config(&config)?)
        }
    }
}
