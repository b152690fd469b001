// SPDX-FileCopyrightText: 2026 Contributors to the OpenWare project.
// SPDX-License-Identifier: Apache-2.0

//! # openware-server
//!
//! Minimal JSON API over the OpenWare native bridge.
//!
//! ## Endpoints
//!
//! - `GET /health` → `{"status": "ok"}`
//! - `GET /version` → `{"version": "...", "native": "..."}` (`native` only
//!   when the library can be loaded)
//! - `GET /sum?a=<int>&b=<int>` → `{"a": a, "b": b, "result": a + b}`
//!
//! Malformed integers and bridge failures are answered with `400` and an
//! `{"error": "..."}` body. Unknown paths get `404`.
//!
//! ## Usage
//!
//! ```text
//! openware-server --port 8080
//! OPENWARE_API_LIB=/opt/lib/libopenware_api.so openware-server --retain-library
//! ```

mod error;
mod http;
mod routes;
mod server;

use std::{net::TcpListener, path::PathBuf, sync::Arc};

use clap::Parser;
use openware::{CallBridge, LibraryResolver, ProcessEnv, RetainedBridge, config::get_project_root};
use tracing::info;

use crate::error::Result;

#[derive(Debug, Parser)]
#[command(version, about = "Serves the OpenWare native API over HTTP")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "OPENWARE_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on.
    #[arg(long, env = "OPENWARE_PORT", default_value_t = 8080)]
    port: u16,

    /// Project root whose build directories are searched for the library.
    #[arg(long, env = "OPENWARE_ROOT")]
    root: Option<PathBuf>,

    /// Load the library once and keep it for the lifetime of the server.
    #[arg(long)]
    retain_library: bool,
}

/// Initializes tracing with an INFO default, overridable through `RUST_LOG`.
fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();
}

fn main() -> Result<()> {
    setup_logging();
    let args = Args::parse();

    let resolver = LibraryResolver::new(args.root.unwrap_or_else(get_project_root));
    let bridge = CallBridge::new(resolver, ProcessEnv);

    let listener = TcpListener::bind((args.host.as_str(), args.port))?;
    info!(
        "OpenWare API server running at http://{}",
        listener.local_addr()?
    );

    if args.retain_library {
        server::serve(listener, Arc::new(RetainedBridge::new(bridge)))
    } else {
        server::serve(listener, Arc::new(bridge))
    }
}
