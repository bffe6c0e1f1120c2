//! Serve command - HTTP sitemap server

use std::{path::Path, sync::Arc};

use color_eyre::eyre::{Result, WrapErr};
use tokio::net::TcpListener;

use super::load_dispatcher;
use crate::server::create_router;

/// Run the serve command.
///
/// Loads every feed once, then serves from the frozen registry until Ctrl+C.
pub async fn run(config_path: &Path, port: u16) -> Result<()> {
    tracing::info!(?config_path, port, "Starting sitemap server");

    let dispatcher = Arc::new(load_dispatcher(config_path)?);
    let index_path = dispatcher.site().index_path();
    let sections = dispatcher.registry().len();

    let app = create_router(dispatcher);
    let addr = format!("127.0.0.1:{port}");

    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind to {addr}"))?;

    println!();
    println!("  Serving {sections} section(s) at http://{addr}");
    println!("  Sitemap index: http://{addr}{index_path}");
    println!("  Press Ctrl+C to stop");
    println!();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
