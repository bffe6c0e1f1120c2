//! newsmap CLI Library
//!
//! Command implementations and the HTTP surface of the newsmap binary.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (serve, index, render, check)
//! - [`server`] - axum router serving the index and section sitemaps
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use newsmap::cmd;
//!
//! // Print every section's first page
//! cmd::render::run(Path::new("newsmap.toml"), None, None).unwrap();
//! ```

pub mod cmd;
pub mod server;

pub use newsmap_core::Config;
pub use newsmap_generator::{Registry, SitemapDispatcher, SitemapError};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
