//! Command implementations.

pub mod check;
pub mod index;
pub mod render;
pub mod serve;

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use newsmap_core::Config;
use newsmap_generator::SitemapDispatcher;

/// Load the configuration, with environment overrides, and every feed source.
pub fn load_dispatcher(config_path: &Path) -> Result<SitemapDispatcher> {
    let config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;
    tracing::debug!(?config, "Loaded configuration");

    SitemapDispatcher::from_config(&config).wrap_err("Failed to load feed sources")
}
