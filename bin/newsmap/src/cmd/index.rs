//! Index command - print the sitemap index

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};

use super::load_dispatcher;

/// Run the index command.
pub fn run(config_path: &Path) -> Result<()> {
    tracing::info!(?config_path, "Rendering sitemap index");

    let dispatcher = load_dispatcher(config_path)?;
    let xml = dispatcher
        .index()
        .wrap_err("Failed to render sitemap index")?;

    print!("{xml}");
    Ok(())
}
