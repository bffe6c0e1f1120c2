//! Render command - print one section or every section

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};

use super::load_dispatcher;

/// Run the render command.
///
/// `page` is the raw page number, as it would appear in `?p=`.
pub fn run(config_path: &Path, section: Option<&str>, page: Option<&str>) -> Result<()> {
    tracing::info!(?config_path, ?section, ?page, "Rendering sitemap");

    let dispatcher = load_dispatcher(config_path)?;
    let xml = dispatcher
        .render(section, page)
        .wrap_err_with(|| match section {
            Some(section) => format!("Failed to render section '{section}'"),
            None => "Failed to render sitemap".to_string(),
        })?;

    print!("{xml}");
    Ok(())
}
