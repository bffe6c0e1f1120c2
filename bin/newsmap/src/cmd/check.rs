//! Check command - validate configuration, sources and produced entries

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use newsmap_core::Config;
use newsmap_generator::{EntryIssue, Sitemap, SitemapDispatcher, validate_entry};

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Loads configuration and every feed source, then validates each entry
/// of every page.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and feeds");

    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    let config = match Config::load_with_env(config_path) {
        Ok(c) => {
            println!("  ✓ Configuration valid");
            Some(c)
        }
        Err(e) => {
            result.add_error(format!("Configuration error: {e}"));
            println!("  ✗ Configuration invalid: {e}");
            None
        }
    };

    if let Some(ref cfg) = config {
        println!("\nChecking configuration values...");
        check_config_values(cfg, &mut result);

        println!("\nLoading feed sources...");
        match SitemapDispatcher::from_config(cfg) {
            Ok(dispatcher) => {
                println!("  ✓ {} feed(s) loaded", dispatcher.registry().len());

                println!("\nChecking entries...");
                check_entries(&dispatcher, &mut result);

                println!("\nRendering sitemaps...");
                check_rendering(&dispatcher, &mut result);
            }
            Err(e) => {
                result.add_error(format!("Feed source error: {e}"));
                println!("  ✗ Failed to load feed sources: {e}");
            }
        }
    }

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Check configuration values for common issues.
fn check_config_values(config: &Config, result: &mut ValidationResult) {
    if !matches!(config.site.protocol.as_str(), "http" | "https") {
        result.add_warning(format!(
            "site.protocol '{}' should be http or https",
            config.site.protocol
        ));
    }

    if config.publication.language.is_empty() {
        result.add_warning("publication.language is empty");
    }

    if config.feeds.is_empty() {
        result.add_warning("No feeds configured");
    }

    println!("  ✓ Configuration values checked");
}

/// Validate every entry of every page of every feed.
///
/// Video entries without any location are errors; other issues are warnings.
fn check_entries(dispatcher: &SitemapDispatcher, result: &mut ValidationResult) {
    let site = dispatcher.site();

    for (section, feed) in dispatcher.registry().iter() {
        let mut checked = 0usize;
        let mut flagged = 0usize;

        for page in 1..=feed.num_pages() {
            let entries = match feed.get_entries(site, page as i64) {
                Ok(entries) => entries,
                Err(e) => {
                    result.add_error(format!("{section}: page {page}: {e}"));
                    continue;
                }
            };

            for entry in entries {
                checked += 1;
                let issues = validate_entry(&entry);
                if !issues.is_empty() {
                    flagged += 1;
                }
                for issue in issues {
                    if matches!(issue, EntryIssue::MissingVideoLocation { .. }) {
                        result.add_error(format!("{section}: {issue}"));
                    } else {
                        result.add_warning(format!("{section}: {issue}"));
                    }
                }
            }
        }

        if flagged == 0 {
            println!("  ✓ {section}: all {checked} entries valid");
        } else {
            println!("  ⚠ {section}: {flagged}/{checked} entries have issues");
        }
    }
}

/// Render the index and the first page of every section.
fn check_rendering(dispatcher: &SitemapDispatcher, result: &mut ValidationResult) {
    match dispatcher.index() {
        Ok(_) => println!("  ✓ Sitemap index"),
        Err(e) => result.add_error(format!("Sitemap index: {e}")),
    }

    for section in dispatcher.registry().sections() {
        match dispatcher.render(Some(section), None) {
            Ok(_) => println!("  ✓ {section}"),
            Err(e) => result.add_error(format!("{section}: {e}")),
        }
    }
}
