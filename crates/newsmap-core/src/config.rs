//! Sitemap configuration management.

use std::{
    collections::{BTreeMap, HashSet},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    content::AttrValue,
    error::{CoreError, Result},
};

/// Main configuration structure for newsmap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,

    /// Publication metadata shared by every news entry.
    pub publication: PublicationConfig,

    /// Registered feeds, in registration order.
    #[serde(default)]
    pub feeds: Vec<FeedConfig>,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Current site domain (e.g., "example.com").
    pub domain: String,

    /// URL scheme used for absolute URLs.
    #[serde(default = "default_protocol")]
    pub protocol: String,

    /// Path prefix the sitemap routes are mounted under (e.g., "/sitemaps").
    #[serde(default)]
    pub mount: String,
}

/// Publication metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicationConfig {
    /// Publication name as it appears on news.google.com.
    pub name: String,

    /// ISO 639 language code.
    #[serde(default = "default_language")]
    pub language: String,

    /// UTC offset appended to timestamps that carry no offset of their own.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

/// Kind of sitemap a feed produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedKind {
    /// Google News sitemap.
    News,
    /// Google Video sitemap.
    Video,
}

impl FeedKind {
    /// Lowercase name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Video => "video",
        }
    }
}

/// A single registered feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Section name the feed is registered under.
    pub name: String,

    /// Sitemap kind.
    pub kind: FeedKind,

    /// JSON file holding the feed's items.
    pub source: PathBuf,

    /// Number of entries per sitemap page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Entry field -> item attribute name.
    #[serde(default)]
    pub fields: BTreeMap<String, String>,

    /// Entry field -> constant value used for every item.
    #[serde(default)]
    pub constants: BTreeMap<String, AttrValue>,
}

// Default value functions
fn default_protocol() -> String {
    "https".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_timezone() -> String {
    "+00:00".to_string()
}

fn default_page_size() -> usize {
    1000
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.resolve_sources(path);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration using the config crate, allowing `NEWSMAP__*` overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("NEWSMAP").separator("__"))
            .build()?;

        let mut config: Config = settings.try_deserialize()?;
        config.resolve_sources(path);
        config.validate()?;
        Ok(config)
    }

    /// Make relative feed sources relative to the config file's directory.
    fn resolve_sources(&mut self, config_path: &Path) {
        let Some(base) = config_path.parent() else {
            return;
        };
        for feed in &mut self.feeds {
            if feed.source.is_relative() {
                feed.source = base.join(&feed.source);
            }
        }
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.site.domain.is_empty() {
            return Err(CoreError::config("site.domain cannot be empty"));
        }

        if self.site.domain.contains("://") {
            return Err(CoreError::config(
                "site.domain must not include a scheme; use site.protocol",
            ));
        }

        if self.publication.name.is_empty() {
            return Err(CoreError::config("publication.name cannot be empty"));
        }

        if !self.site.mount.is_empty() && !self.site.mount.starts_with('/') {
            return Err(CoreError::config("site.mount must start with '/'"));
        }

        if self.site.mount.ends_with('/') {
            tracing::warn!("site.mount should not have a trailing slash");
        }

        let mut seen = HashSet::new();
        for feed in &self.feeds {
            if feed.name.is_empty() {
                return Err(CoreError::config("feed name cannot be empty"));
            }
            if feed.page_size == 0 {
                return Err(CoreError::config(format!(
                    "feed '{}' page_size must be greater than zero",
                    feed.name
                )));
            }
            if !seen.insert(feed.name.as_str()) {
                tracing::warn!(section = %feed.name, "duplicate feed name, last definition wins");
            }
        }

        Ok(())
    }

    /// Route prefix without a trailing slash.
    pub fn mount(&self) -> &str {
        self.site.mount.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn create_test_config() -> String {
        r#"
[site]
domain = "news.example.com"
protocol = "http"
mount = "/sitemaps"

[publication]
name = "The Example Times"
language = "de"
timezone = "+01:00"

[[feeds]]
name = "politics"
kind = "news"
source = "politics.json"
page_size = 50

[feeds.fields]
title = "headline_text"

[feeds.constants]
genres = "Blog, OpEd"

[[feeds]]
name = "clips"
kind = "video"
source = "/data/clips.json"
"#
        .to_string()
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("newsmap.toml");
        let mut file = std::fs::File::create(&config_path).expect("create file");
        file.write_all(create_test_config().as_bytes())
            .expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.site.domain, "news.example.com");
        assert_eq!(config.site.protocol, "http");
        assert_eq!(config.mount(), "/sitemaps");
        assert_eq!(config.publication.name, "The Example Times");
        assert_eq!(config.publication.language, "de");
        assert_eq!(config.publication.timezone, "+01:00");

        assert_eq!(config.feeds.len(), 2);
        let politics = &config.feeds[0];
        assert_eq!(politics.name, "politics");
        assert_eq!(politics.kind, FeedKind::News);
        assert_eq!(politics.page_size, 50);
        assert_eq!(politics.source, dir.path().join("politics.json"));
        assert_eq!(
            politics.fields.get("title").map(String::as_str),
            Some("headline_text")
        );
        assert_eq!(
            politics.constants.get("genres"),
            Some(&AttrValue::from("Blog, OpEd"))
        );

        let clips = &config.feeds[1];
        assert_eq!(clips.kind, FeedKind::Video);
        assert_eq!(clips.page_size, 1000);
        assert_eq!(clips.source, PathBuf::from("/data/clips.json"));
    }

    #[test]
    fn test_config_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("newsmap.toml");
        let minimal_config = r#"
[site]
domain = "example.com"

[publication]
name = "Example"
"#;
        std::fs::write(&config_path, minimal_config).expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.site.protocol, "https");
        assert_eq!(config.mount(), "");
        assert_eq!(config.publication.language, "en");
        assert_eq!(config.publication.timezone, "+00:00");
        assert!(config.feeds.is_empty());
    }

    #[test]
    fn test_config_validation_zero_page_size() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("newsmap.toml");
        let config_content = r#"
[site]
domain = "example.com"

[publication]
name = "Example"

[[feeds]]
name = "news"
kind = "news"
source = "news.json"
page_size = 0
"#;
        std::fs::write(&config_path, config_content).expect("write");

        let result = Config::load(&config_path);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("page_size must be greater than zero")
        );
    }

    #[test]
    fn test_config_validation_domain_with_scheme() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("newsmap.toml");
        let config_content = r#"
[site]
domain = "https://example.com"

[publication]
name = "Example"
"#;
        std::fs::write(&config_path, config_content).expect("write");

        let result = Config::load(&config_path);
        assert!(result.unwrap_err().to_string().contains("scheme"));
    }

    #[test]
    fn test_config_validation_relative_mount() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("newsmap.toml");
        let config_content = r#"
[site]
domain = "example.com"
mount = "sitemaps"

[publication]
name = "Example"
"#;
        std::fs::write(&config_path, config_content).expect("write");

        let result = Config::load(&config_path);
        assert!(result.unwrap_err().to_string().contains("must start with '/'"));
    }

    #[test]
    fn test_config_unknown_kind_rejected() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("newsmap.toml");
        let config_content = r#"
[site]
domain = "example.com"

[publication]
name = "Example"

[[feeds]]
name = "pics"
kind = "image"
source = "pics.json"
"#;
        std::fs::write(&config_path, config_content).expect("write");

        let result = Config::load(&config_path);
        assert!(result.unwrap_err().to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_load_with_env() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("newsmap.toml");
        std::fs::write(&config_path, create_test_config()).expect("write");

        let config = Config::load_with_env(&config_path).expect("load config");
        assert_eq!(config.feeds.len(), 2);
        assert_eq!(config.feeds[0].source, dir.path().join("politics.json"));
    }

    #[test]
    fn test_config_not_found() {
        let result = Config::load(Path::new("/nonexistent/newsmap.toml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }
}
