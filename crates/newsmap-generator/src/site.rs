//! Site and publication context shared by every render pass.

use newsmap_core::Config;

/// Current site: scheme, domain and the prefix the sitemap routes live under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    pub protocol: String,
    pub domain: String,
    pub mount: String,
}

impl Site {
    /// Create a site with routes mounted at the root.
    pub fn new(protocol: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            domain: domain.into(),
            mount: String::new(),
        }
    }

    /// Mount the sitemap routes under `mount`.
    #[must_use]
    pub fn with_mount(mut self, mount: impl Into<String>) -> Self {
        self.mount = mount.into().trim_end_matches('/').to_string();
        self
    }

    /// Build from the site section of the configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.site.protocol, &config.site.domain).with_mount(config.mount())
    }

    /// Domain used for absolute URLs.
    pub fn current_domain(&self) -> &str {
        &self.domain
    }

    /// Absolute URL for a site-relative path. A missing leading `/` is added;
    /// an empty path gives the bare site root.
    pub fn absolute_url(&self, path: &str) -> String {
        let sep = if path.is_empty() || path.starts_with('/') {
            ""
        } else {
            "/"
        };
        format!("{}://{}{sep}{path}", self.protocol, self.domain)
    }

    /// Path of the sitemap for `section`.
    pub fn sitemap_path(&self, section: &str) -> String {
        format!("{}/{section}.xml", self.mount)
    }

    /// Path of the sitemap index.
    pub fn index_path(&self) -> String {
        format!("{}/index.xml", self.mount)
    }
}

/// Publication metadata applied to every rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    pub name: String,
    pub language: String,
    pub timezone: String,
}

impl Publication {
    pub fn new(
        name: impl Into<String>,
        language: impl Into<String>,
        timezone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            language: language.into(),
            timezone: timezone.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.publication.name,
            &config.publication.language,
            &config.publication.timezone,
        )
    }
}
