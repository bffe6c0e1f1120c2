//! Section name to feed registry.
//!
//! Built once at startup and read-only afterwards. Registering a section name
//! twice replaces the earlier feed in place, keeping its original position.

use newsmap_core::{Config, FeedKind, load_items};
use tracing::{info, warn};

use crate::feed::{NewsFeed, Sitemap, VideoFeed};

/// Immutable mapping from section name to feed, in registration order.
#[derive(Debug, Default)]
pub struct Registry {
    feeds: Vec<(String, Box<dyn Sitemap>)>,
}

impl Registry {
    /// Start building a registry.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Build a registry from the configured feeds, loading each feed's items.
    pub fn from_config(config: &Config) -> newsmap_core::Result<Self> {
        let mut builder = Self::builder();
        for feed in &config.feeds {
            let items = load_items(&feed.source)?;
            info!(section = %feed.name, kind = feed.kind.as_str(), items = items.len(), "registering feed");
            builder = match feed.kind {
                FeedKind::News => builder.register(&feed.name, NewsFeed::new(items).configure(feed)),
                FeedKind::Video => builder.register(&feed.name, VideoFeed::new(items).configure(feed)),
            };
        }
        Ok(builder.build())
    }

    /// Feed registered under `section`.
    pub fn get(&self, section: &str) -> Option<&dyn Sitemap> {
        self.feeds
            .iter()
            .find(|(name, _)| name == section)
            .map(|(_, feed)| feed.as_ref())
    }

    /// Whether `section` is registered.
    pub fn contains(&self, section: &str) -> bool {
        self.get(section).is_some()
    }

    /// All sections with their feeds, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Sitemap)> {
        self.feeds
            .iter()
            .map(|(name, feed)| (name.as_str(), feed.as_ref()))
    }

    /// Registered section names.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.feeds.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }
}

/// Collects feeds before the registry is frozen.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    feeds: Vec<(String, Box<dyn Sitemap>)>,
}

impl RegistryBuilder {
    /// Register `feed` under `section`. The last registration of a name wins.
    #[must_use]
    pub fn register(mut self, section: impl Into<String>, feed: impl Sitemap + 'static) -> Self {
        let section = section.into();
        let feed: Box<dyn Sitemap> = Box::new(feed);

        if let Some(slot) = self.feeds.iter_mut().find(|(name, _)| *name == section) {
            warn!(%section, "replacing previously registered feed");
            slot.1 = feed;
        } else {
            self.feeds.push((section, feed));
        }
        self
    }

    /// Freeze the registry.
    #[must_use]
    pub fn build(self) -> Registry {
        Registry { feeds: self.feeds }
    }
}
