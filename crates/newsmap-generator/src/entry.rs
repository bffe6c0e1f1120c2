//! Sitemap entry records.
//!
//! Every item in a feed becomes one [`SitemapEntry`]: an absolute location plus
//! the optional base fields shared by all sitemaps and the feed-specific
//! [`EntryDetails`].

use newsmap_core::{AttrValue, ContentItem};
use tracing::debug;

use crate::{
    resolve::{Accessors, first_present},
    site::Site,
};

/// Attributes tried, in order, when resolving a title.
pub const TITLE_ATTRIBUTES: [&str; 3] = ["title", "name", "headline"];

/// Attributes tried, in order, when resolving keywords.
pub const KEYWORD_ATTRIBUTES: [&str; 2] = ["keywords", "tags"];

/// One URL record in a sitemap.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    /// Absolute URL of the item. Always present.
    pub location: String,
    pub lastmod: Option<AttrValue>,
    pub changefreq: Option<AttrValue>,
    pub priority: Option<AttrValue>,
    pub details: EntryDetails,
}

impl SitemapEntry {
    /// Replace the feed-specific details.
    #[must_use]
    pub fn with_details(mut self, details: EntryDetails) -> Self {
        self.details = details;
        self
    }

    pub fn news(&self) -> Option<&NewsDetails> {
        match &self.details {
            EntryDetails::News(news) => Some(news),
            _ => None,
        }
    }

    pub fn video(&self) -> Option<&VideoDetails> {
        match &self.details {
            EntryDetails::Video(video) => Some(video),
            _ => None,
        }
    }
}

/// Feed-specific entry fields.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryDetails {
    /// Only the base fields.
    Base,
    News(NewsDetails),
    Video(VideoDetails),
}

/// Google News fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewsDetails {
    pub title: Option<AttrValue>,
    /// `Subscription` or `Registration`; absent means freely accessible.
    pub access: Option<AttrValue>,
    pub keywords: Option<AttrValue>,
    pub genres: Option<AttrValue>,
    /// Up to five `EXCHANGE:TICKER` pairs.
    pub stock_tickers: Option<AttrValue>,
}

/// Google Video fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoDetails {
    pub title: Option<AttrValue>,
    pub description: Option<AttrValue>,
    pub keywords: Option<AttrValue>,
    pub genres: Option<AttrValue>,
    pub categories: Option<AttrValue>,
    pub thumbnail_loc: Option<AttrValue>,
    /// Direct URL of the video file.
    pub content_loc: Option<AttrValue>,
    /// URL of an embeddable player.
    pub player_loc: Option<AttrValue>,
    pub publication_date: Option<AttrValue>,
    pub duration: Option<AttrValue>,
}

/// Builds the base part of an entry for each item.
#[derive(Debug)]
pub struct EntryBuilder<'a, T> {
    site: &'a Site,
    accessors: &'a Accessors<T>,
}

impl<'a, T: ContentItem> EntryBuilder<'a, T> {
    pub fn new(site: &'a Site, accessors: &'a Accessors<T>) -> Self {
        Self { site, accessors }
    }

    pub fn accessors(&self) -> &'a Accessors<T> {
        self.accessors
    }

    /// Resolve a field through the feed's accessors.
    pub fn get(&self, field: &str, item: &T) -> Option<AttrValue> {
        self.accessors.resolve(field, item, None)
    }

    /// Resolve a time field, dropping sub-second precision. Text is parsed as a
    /// timestamp here and kept as text when it does not parse.
    pub fn get_time(&self, field: &str, item: &T) -> Option<AttrValue> {
        self.get(field, item)
            .map(|value| value.into_timestamp().truncate_subsecs())
    }

    /// Location, lastmod, changefreq and priority for `item`.
    pub fn build_base_entry(&self, item: &T) -> SitemapEntry {
        let path = match self.get("location", item) {
            Some(path) => path.to_string(),
            None => {
                debug!("item has no location, using site root");
                String::new()
            }
        };

        SitemapEntry {
            location: self.site.absolute_url(&path),
            lastmod: self.get_time("lastmod", item),
            changefreq: self.get("changefreq", item),
            priority: self.get("priority", item),
            details: EntryDetails::Base,
        }
    }

    /// Title: accessor, then `title`, `name`, `headline`.
    pub fn title(&self, item: &T) -> Option<AttrValue> {
        self.accessors
            .resolve_with("title", item, |item| first_present(item, &TITLE_ATTRIBUTES[1..]))
            .value
    }

    /// Keywords: accessor, then `keywords`, `tags`.
    pub fn keywords(&self, item: &T) -> Option<AttrValue> {
        self.accessors
            .resolve_with("keywords", item, |item| {
                first_present(item, &KEYWORD_ATTRIBUTES[1..])
            })
            .value
    }
}
