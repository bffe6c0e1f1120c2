//! Sitemap feeds.
//!
//! A feed owns a content [`Collection`], a page size and a table of accessors.
//! [`NewsFeed`] and [`VideoFeed`] add their own fields on top of the base entry.

mod news;
mod video;

use std::fmt;

pub use news::{Access, Genre, NewsFeed};
use newsmap_core::{AttrValue, Collection, FeedKind};
pub use video::VideoFeed;

use crate::{
    entry::SitemapEntry,
    paginate::{Paginator, Result},
    resolve::Accessors,
    site::Site,
};

/// Default number of entries per sitemap page.
///
/// Google News accepts at most 1,000 URLs per sitemap.
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// Lazily evaluated entries of one page.
pub type Entries<'a> = Box<dyn Iterator<Item = SitemapEntry> + 'a>;

/// A registered sitemap feed.
pub trait Sitemap: Send + Sync + fmt::Debug {
    /// Kind of sitemap this feed produces.
    fn kind(&self) -> FeedKind;

    /// Template used to render one entry.
    fn template(&self) -> &'static str;

    /// Number of pages in the source collection.
    fn num_pages(&self) -> usize;

    /// Entries for the 1-based page `page`.
    ///
    /// The page slice is fetched from the collection on every call; entries are
    /// built as the iterator is consumed.
    fn get_entries<'a>(&'a self, site: &'a Site, page: i64) -> Result<Entries<'a>>;
}

/// Collection, page size and accessors shared by every feed kind.
pub(crate) struct FeedSource<C: Collection> {
    pub(crate) collection: C,
    pub(crate) page_size: usize,
    pub(crate) accessors: Accessors<C::Item>,
}

impl<C: Collection> FeedSource<C> {
    pub(crate) fn new(collection: C) -> Self {
        Self {
            collection,
            page_size: DEFAULT_PAGE_SIZE,
            accessors: Accessors::new(),
        }
    }

    pub(crate) fn paginator(&self) -> Paginator<'_, C> {
        Paginator::new(&self.collection, self.page_size)
    }

    pub(crate) fn insert<F>(&mut self, field: impl Into<String>, accessor: F)
    where
        F: Fn(&C::Item) -> Option<AttrValue> + Send + Sync + 'static,
    {
        self.accessors.insert(field, accessor);
    }
}

impl<C: Collection> fmt::Debug for FeedSource<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedSource")
            .field("items", &self.collection.count())
            .field("page_size", &self.page_size)
            .field("accessors", &self.accessors)
            .finish()
    }
}

/// Builder methods shared by [`NewsFeed`] and [`VideoFeed`].
macro_rules! feed_builder {
    ($feed:ident) => {
        impl<C: Collection> $feed<C> {
            /// Create a feed over `collection` with the default page size.
            pub fn new(collection: C) -> Self {
                Self {
                    source: FeedSource::new(collection),
                }
            }

            /// Set the number of entries per page. Zero is treated as one.
            #[must_use]
            pub fn page_size(mut self, page_size: usize) -> Self {
                self.source.page_size = page_size.max(1);
                self
            }

            /// Register an accessor computing `field` for each item.
            #[must_use]
            pub fn accessor<F>(mut self, field: impl Into<String>, accessor: F) -> Self
            where
                F: Fn(&C::Item) -> Option<AttrValue> + Send + Sync + 'static,
            {
                self.source.insert(field, accessor);
                self
            }

            /// Use the same value for `field` on every item.
            #[must_use]
            pub fn constant(self, field: impl Into<String>, value: impl Into<AttrValue>) -> Self {
                let value = value.into();
                self.accessor(field, move |_| Some(value.clone()))
            }

            /// Read `field` from the item attribute named `attribute`.
            #[must_use]
            pub fn field_from(self, field: impl Into<String>, attribute: impl Into<String>) -> Self {
                let attribute = attribute.into();
                self.accessor(field, move |item| item.attribute(&attribute))
            }

            /// Apply the page size, field mappings and constants of a configured feed.
            ///
            /// Constants are applied after field mappings and win on conflict.
            #[must_use]
            pub fn configure(mut self, config: &newsmap_core::FeedConfig) -> Self {
                self = self.page_size(config.page_size);
                for (field, attribute) in &config.fields {
                    self = self.field_from(field.clone(), attribute.clone());
                }
                for (field, value) in &config.constants {
                    if config.fields.contains_key(field) {
                        tracing::warn!(section = %config.name, %field, "constant overrides field mapping");
                    }
                    self = self.constant(field.clone(), value.clone());
                }
                self
            }
        }
    };
}

pub(crate) use feed_builder;
