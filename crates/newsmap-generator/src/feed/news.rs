//! Google News feed.

use std::{fmt, str::FromStr};

use newsmap_core::{AttrValue, Collection, ContentItem, FeedKind};

use super::{Entries, FeedSource, Sitemap, feed_builder};
use crate::{
    entry::{EntryBuilder, EntryDetails, NewsDetails},
    paginate::Result,
    site::Site,
};

/// Google News content label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Genre {
    /// An official press release. The default.
    PressRelease,
    /// Ridicules its subject for didactic purposes.
    Satire,
    /// Published on a blog or in a blog format.
    Blog,
    /// Opinion piece from the Op-Ed section.
    OpEd,
    /// Any other opinion-based article (reviews, interviews).
    Opinion,
    /// Editorially reviewed user-generated content.
    UserGenerated,
}

impl Genre {
    pub const ALL: [Genre; 6] = [
        Self::PressRelease,
        Self::Satire,
        Self::Blog,
        Self::OpEd,
        Self::Opinion,
        Self::UserGenerated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PressRelease => "PressRelease",
            Self::Satire => "Satire",
            Self::Blog => "Blog",
            Self::OpEd => "OpEd",
            Self::Opinion => "Opinion",
            Self::UserGenerated => "UserGenerated",
        }
    }

    /// Comma-join a set of genres, e.g. `"Blog, OpEd"`.
    pub fn join(genres: &[Genre]) -> String {
        genres
            .iter()
            .map(Genre::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|genre| genre.as_str() == s.trim())
            .ok_or_else(|| format!("unknown genre: {s}"))
    }
}

impl From<Genre> for AttrValue {
    fn from(genre: Genre) -> Self {
        AttrValue::from(genre.as_str())
    }
}

/// Access restriction of an article. No restriction is expressed as no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Readers must pay to view the content.
    Subscription,
    /// Readers must sign up for an unpaid account.
    Registration,
}

impl Access {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Subscription => "Subscription",
            Self::Registration => "Registration",
        }
    }
}

impl From<Access> for AttrValue {
    fn from(access: Access) -> Self {
        AttrValue::from(access.as_str())
    }
}

/// Google News sitemap feed.
pub struct NewsFeed<C: Collection> {
    source: FeedSource<C>,
}

feed_builder!(NewsFeed);

impl<C: Collection> NewsFeed<C> {
    fn news_details(builder: &EntryBuilder<'_, C::Item>, item: &C::Item) -> NewsDetails {
        let accessors = builder.accessors();
        NewsDetails {
            title: builder.title(item),
            access: builder.get("access", item),
            keywords: builder.keywords(item),
            genres: accessors.resolve("genres", item, Some(Genre::PressRelease.into())),
            stock_tickers: builder.get("stock_tickers", item),
        }
    }
}

impl<C: Collection> fmt::Debug for NewsFeed<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsFeed")
            .field("source", &self.source)
            .finish()
    }
}

impl<C: Collection> Sitemap for NewsFeed<C> {
    fn kind(&self) -> FeedKind {
        FeedKind::News
    }

    fn template(&self) -> &'static str {
        "news_url"
    }

    fn num_pages(&self) -> usize {
        self.source.paginator().num_pages()
    }

    fn get_entries<'a>(&'a self, site: &'a Site, page: i64) -> Result<Entries<'a>> {
        let items = self.source.paginator().page(page)?;
        let builder = EntryBuilder::new(site, &self.source.accessors);

        Ok(Box::new(items.into_iter().map(move |item| {
            let details = Self::news_details(&builder, &item);
            builder
                .build_base_entry(&item)
                .with_details(EntryDetails::News(details))
        })))
    }
}
