//! newsmap Generator Library
//!
//! Turns registered content feeds into Google News and Google Video sitemaps.
//!
//! # Modules
//!
//! - [`resolve`] - Attribute resolution with accessor/item/default precedence
//! - [`entry`] - Sitemap entry records and the base entry builder
//! - [`paginate`] - Page slicing over content collections
//! - [`feed`] - News and video feed definitions
//! - [`registry`] - Section name to feed registry
//! - [`index`] - Sitemap index assembly
//! - [`template`] - XML templates with variable interpolation
//! - [`render`] - Entry to XML conversion
//! - [`dispatch`] - Request-level orchestration
//! - [`validate`] - Consumer-side checks on produced entries

pub mod dispatch;
pub mod entry;
pub mod feed;
pub mod index;
pub mod paginate;
pub mod registry;
pub mod render;
pub mod resolve;
pub mod site;
pub mod template;
pub mod validate;

pub use dispatch::{SitemapDispatcher, SitemapError};
pub use entry::{EntryBuilder, EntryDetails, NewsDetails, SitemapEntry, VideoDetails};
pub use feed::{Access, Genre, NewsFeed, Sitemap, VideoFeed};
pub use index::build_index;
pub use paginate::{PageError, Paginator, parse_page};
pub use registry::{Registry, RegistryBuilder};
pub use resolve::{Accessors, Resolution, ResolvedFrom};
pub use site::{Publication, Site};
pub use template::{Template, TemplateContext, TemplateRegistry};
pub use validate::{EntryIssue, validate_entry};
