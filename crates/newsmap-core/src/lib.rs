//! newsmap Core Library
//!
//! Core types, configuration, and error handling for the newsmap Google News and
//! Google Video sitemap generator.

pub mod config;
pub mod content;
pub mod error;

pub use config::{Config, FeedConfig, FeedKind, PublicationConfig, SiteConfig};
pub use content::{AttrValue, Collection, ContentItem, Item, load_items};
pub use error::{CoreError, Result};
