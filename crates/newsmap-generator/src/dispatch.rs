//! Request-level orchestration.
//!
//! Resolves a request to one or all registered feeds, fetches the requested
//! page of each and wraps the rendered fragments in a single document.

use newsmap_core::Config;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    feed::Sitemap,
    index::{build_index, render_index},
    paginate::{PageError, parse_page},
    registry::Registry,
    render::render_entry,
    site::{Publication, Site},
    template::{TemplateContext, TemplateError, TemplateRegistry},
};

/// Sitemap request errors.
#[derive(Debug, Error)]
pub enum SitemapError {
    /// Unknown section, or a page that does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Template rendering failed.
    #[error("render error: {0}")]
    Render(#[from] TemplateError),
}

impl SitemapError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<PageError> for SitemapError {
    fn from(err: PageError) -> Self {
        match err {
            PageError::InvalidPageNumber(raw) => Self::NotFound(format!("no page \"{raw}\"")),
            PageError::PageOutOfRange { page, .. } => Self::NotFound(format!("page {page} empty")),
        }
    }
}

/// Result type for dispatch operations.
pub type Result<T> = std::result::Result<T, SitemapError>;

/// Serves index and section documents from an immutable registry.
#[derive(Debug)]
pub struct SitemapDispatcher {
    registry: Registry,
    site: Site,
    publication: Publication,
    templates: TemplateRegistry,
}

impl SitemapDispatcher {
    /// Create a dispatcher using the default templates.
    #[must_use]
    pub fn new(registry: Registry, site: Site, publication: Publication) -> Self {
        Self {
            registry,
            site,
            publication,
            templates: TemplateRegistry::new(),
        }
    }

    /// Create a dispatcher from configuration, loading every feed source.
    pub fn from_config(config: &Config) -> newsmap_core::Result<Self> {
        Ok(Self::new(
            Registry::from_config(config)?,
            Site::from_config(config),
            Publication::from_config(config),
        ))
    }

    /// Replace the template registry.
    #[must_use]
    pub fn with_templates(mut self, templates: TemplateRegistry) -> Self {
        self.templates = templates;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    pub fn publication(&self) -> &Publication {
        &self.publication
    }

    /// URLs listed in the sitemap index.
    pub fn index_urls(&self) -> Vec<String> {
        build_index(&self.registry, &self.site)
    }

    /// Render the sitemap index document.
    pub fn index(&self) -> Result<String> {
        let urls = self.index_urls();
        info!(sitemaps = urls.len(), "rendering sitemap index");
        Ok(render_index(&self.templates, &urls)?)
    }

    /// Render a sitemap document from a raw `?p=` value, defaulting to page 1.
    pub fn render(&self, section: Option<&str>, page: Option<&str>) -> Result<String> {
        let page = match page {
            Some(raw) => parse_page(raw)?,
            None => 1,
        };
        self.render_page(section, page)
    }

    /// Render page `page` of `section`, or of every section when `None`.
    ///
    /// When rendering every section, the first failing feed aborts the whole
    /// document.
    pub fn render_page(&self, section: Option<&str>, page: i64) -> Result<String> {
        let feeds = self.select(section)?;

        let mut output = String::new();
        for (name, feed) in feeds {
            output.push_str(&self.render_feed(name, feed, page)?);
        }

        let ctx = TemplateContext::new().with_var("output", output);
        Ok(self.templates.render("header", &ctx)?)
    }

    fn select(&self, section: Option<&str>) -> Result<Vec<(&str, &dyn Sitemap)>> {
        match section {
            Some(section) => {
                let selected = self
                    .registry
                    .iter()
                    .find(|(name, _)| *name == section)
                    .ok_or_else(|| {
                        SitemapError::NotFound(format!(
                            "no sitemap available for section: {section:?}"
                        ))
                    })?;
                Ok(vec![selected])
            }
            None => Ok(self.registry.iter().collect()),
        }
    }

    fn render_feed(&self, section: &str, feed: &dyn Sitemap, page: i64) -> Result<String> {
        let mut fragment = String::new();
        let mut count = 0usize;

        for entry in feed.get_entries(&self.site, page)? {
            fragment.push_str(&render_entry(
                &self.templates,
                feed.template(),
                &entry,
                &self.publication,
            )?);
            count += 1;
        }

        info!(section, page, entries = count, kind = feed.kind().as_str(), "rendered feed");
        debug!(section, bytes = fragment.len(), "feed fragment size");
        Ok(fragment)
    }
}

#[cfg(test)]
mod tests {
    use newsmap_core::Item;

    use super::*;
    use crate::feed::{NewsFeed, VideoFeed};

    fn dispatcher() -> SitemapDispatcher {
        let articles: Vec<Item> = (1..=3)
            .map(|i| {
                Item::new()
                    .with("location", format!("/articles/{i}"))
                    .with("title", format!("Article {i}"))
            })
            .collect();
        let videos = vec![
            Item::new()
                .with("location", "/watch/1")
                .with("title", "Clip")
                .with("content_loc", "https://cdn.example.com/1.mp4"),
        ];

        let registry = Registry::builder()
            .register("articles", NewsFeed::new(articles).page_size(2))
            .register("videos", VideoFeed::new(videos))
            .build();

        SitemapDispatcher::new(
            registry,
            Site::new("https", "example.com"),
            Publication::new("Example Times", "en", "+00:00"),
        )
    }

    #[test]
    fn test_render_one_section() {
        let xml = dispatcher().render(Some("articles"), None).unwrap();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains("<loc>https://example.com/articles/1</loc>"));
        assert!(xml.contains("<loc>https://example.com/articles/2</loc>"));
        assert!(!xml.contains("/articles/3"));
        assert!(!xml.contains("<video:video>"));
        assert!(xml.contains("<news:name>Example Times</news:name>"));
        assert_eq!(xml.matches("<url>").count(), 2);
    }

    #[test]
    fn test_render_second_page() {
        let xml = dispatcher().render(Some("articles"), Some("2")).unwrap();
        assert!(xml.contains("<loc>https://example.com/articles/3</loc>"));
        assert_eq!(xml.matches("<url>").count(), 1);
    }

    #[test]
    fn test_render_all_sections() {
        let xml = dispatcher().render(None, None).unwrap();

        assert_eq!(xml.matches("<url>").count(), 3);
        assert!(xml.contains("<news:news>"));
        assert!(xml.contains("<video:content_loc>https://cdn.example.com/1.mp4</video:content_loc>"));
        assert_eq!(xml.matches("<urlset").count(), 1);
    }

    #[test]
    fn test_all_sections_fail_fast() {
        // videos only has one page
        let err = dispatcher().render(None, Some("2")).unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("page 2 empty"));
    }

    #[test]
    fn test_unknown_section_is_not_found() {
        let err = dispatcher().render(Some("sports"), None).unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("sports"));
    }

    #[test]
    fn test_bad_page_numbers_are_not_found() {
        let dispatcher = dispatcher();

        for raw in ["0", "-1", "abc", "3"] {
            let err = dispatcher.render(Some("articles"), Some(raw)).unwrap_err();
            assert!(err.is_not_found(), "page {raw} should be not found");
        }
    }

    #[test]
    fn test_index() {
        let dispatcher = dispatcher();

        assert_eq!(
            dispatcher.index_urls(),
            vec![
                "https://example.com/articles.xml",
                "https://example.com/articles.xml?p=2",
                "https://example.com/videos.xml",
            ]
        );

        let xml = dispatcher.index().unwrap();
        assert_eq!(xml.matches("<sitemap>").count(), 3);
    }

    #[test]
    fn test_custom_templates() {
        let mut templates = TemplateRegistry::new();
        templates.register(crate::template::Template::new("header", "[{{ output }}]"));
        templates.register(crate::template::Template::new("news_url", "({{ loc }})"));

        let xml = dispatcher()
            .with_templates(templates)
            .render(Some("articles"), None)
            .unwrap();
        assert_eq!(
            xml,
            "[(https://example.com/articles/1)(https://example.com/articles/2)]"
        );
    }

    #[test]
    fn test_missing_template_is_render_error() {
        let mut templates = TemplateRegistry::default();
        templates.register(crate::template::Template::new("header", "{{ output }}"));

        let err = dispatcher()
            .with_templates(templates)
            .render(Some("articles"), None)
            .unwrap_err();
        assert!(matches!(err, SitemapError::Render(TemplateError::NotFound(_))));
    }
}
