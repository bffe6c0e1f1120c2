//! Placeholder templates for sitemap XML.
//!
//! A template is a fixed XML skeleton with `{{ name }}` slots. Slot values are
//! inserted verbatim: they must already be escaped XML. Optional elements such
//! as `<lastmod>` are built as complete fragments by [`crate::render`] and fill
//! a `{{ name? }}` slot, which collapses to nothing when the fragment is absent.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    /// A required `{{ name }}` slot had no fragment.
    #[error("missing required variable: {0}")]
    MissingVariable(String),

    #[error("template not found: {0}")]
    NotFound(String),

    /// A `{{` with no closing `}}`.
    #[error("invalid template syntax: {0}")]
    InvalidSyntax(String),
}

pub type Result<T> = std::result::Result<T, TemplateError>;

/// Escaped XML fragments keyed by slot name.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    variables: HashMap<String, String>,
}

impl TemplateContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a slot. `value` is inserted as-is, so escape text before passing it.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Set a slot when the element exists; otherwise an optional slot renders empty.
    pub fn insert_opt(&mut self, key: impl Into<String>, value: Option<String>) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }
}

/// An XML skeleton with `{{ name }}` slots.
///
/// A trailing `?` marks an optional element slot: `{{ lastmod? }}` disappears
/// when the context has no `lastmod` fragment, while a missing required slot is
/// an error.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    content: String,
}

impl Template {
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fill every slot from `context`.
    ///
    /// Scanning resumes after each inserted fragment, so braces inside item text
    /// are never read as slots.
    pub fn render(&self, context: &TemplateContext) -> Result<String> {
        let mut out = String::with_capacity(self.content.len());
        let mut rest = self.content.as_str();

        while let Some(open) = rest.find("{{") {
            out.push_str(&rest[..open]);
            let slot = &rest[open + 2..];
            let close = slot
                .find("}}")
                .ok_or_else(|| TemplateError::InvalidSyntax("unclosed {{ delimiter".to_string()))?;

            let (name, optional) = match slot[..close].trim() {
                name if name.ends_with('?') => (name.trim_end_matches('?').trim_end(), true),
                name => (name, false),
            };

            match context.get(name) {
                Some(fragment) => out.push_str(fragment),
                None if optional => {}
                None => return Err(TemplateError::MissingVariable(name.to_string())),
            }

            rest = &slot[close + 2..];
        }

        out.push_str(rest);
        Ok(out)
    }
}

/// Named templates for the sitemap document, the index and the url elements.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, Template>,
}

impl TemplateRegistry {
    /// Registry holding the built-in `header`, `news_url`, `video_url` and `index`
    /// templates.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register_defaults();
        registry
    }

    fn register_defaults(&mut self) {
        self.register(Template::new("header", DEFAULT_HEADER_TEMPLATE));
        self.register(Template::new("news_url", DEFAULT_NEWS_URL_TEMPLATE));
        self.register(Template::new("video_url", DEFAULT_VIDEO_URL_TEMPLATE));
        self.register(Template::new("index", DEFAULT_INDEX_TEMPLATE));
    }

    /// Add a template, replacing a built-in one with the same name.
    pub fn register(&mut self, template: Template) {
        self.templates.insert(template.name.clone(), template);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Render the template `name`, which must be registered.
    pub fn render(&self, name: &str, context: &TemplateContext) -> Result<String> {
        let template = self
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;
        template.render(context)
    }
}

/// Document wrapper around all rendered feed fragments.
pub const DEFAULT_HEADER_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
        xmlns:news="http://www.google.com/schemas/sitemap-news/0.9"
        xmlns:video="http://www.google.com/schemas/sitemap-video/1.1">
{{ output }}</urlset>
"#;

/// One Google News `<url>` element.
pub const DEFAULT_NEWS_URL_TEMPLATE: &str = r#"  <url>
    <loc>{{ loc }}</loc>{{ lastmod? }}{{ changefreq? }}{{ priority? }}
    <news:news>
      <news:publication>
        <news:name>{{ publication_name }}</news:name>
        <news:language>{{ publication_language }}</news:language>
      </news:publication>{{ access? }}{{ genres? }}{{ publication_date? }}{{ title? }}{{ keywords? }}{{ stock_tickers? }}
    </news:news>
  </url>
"#;

/// One Google Video `<url>` element.
pub const DEFAULT_VIDEO_URL_TEMPLATE: &str = r#"  <url>
    <loc>{{ loc }}</loc>{{ lastmod? }}{{ changefreq? }}{{ priority? }}
    <video:video>{{ thumbnail_loc? }}{{ title? }}{{ description? }}{{ content_loc? }}{{ player_loc? }}{{ duration? }}{{ publication_date? }}{{ tags? }}{{ categories? }}
    </video:video>
  </url>
"#;

/// Sitemap index listing every feed page.
pub const DEFAULT_INDEX_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{{ sitemaps }}</sitemapindex>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_simple_render() {
        let template = Template::new("test", "<loc>{{ loc }}</loc>");
        let mut ctx = TemplateContext::new();
        ctx.insert("loc", "https://example.com/");

        let result = template.render(&ctx).unwrap();
        assert_eq!(result, "<loc>https://example.com/</loc>");
    }

    #[test]
    fn test_template_multiple_variables() {
        let template = Template::new("test", "{{ name }} ({{ language }}, {{ timezone }})");
        let ctx = TemplateContext::new()
            .with_var("name", "Daily")
            .with_var("language", "en")
            .with_var("timezone", "+00:00");

        let result = template.render(&ctx).unwrap();
        assert_eq!(result, "Daily (en, +00:00)");
        assert_eq!(template.name(), "test");
    }

    #[test]
    fn test_template_optional_variable() {
        let template = Template::new("test", "<url>{{ lastmod? }}</url>");
        let ctx = TemplateContext::new();

        let result = template.render(&ctx).unwrap();
        assert_eq!(result, "<url></url>");

        let mut ctx = TemplateContext::new();
        ctx.insert_opt("lastmod", Some("<lastmod>2024-01-01</lastmod>".to_string()));
        ctx.insert_opt("ignored", None);
        assert!(!ctx.contains("ignored"));
        let result = template.render(&ctx).unwrap();
        assert_eq!(result, "<url><lastmod>2024-01-01</lastmod></url>");
    }

    #[test]
    fn test_interpolated_values_are_not_expanded() {
        let template = Template::new("test", "{{ a }}{{ b }}");
        let ctx = TemplateContext::new()
            .with_var("a", "{{ b }}")
            .with_var("b", "!");

        assert_eq!(template.render(&ctx).unwrap(), "{{ b }}!");
    }

    #[test]
    fn test_fragment_with_open_braces() {
        let template = Template::new("test", "<news:title>{{ title }}</news:title>{{ keywords? }}");
        let ctx = TemplateContext::new().with_var("title", "Weekly {{ recap");

        assert_eq!(
            template.render(&ctx).unwrap(),
            "<news:title>Weekly {{ recap</news:title>"
        );
    }

    #[test]
    fn test_template_missing_required_variable() {
        let template = Template::new("test", "<loc>{{ loc }}</loc>");
        let ctx = TemplateContext::new();

        let result = template.render(&ctx);
        assert!(matches!(result, Err(TemplateError::MissingVariable(_))));
    }

    #[test]
    fn test_template_unclosed_delimiter() {
        let template = Template::new("test", "<loc>{{ loc</loc>");
        let result = template.render(&TemplateContext::new());
        assert!(matches!(result, Err(TemplateError::InvalidSyntax(_))));
    }

    #[test]
    fn test_template_registry() {
        let registry = TemplateRegistry::new();

        assert!(registry.get("header").is_some());
        assert!(registry.get("news_url").is_some());
        assert!(registry.get("video_url").is_some());
        assert!(registry.get("index").is_some());
        assert!(registry.get("nonexistent").is_none());
        assert!(matches!(
            registry.render("nonexistent", &TemplateContext::new()),
            Err(TemplateError::NotFound(_))
        ));
    }

    #[test]
    fn test_render_header_template() {
        let registry = TemplateRegistry::new();
        let ctx = TemplateContext::new().with_var("output", "  <url/>\n");

        let result = registry.render("header", &ctx).unwrap();
        assert!(result.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(result.contains("xmlns:news="));
        assert!(result.contains("xmlns:video="));
        assert!(result.contains("  <url/>\n</urlset>"));
    }

    #[test]
    fn test_override_template() {
        let mut registry = TemplateRegistry::new();
        registry.register(Template::new("index", "{{ sitemaps }}"));

        let ctx = TemplateContext::new().with_var("sitemaps", "x");
        assert_eq!(registry.render("index", &ctx).unwrap(), "x");
    }
}
