//! Sitemap index assembly.

use tracing::debug;

use crate::{
    registry::Registry,
    render::escape_xml,
    site::Site,
    template::{Result, TemplateContext, TemplateRegistry},
};

/// Absolute URLs of every feed page, in registry order.
///
/// Each feed contributes its bare URL, followed by `?p=N` URLs for pages
/// 2 through its last page.
pub fn build_index(registry: &Registry, site: &Site) -> Vec<String> {
    let mut urls = Vec::new();

    for (section, feed) in registry.iter() {
        let pages = feed.num_pages();
        let url = site.absolute_url(&site.sitemap_path(section));
        debug!(section, pages, "indexing feed");

        urls.push(url.clone());
        urls.extend((2..=pages).map(|page| format!("{url}?p={page}")));
    }

    urls
}

/// Render the index document for a list of sitemap URLs.
pub fn render_index(templates: &TemplateRegistry, urls: &[String]) -> Result<String> {
    let sitemaps: String = urls
        .iter()
        .map(|url| format!("  <sitemap>\n    <loc>{}</loc>\n  </sitemap>\n", escape_xml(url)))
        .collect();

    templates.render("index", &TemplateContext::new().with_var("sitemaps", sitemaps))
}
