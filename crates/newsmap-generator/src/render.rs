//! Entry to XML conversion.
//!
//! Builds the template context for one entry. Optional elements are rendered
//! here, already escaped and indented, so templates only interpolate them.

use newsmap_core::AttrValue;

use crate::{
    entry::{EntryDetails, SitemapEntry},
    site::Publication,
    template::{Result, TemplateContext, TemplateRegistry},
};

const URL_INDENT: &str = "    ";
const DETAIL_INDENT: &str = "      ";

/// Render one entry with the named template.
pub fn render_entry(
    templates: &TemplateRegistry,
    template: &str,
    entry: &SitemapEntry,
    publication: &Publication,
) -> Result<String> {
    templates.render(template, &entry_context(entry, publication))
}

/// Template context for one entry.
pub fn entry_context(entry: &SitemapEntry, publication: &Publication) -> TemplateContext {
    let tz = publication.timezone.as_str();
    let mut ctx = TemplateContext::new().with_var("loc", escape_xml(&entry.location));

    ctx.insert_opt(
        "lastmod",
        entry
            .lastmod
            .as_ref()
            .and_then(|v| w3c_datetime(v, tz))
            .map(|text| element(URL_INDENT, "lastmod", &text)),
    );
    ctx.insert_opt(
        "changefreq",
        text_element(URL_INDENT, "changefreq", entry.changefreq.as_ref()),
    );
    ctx.insert_opt(
        "priority",
        text_element(URL_INDENT, "priority", entry.priority.as_ref()),
    );

    match &entry.details {
        EntryDetails::Base => {}
        EntryDetails::News(news) => {
            ctx.insert("publication_name", escape_xml(&publication.name));
            ctx.insert("publication_language", escape_xml(&publication.language));
            ctx.insert_opt(
                "access",
                text_element(DETAIL_INDENT, "news:access", news.access.as_ref()),
            );
            ctx.insert_opt(
                "genres",
                joined_element(DETAIL_INDENT, "news:genres", news.genres.as_ref()),
            );
            ctx.insert_opt(
                "publication_date",
                entry
                    .lastmod
                    .as_ref()
                    .and_then(|v| w3c_datetime(v, tz))
                    .map(|text| element(DETAIL_INDENT, "news:publication_date", &text)),
            );
            ctx.insert_opt(
                "title",
                text_element(DETAIL_INDENT, "news:title", news.title.as_ref()),
            );
            ctx.insert_opt(
                "keywords",
                joined_element(DETAIL_INDENT, "news:keywords", news.keywords.as_ref()),
            );
            ctx.insert_opt(
                "stock_tickers",
                joined_element(DETAIL_INDENT, "news:stock_tickers", news.stock_tickers.as_ref()),
            );
        }
        EntryDetails::Video(video) => {
            ctx.insert_opt(
                "thumbnail_loc",
                text_element(DETAIL_INDENT, "video:thumbnail_loc", video.thumbnail_loc.as_ref()),
            );
            ctx.insert_opt(
                "title",
                text_element(DETAIL_INDENT, "video:title", video.title.as_ref()),
            );
            ctx.insert_opt(
                "description",
                text_element(DETAIL_INDENT, "video:description", video.description.as_ref()),
            );
            ctx.insert_opt(
                "content_loc",
                text_element(DETAIL_INDENT, "video:content_loc", video.content_loc.as_ref()),
            );
            ctx.insert_opt(
                "player_loc",
                text_element(DETAIL_INDENT, "video:player_loc", video.player_loc.as_ref()),
            );
            ctx.insert_opt(
                "duration",
                text_element(DETAIL_INDENT, "video:duration", video.duration.as_ref()),
            );
            ctx.insert_opt(
                "publication_date",
                video
                    .publication_date
                    .as_ref()
                    .and_then(|v| w3c_datetime(v, tz))
                    .map(|text| element(DETAIL_INDENT, "video:publication_date", &text)),
            );
            ctx.insert_opt(
                "tags",
                repeated_elements(DETAIL_INDENT, "video:tag", video.keywords.as_ref()),
            );
            ctx.insert_opt(
                "categories",
                repeated_elements(DETAIL_INDENT, "video:category", video.categories.as_ref()),
            );
        }
    }

    ctx
}

/// Format a timestamp in W3C datetime form.
///
/// Values without an offset get the publication timezone appended; dates and
/// non-time values are written as-is. A bare time of day has no W3C form and
/// gives `None`, so the element is left out.
pub fn w3c_datetime(value: &AttrValue, timezone: &str) -> Option<String> {
    match value {
        AttrValue::DateTime(dt) => Some(dt.format("%Y-%m-%dT%H:%M:%S%:z").to_string()),
        AttrValue::LocalDateTime(dt) => {
            Some(format!("{}{timezone}", dt.format("%Y-%m-%dT%H:%M:%S")))
        }
        AttrValue::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
        AttrValue::Time(t) => {
            tracing::debug!(time = %t, "time of day without a date, element omitted");
            None
        }
        other => Some(other.to_string()),
    }
}

fn element(indent: &str, tag: &str, text: &str) -> String {
    format!("\n{indent}<{tag}>{}</{tag}>", escape_xml(text))
}

fn text_element(indent: &str, tag: &str, value: Option<&AttrValue>) -> Option<String> {
    value.map(|v| element(indent, tag, &v.to_string()))
}

fn joined_element(indent: &str, tag: &str, value: Option<&AttrValue>) -> Option<String> {
    let items = value?.to_list();
    if items.is_empty() {
        return None;
    }
    Some(element(indent, tag, &items.join(", ")))
}

fn repeated_elements(indent: &str, tag: &str, value: Option<&AttrValue>) -> Option<String> {
    let items = value?.to_list();
    if items.is_empty() {
        return None;
    }
    Some(items.iter().map(|item| element(indent, tag, item)).collect())
}

/// Escape special XML characters.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
