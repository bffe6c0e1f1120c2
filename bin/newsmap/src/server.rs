//! HTTP surface for the sitemap index and section sitemaps.
//!
//! Routes, relative to the configured mount:
//!
//! - `GET /index.xml` - sitemap index
//! - `GET /{section}.xml?p=N` - one section
//! - `GET /` - every section in one document

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use newsmap_generator::{SitemapDispatcher, SitemapError};
use serde::Deserialize;

/// Query string of a sitemap request.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Raw page number, parsed by the dispatcher.
    pub p: Option<String>,
}

/// Error returned from handlers.
///
/// Not-found errors become 404, everything else 500.
#[derive(Debug)]
pub struct AppError(SitemapError);

impl From<SitemapError> for AppError {
    fn from(err: SitemapError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = if self.0.is_not_found() {
            tracing::debug!(error = %self.0, "sitemap not found");
            StatusCode::NOT_FOUND
        } else {
            tracing::error!(error = %self.0, "sitemap request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, self.0.to_string()).into_response()
    }
}

/// Create the sitemap router, mounted under the site's mount prefix.
pub fn create_router(dispatcher: Arc<SitemapDispatcher>) -> Router {
    let mount = dispatcher.site().mount.clone();

    Router::new()
        .route(&format!("{mount}/"), get(all_sections_handler))
        .route(&format!("{mount}/index.xml"), get(index_handler))
        .route(&format!("{mount}/{{file}}"), get(section_handler))
        .with_state(dispatcher)
}

fn xml_response(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/xml")], body).into_response()
}

async fn index_handler(
    State(dispatcher): State<Arc<SitemapDispatcher>>,
) -> Result<Response, AppError> {
    Ok(xml_response(dispatcher.index()?))
}

async fn section_handler(
    State(dispatcher): State<Arc<SitemapDispatcher>>,
    Path(file): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Response, AppError> {
    let section = file
        .strip_suffix(".xml")
        .ok_or_else(|| SitemapError::NotFound(format!("no sitemap at {file:?}")))?;

    Ok(xml_response(
        dispatcher.render(Some(section), query.p.as_deref())?,
    ))
}

async fn all_sections_handler(
    State(dispatcher): State<Arc<SitemapDispatcher>>,
    Query(query): Query<PageQuery>,
) -> Result<Response, AppError> {
    Ok(xml_response(dispatcher.render(None, query.p.as_deref())?))
}
