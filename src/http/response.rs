//! Response handling: error mapping and page rendering.
//!
//! # Design Decisions
//! - `Internal` → 500, `PageNotFound` → 404, body is the error message
//! - Errors are logged here, not where they are raised
//! - XHR requests get the page fragment without the document shell

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::cms::{CmsError, Page, PageContext};
use crate::seo::escape_html;

impl CmsError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CmsError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CmsError::PageNotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for CmsError {
    fn into_response(self) -> Response {
        match &self {
            CmsError::Internal(message) => tracing::error!(error = %message, "CMS request failed"),
            CmsError::PageNotFound(message) => tracing::warn!(error = %message, "CMS page not found"),
        }
        (self.status_code(), self.to_string()).into_response()
    }
}

/// Page content without the surrounding document.
pub fn render_fragment(page: &Page) -> String {
    format!(
        "<h1>{}</h1>\n{}",
        escape_html(&page.name),
        page.body.as_deref().unwrap_or_default()
    )
}

/// Full HTML document for the current page, with the collected SEO head.
pub fn render_document(context: &PageContext, page: &Page) -> String {
    let seo = &context.seo;
    let attributes = seo.render_html_attributes();
    let html_tag = if attributes.is_empty() {
        "<html>".to_string()
    } else {
        format!("<html {}>", attributes)
    };

    format!(
        "<!DOCTYPE html>\n{}\n<head>\n{}\n{}</head>\n<body>\n{}\n</body>\n</html>\n",
        html_tag,
        seo.render_title(),
        seo.render_metadatas(),
        render_fragment(page)
    )
}
