//! Page handlers.

use axum::{
    response::{Html, IntoResponse, Response},
    Extension,
};
use std::sync::Arc;

use crate::cms::{CmsError, PageContext, PageRequest};
use crate::http::response::{render_document, render_fragment};
use crate::http::state::CmsRuntime;

/// Render the page bound to this request.
///
/// Hybrid routes arrive with the page already set by the listener; the
/// slug route resolves its page here, by URL.
pub async fn page_handler(
    Extension(runtime): Extension<Arc<CmsRuntime>>,
    Extension(page_request): Extension<PageRequest>,
    Extension(mut context): Extension<PageContext>,
) -> Result<Response, CmsError> {
    if context.current_page().is_none()
        && page_request.route_name() == Some(runtime.listener.slug_route())
    {
        runtime.slug_resolver.resolve(&page_request, &mut context)?;
    }

    let Some(page) = context.current_page() else {
        return Err(CmsError::not_found(format!(
            "No route found for \"{}\"",
            page_request.path()
        )));
    };

    tracing::debug!(
        page_id = page.id,
        site_id = page.site_id,
        manager = ?context.manager(),
        "Rendering page"
    );

    let body = if page_request.is_xml_http_request() {
        render_fragment(page)
    } else {
        render_document(&context, page)
    };

    let mut response = Html(body).into_response();
    if let Some(kind) = context.manager() {
        response.extensions_mut().insert(kind);
    }
    Ok(response)
}

pub async fn health() -> &'static str {
    "ok"
}
