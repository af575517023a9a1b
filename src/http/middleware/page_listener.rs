//! Page Listener Middleware.
//! Runs the CMS request listener before page handlers.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Instant;

use crate::cms::{ManagerKind, PageContext};
use crate::http::request::{page_request, request_id};
use crate::http::state::AppState;
use crate::observability::metrics;
use crate::seo::SeoPage;

pub async fn page_listener_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let runtime = state.runtime();

    let page_request = page_request(&request, &runtime.routes);
    let mut context = PageContext::new(SeoPage::from_config(&runtime.config.seo));

    tracing::debug!(
        request_id = %request_id(&request),
        host = %page_request.host(),
        path = %page_request.path(),
        route = ?page_request.route_name(),
        "Resolving CMS page"
    );

    if let Err(e) = runtime.listener.on_request(&page_request, &mut context) {
        metrics::record_request(e.kind(), "none", start);
        return e.into_response();
    }

    request.extensions_mut().insert(runtime);
    request.extensions_mut().insert(page_request);
    request.extensions_mut().insert(context);

    let response = next.run(request).await;

    let outcome = match response.status() {
        StatusCode::OK => "page",
        StatusCode::NOT_FOUND => "not_found",
        s if s.is_server_error() => "internal",
        _ => "other",
    };
    let manager = response
        .extensions()
        .get::<ManagerKind>()
        .map(ManagerKind::as_str)
        .unwrap_or("none");
    metrics::record_request(outcome, manager, start);

    response
}
