//! Request handling and transformation.
//!
//! # Responsibilities
//! - Generate unique request ID (UUID v4)
//! - Extract routing-relevant information (host, path, query)
//! - Build the framework-independent `PageRequest`

use axum::http::{header, HeaderMap, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::cms::PageRequest;
use crate::routing::Router as RouteTable;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates a UUID v4 for requests arriving without an `x-request-id`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Request ID header value, or `unknown`.
pub fn request_id<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Resolve the route and capture what the CMS needs from the request.
pub fn page_request<B>(request: &Request<B>, routes: &RouteTable) -> PageRequest {
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .or_else(|| request.uri().host())
        .unwrap_or_default();
    let path = request.uri().path();

    let mut page_request = PageRequest::new(host, path)
        .with_query(request.uri().query())
        .with_bearer_token(bearer_token(request.headers()))
        .with_xml_http_request(is_xml_http_request(request.headers()));

    if let Some(route) = routes.match_request(page_request.host(), path) {
        page_request = page_request.with_route(route.name, route.params);
    }
    page_request
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
}

fn is_xml_http_request(headers: &HeaderMap) -> bool {
    headers
        .get("x-requested-with")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.eq_ignore_ascii_case("XMLHttpRequest"))
        .unwrap_or(false)
}
