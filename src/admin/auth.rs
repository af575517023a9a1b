use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::http::AppState;

/// Bearer-key check for the management API.
///
/// Answers 404 while the admin API is disabled, so a reload can turn it
/// on or off without rebuilding the router.
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let authorized = {
        let runtime = state.inner.load();
        if !runtime.config.admin.enabled {
            return Err(StatusCode::NOT_FOUND);
        }

        let expected = format!("Bearer {}", runtime.config.admin.api_key);
        request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .map(|value| value == expected)
            .unwrap_or(false)
    };

    if authorized {
        Ok(next.run(request).await)
    } else {
        tracing::warn!(path = %request.uri().path(), "Rejected admin request");
        Err(StatusCode::UNAUTHORIZED)
    }
}
