//! Management API.
//!
//! # Endpoints
//! - `GET  /admin/status`                  runtime summary
//! - `GET  /admin/sites`                   configured sites
//! - `GET  /admin/pages?site=&snapshots=`  live pages or snapshots
//! - `PUT  /admin/pages`                   create or replace a live page
//! - `POST /admin/sites/{id}/snapshots`    publish a site's live pages
//!
//! Every endpoint requires `Authorization: Bearer <admin.api_key>`.

pub mod auth;
pub mod handlers;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::http::AppState;

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/status", get(handlers::get_status))
        .route("/admin/sites", get(handlers::get_sites))
        .route("/admin/pages", get(handlers::get_pages).put(handlers::put_page))
        .route("/admin/sites/{id}/snapshots", post(handlers::publish_site))
        .route_layer(middleware::from_fn_with_state(state, auth::admin_auth_middleware))
}
