use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::cms::Page;
use crate::config::{validate_page_update, ValidationError};
use crate::http::AppState;
use crate::observability::metrics;
use crate::site::Site;

#[derive(Debug, Serialize, Deserialize)]
pub struct SystemStatus {
    pub version: String,
    pub status: String,
    pub sites: usize,
    pub routes: usize,
    pub pages: usize,
    pub snapshots: usize,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub site: Option<u64>,
    #[serde(default)]
    pub snapshots: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PublishSummary {
    pub site_id: u64,
    pub published: usize,
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    let runtime = state.runtime();
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "operational".to_string(),
        sites: runtime.sites.sites().len(),
        routes: runtime.routes.len(),
        pages: runtime.store.count(),
        snapshots: runtime.store.snapshot_count(),
    })
}

pub async fn get_sites(State(state): State<AppState>) -> Json<Vec<Site>> {
    let runtime = state.runtime();
    Json(runtime.sites.sites().iter().map(|s| s.as_ref().clone()).collect())
}

pub async fn get_pages(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Json<Vec<Page>> {
    let runtime = state.runtime();
    let pages = if query.snapshots {
        runtime.store.snapshots(query.site)
    } else {
        runtime.store.pages(query.site)
    };
    Json(pages.iter().map(|p| p.as_ref().clone()).collect())
}

/// Create or replace a live page. Visitors see it after the next publish.
///
/// The page must not take the route or URL of another page of its site
/// (409), and slug pages need a well-formed URL (422).
pub async fn put_page(State(state): State<AppState>, Json(page): Json<Page>) -> Response {
    let runtime = state.runtime();
    if !runtime.site_exists(page.site_id) {
        return (StatusCode::NOT_FOUND, format!("Unknown site {}", page.site_id)).into_response();
    }

    let slug_route = runtime.listener.slug_route();
    let saved = runtime.store.upsert_checked(page.clone(), |page, site_pages| {
        validate_page_update(page, slug_route, site_pages)
    });

    match saved {
        Ok(replaced) => {
            tracing::info!(page_id = page.id, site_id = page.site_id, replaced = replaced.is_some(), "Page saved");
            let status = if replaced.is_some() {
                StatusCode::OK
            } else {
                StatusCode::CREATED
            };
            (status, Json(page)).into_response()
        }
        Err(e) => {
            tracing::warn!(page_id = page.id, site_id = page.site_id, error = %e, "Page rejected");
            (rejection_status(&e), e.to_string()).into_response()
        }
    }
}

fn rejection_status(error: &ValidationError) -> StatusCode {
    match error {
        ValidationError::DuplicatePageRoute { .. } => StatusCode::CONFLICT,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

pub async fn publish_site(State(state): State<AppState>, Path(site_id): Path<u64>) -> Response {
    let runtime = state.runtime();
    if !runtime.site_exists(site_id) {
        return (StatusCode::NOT_FOUND, format!("Unknown site {}", site_id)).into_response();
    }

    let published = runtime.store.publish(site_id);
    metrics::record_snapshots_published(published);
    Json(PublishSummary { site_id, published }).into_response()
}
