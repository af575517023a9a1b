//! CMS managers: page lookup against live pages or published snapshots.

use serde::Serialize;
use std::sync::Arc;

use crate::cms::context::PageContext;
use crate::cms::error::{CmsError, CmsResult};
use crate::cms::page::Page;
use crate::cms::store::PageStore;
use crate::site::Site;

/// Source a manager reads pages from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ManagerKind {
    /// Live, editable pages.
    Page,
    /// Published snapshots.
    Snapshot,
}

impl ManagerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Snapshot => "snapshot",
        }
    }
}

pub trait CmsManager: Send + Sync {
    fn kind(&self) -> ManagerKind;

    fn page_by_route_name(&self, site: &Site, route_name: &str) -> CmsResult<Arc<Page>>;

    fn page_by_url(&self, site: &Site, url: &str) -> CmsResult<Arc<Page>>;

    /// Make `page` the current page of this request.
    fn set_current_page(&self, context: &mut PageContext, page: Arc<Page>) {
        context.set_current_page(page, self.kind());
    }
}

/// Serves live pages, used for editors.
#[derive(Debug, Clone)]
pub struct PageManager {
    store: Arc<PageStore>,
}

impl PageManager {
    pub fn new(store: Arc<PageStore>) -> Self {
        Self { store }
    }
}

impl CmsManager for PageManager {
    fn kind(&self) -> ManagerKind {
        ManagerKind::Page
    }

    fn page_by_route_name(&self, site: &Site, route_name: &str) -> CmsResult<Arc<Page>> {
        self.store
            .page(site.id, route_name)
            .ok_or_else(|| route_not_found(site, route_name))
    }

    fn page_by_url(&self, site: &Site, url: &str) -> CmsResult<Arc<Page>> {
        self.store
            .page_by_url(site.id, url)
            .ok_or_else(|| url_not_found(site, url))
    }
}

/// Serves published snapshots, used for visitors.
#[derive(Debug, Clone)]
pub struct SnapshotManager {
    store: Arc<PageStore>,
}

impl SnapshotManager {
    pub fn new(store: Arc<PageStore>) -> Self {
        Self { store }
    }
}

impl CmsManager for SnapshotManager {
    fn kind(&self) -> ManagerKind {
        ManagerKind::Snapshot
    }

    fn page_by_route_name(&self, site: &Site, route_name: &str) -> CmsResult<Arc<Page>> {
        self.store
            .snapshot(site.id, route_name)
            .ok_or_else(|| route_not_found(site, route_name))
    }

    fn page_by_url(&self, site: &Site, url: &str) -> CmsResult<Arc<Page>> {
        self.store
            .snapshot_by_url(site.id, url)
            .ok_or_else(|| url_not_found(site, url))
    }
}

fn route_not_found(site: &Site, route_name: &str) -> CmsError {
    CmsError::not_found(format!(
        "Unable to find the page : route_name={} - site={}",
        route_name, site.id
    ))
}

fn url_not_found(site: &Site, url: &str) -> CmsError {
    CmsError::not_found(format!("Unable to find the page : url={} - site={}", url, site.id))
}
