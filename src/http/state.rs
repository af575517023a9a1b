//! Shared application state.
//!
//! Everything derived from one configuration lives in a [`CmsRuntime`].
//! A reload builds a new runtime and swaps it in atomically; requests in
//! flight keep the runtime they started with.

use arc_swap::ArcSwap;
use std::sync::Arc;

use crate::cms::{
    CmsManager, CmsManagerSelector, EditorCmsManagerSelector, PageManager, PageStore,
    PatternDecoratorStrategy, RequestListener, SlugResolver, SnapshotManager,
};
use crate::config::{CmsConfig, ConfigError};
use crate::routing::Router as RouteTable;
use crate::site::HostPathSiteSelector;

pub struct CmsRuntime {
    pub config: CmsConfig,
    pub routes: RouteTable,
    pub store: Arc<PageStore>,
    pub sites: Arc<HostPathSiteSelector>,
    pub listener: RequestListener,
    pub slug_resolver: SlugResolver,
}

impl CmsRuntime {
    /// Wire every collaborator from a validated configuration.
    pub fn build(config: CmsConfig) -> Result<Self, ConfigError> {
        let store = Arc::new(PageStore::from_pages(config.pages.iter().cloned()));
        if config.cms.publish_on_load {
            for site in &config.sites {
                store.publish(site.id);
            }
        }

        let sites = Arc::new(HostPathSiteSelector::new(
            config.sites.iter().cloned().map(Arc::new).collect(),
        ));

        let page_manager: Arc<dyn CmsManager> = Arc::new(PageManager::new(store.clone()));
        let snapshot_manager = config
            .cms
            .serve_snapshots
            .then(|| Arc::new(SnapshotManager::new(store.clone())) as Arc<dyn CmsManager>);
        let cms_selector: Arc<dyn CmsManagerSelector> = Arc::new(EditorCmsManagerSelector::new(
            page_manager,
            snapshot_manager,
            config.cms.editor_token.clone(),
        ));

        let decorator = Arc::new(PatternDecoratorStrategy::from_config(&config.decorator)?);

        let listener = RequestListener::new(cms_selector.clone(), sites.clone(), decorator)
            .with_slug_route(config.cms.slug_route.clone());
        let slug_resolver = SlugResolver::new(cms_selector, sites.clone());

        tracing::info!(
            sites = config.sites.len(),
            routes = config.routes.len(),
            pages = store.count(),
            snapshots = store.snapshot_count(),
            "CMS runtime built"
        );

        Ok(Self {
            routes: RouteTable::from_config(&config.routes),
            config,
            store,
            sites,
            listener,
            slug_resolver,
        })
    }

    pub fn site_exists(&self, site_id: u64) -> bool {
        self.sites.sites().iter().any(|s| s.id == site_id)
    }
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<ArcSwap<CmsRuntime>>,
}

impl AppState {
    pub fn new(runtime: CmsRuntime) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(runtime)),
        }
    }

    /// Replace the runtime; later requests see the new one.
    pub fn swap(&self, runtime: CmsRuntime) {
        self.inner.store(Arc::new(runtime));
    }

    pub fn runtime(&self) -> Arc<CmsRuntime> {
        self.inner.load_full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::page::test_page;
    use crate::site::test_site;

    #[test]
    fn test_build_publishes_on_load() {
        let mut config = CmsConfig::default();
        config.sites = vec![test_site(1, "localhost")];
        config.pages = vec![test_page(1, "home")];

        let runtime = CmsRuntime::build(config.clone()).unwrap();
        assert_eq!(runtime.store.snapshot_count(), 1);
        assert!(runtime.site_exists(1));
        assert!(!runtime.site_exists(2));

        config.cms.publish_on_load = false;
        let runtime = CmsRuntime::build(config).unwrap();
        assert_eq!(runtime.store.snapshot_count(), 0);
    }

    #[test]
    fn test_swap_runtime() {
        let state = AppState::new(CmsRuntime::build(CmsConfig::default()).unwrap());
        let before = state.runtime();

        let mut config = CmsConfig::default();
        config.sites = vec![test_site(3, "localhost")];
        state.swap(CmsRuntime::build(config).unwrap());

        assert!(!before.site_exists(3));
        assert!(state.runtime().site_exists(3));
    }
}
