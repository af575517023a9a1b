//! Per-request CMS state.

use std::sync::Arc;

use crate::cms::manager::ManagerKind;
use crate::cms::page::Page;
use crate::seo::SeoPage;
use crate::site::Site;

/// Output of CMS request handling, read by downstream renderers.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    current_page: Option<Arc<Page>>,
    site: Option<Arc<Site>>,
    manager: Option<ManagerKind>,
    pub seo: SeoPage,
}

impl PageContext {
    pub fn new(seo: SeoPage) -> Self {
        Self {
            seo,
            ..Default::default()
        }
    }

    pub fn current_page(&self) -> Option<&Arc<Page>> {
        self.current_page.as_ref()
    }

    pub fn set_current_page(&mut self, page: Arc<Page>, manager: ManagerKind) {
        self.current_page = Some(page);
        self.manager = Some(manager);
    }

    pub fn site(&self) -> Option<&Arc<Site>> {
        self.site.as_ref()
    }

    pub fn set_site(&mut self, site: Arc<Site>) {
        self.site = Some(site);
    }

    /// Manager that produced the current page.
    pub fn manager(&self) -> Option<ManagerKind> {
        self.manager
    }
}
