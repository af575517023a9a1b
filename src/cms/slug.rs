//! Serves pure CMS pages addressed by URL (the `page_slug` route).

use std::sync::Arc;

use crate::cms::context::PageContext;
use crate::cms::error::{CmsError, CmsResult};
use crate::cms::listener::apply_seo;
use crate::cms::request::PageRequest;
use crate::cms::selector::CmsManagerSelector;
use crate::site::SiteSelector;

pub struct SlugResolver {
    cms_selector: Arc<dyn CmsManagerSelector>,
    site_selector: Arc<dyn SiteSelector>,
}

impl SlugResolver {
    pub fn new(cms_selector: Arc<dyn CmsManagerSelector>, site_selector: Arc<dyn SiteSelector>) -> Self {
        Self {
            cms_selector,
            site_selector,
        }
    }

    /// Resolve the page owning the request path and make it current.
    pub fn resolve(&self, request: &PageRequest, context: &mut PageContext) -> CmsResult<()> {
        let cms = self
            .cms_selector
            .retrieve(request)
            .ok_or_else(|| CmsError::internal("No CMS Manager available"))?;

        let site = self
            .site_selector
            .retrieve(request)
            .ok_or_else(|| CmsError::internal("No site available for the current request"))?;

        let url = site.relative_url(request.path()).ok_or_else(|| {
            CmsError::not_found(format!(
                "The path {} is outside of site {}",
                request.path(),
                site.id
            ))
        })?;

        let page = cms.page_by_url(&site, url)?;

        if !page.enabled && !self.cms_selector.is_editor(request) {
            return Err(CmsError::not_found(format!(
                "The page is not enabled : id={}",
                page.id
            )));
        }

        context.set_site(site);
        cms.set_current_page(context, page.clone());
        apply_seo(&page, &mut context.seo);

        Ok(())
    }
}
