//! Request listener: binds the current request to a CMS page.
//!
//! # Flow
//! ```text
//! CMS manager?        no  → Internal
//! slug route?         yes → skip (served by SlugResolver)
//! decorable?          no  → skip
//! site?               no  → Internal
//! locale matches?     no  → PageNotFound
//! page for route      missing → PageNotFound
//! enabled or editor?  no  → PageNotFound
//! set current page, update SEO metadata
//! ```
//!
//! The listener is built with three collaborators; the SEO sink is not one
//! of them. SEO metadata belongs to a single response, so the sink is the
//! `seo` field of the per-request [`PageContext`], next to the current page.

use std::sync::Arc;

use crate::cms::context::PageContext;
use crate::cms::decorator::DecoratorStrategy;
use crate::cms::error::{CmsError, CmsResult};
use crate::cms::page::{Page, PAGE_SLUG_ROUTE};
use crate::cms::request::PageRequest;
use crate::cms::selector::CmsManagerSelector;
use crate::seo::SeoSink;
use crate::site::SiteSelector;

pub struct RequestListener {
    cms_selector: Arc<dyn CmsManagerSelector>,
    site_selector: Arc<dyn SiteSelector>,
    decorator_strategy: Arc<dyn DecoratorStrategy>,
    slug_route: String,
}

impl RequestListener {
    pub fn new(
        cms_selector: Arc<dyn CmsManagerSelector>,
        site_selector: Arc<dyn SiteSelector>,
        decorator_strategy: Arc<dyn DecoratorStrategy>,
    ) -> Self {
        Self {
            cms_selector,
            site_selector,
            decorator_strategy,
            slug_route: PAGE_SLUG_ROUTE.to_string(),
        }
    }

    /// Override the route name treated as the page slug route.
    pub fn with_slug_route(mut self, slug_route: impl Into<String>) -> Self {
        self.slug_route = slug_route.into();
        self
    }

    pub fn slug_route(&self) -> &str {
        &self.slug_route
    }

    /// Handle a request-received event.
    ///
    /// On success the context holds the current page and the page's SEO
    /// metadata, unless the request was skipped.
    pub fn on_request(&self, request: &PageRequest, context: &mut PageContext) -> CmsResult<()> {
        let cms = self
            .cms_selector
            .retrieve(request)
            .ok_or_else(|| CmsError::internal("No CMS Manager available"))?;

        if request.route_name() == Some(self.slug_route.as_str()) {
            return Ok(());
        }

        if !self.decorator_strategy.is_request_decorable(request) {
            return Ok(());
        }

        let site = self
            .site_selector
            .retrieve(request)
            .ok_or_else(|| CmsError::internal("No site available for the current request"))?;

        if let Some(locale) = site.locale() {
            if request.locale() != Some(locale) {
                return Err(CmsError::not_found(format!(
                    "Invalid locale - site.locale={} - request._locale={}",
                    locale,
                    request.locale().unwrap_or_default()
                )));
            }
        }

        let page = cms.page_by_route_name(&site, request.route_name().unwrap_or_default())?;

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

/// Copy the page's metadata into the SEO sink.
pub fn apply_seo(page: &Page, seo: &mut impl SeoSink) {
    seo.set_title(page.seo_title());

    if let Some(description) = page.description() {
        seo.add_meta("name", "description", description);
    }

    if let Some(keywords) = page.keywords() {
        seo.add_meta("name", "keywords", keywords);
    }

    seo.add_meta("property", "og:type", "article");
    seo.add_html_attributes("prefix", "og: http://ogp.me/ns#");
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::cms::manager::{CmsManager, ManagerKind};
    use crate::seo::SeoPage;
    use crate::site::{test_site, Site};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Manager returning a fixed page for any route.
    pub(crate) struct FixedManager {
        pub page: Option<Arc<Page>>,
        pub lookups: AtomicUsize,
    }

    impl CmsManager for FixedManager {
        fn kind(&self) -> ManagerKind {
            ManagerKind::Page
        }

        fn page_by_route_name(&self, _site: &Site, route_name: &str) -> CmsResult<Arc<Page>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.page
                .clone()
                .ok_or_else(|| CmsError::not_found(format!("no page for {}", route_name)))
        }

        fn page_by_url(&self, _site: &Site, url: &str) -> CmsResult<Arc<Page>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.page
                .clone()
                .ok_or_else(|| CmsError::not_found(format!("no page for {}", url)))
        }
    }

    pub(crate) struct StubSelector {
        pub manager: Option<Arc<FixedManager>>,
        pub editor: bool,
    }

    impl CmsManagerSelector for StubSelector {
        fn retrieve(&self, _request: &PageRequest) -> Option<Arc<dyn CmsManager>> {
            self.manager.clone().map(|m| m as Arc<dyn CmsManager>)
        }

        fn is_editor(&self, _request: &PageRequest) -> bool {
            self.editor
        }
    }

    pub(crate) struct StubSites(pub Option<Site>);

    impl SiteSelector for StubSites {
        fn retrieve(&self, _request: &PageRequest) -> Option<Arc<Site>> {
            self.0.clone().map(Arc::new)
        }
    }

    struct StubDecorator(bool);

    impl DecoratorStrategy for StubDecorator {
        fn is_request_decorable(&self, _request: &PageRequest) -> bool {
            self.0
        }
    }

    struct Fixture {
        page: Option<Page>,
        site: Option<Site>,
        has_manager: bool,
        editor: bool,
        decorable: bool,
    }

    impl Default for Fixture {
        fn default() -> Self {
            let mut page = crate::cms::page::test_page(42, "contact");
            page.title = Some("Contact us".into());
            Self {
                page: Some(page),
                site: Some(test_site(1, "localhost")),
                has_manager: true,
                editor: false,
                decorable: true,
            }
        }
    }

    impl Fixture {
        fn build(self) -> (RequestListener, Option<Arc<FixedManager>>) {
            let manager = self.has_manager.then(|| {
                Arc::new(FixedManager {
                    page: self.page.map(Arc::new),
                    lookups: AtomicUsize::new(0),
                })
            });
            let listener = RequestListener::new(
                Arc::new(StubSelector {
                    manager: manager.clone(),
                    editor: self.editor,
                }),
                Arc::new(StubSites(self.site)),
                Arc::new(StubDecorator(self.decorable)),
            );
            (listener, manager)
        }
    }

    fn request(route: &str, locale: Option<&str>) -> PageRequest {
        let mut params = HashMap::new();
        if let Some(locale) = locale {
            params.insert("_locale".to_string(), locale.to_string());
        }
        PageRequest::new("localhost", "/contact").with_route(route, params)
    }

    fn untouched(context: &PageContext) -> bool {
        context.current_page().is_none() && context.site().is_none() && context.seo == SeoPage::default()
    }

    #[test]
    fn test_missing_manager_is_internal_error() {
        let (listener, _) = Fixture {
            has_manager: false,
            ..Default::default()
        }
        .build();
        let mut context = PageContext::default();

        // Even the slug route is not examined without a manager.
        let err = listener
            .on_request(&request(PAGE_SLUG_ROUTE, None), &mut context)
            .unwrap_err();
        assert_eq!(err, CmsError::internal("No CMS Manager available"));
    }

    #[test]
    fn test_slug_route_is_skipped() {
        let (listener, manager) = Fixture {
            site: None,
            ..Default::default()
        }
        .build();
        let mut context = PageContext::default();

        listener
            .on_request(&request(PAGE_SLUG_ROUTE, None), &mut context)
            .unwrap();
        assert!(untouched(&context));
        assert_eq!(manager.unwrap().lookups.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_custom_slug_route_is_skipped() {
        let (listener, _) = Fixture {
            site: None,
            ..Default::default()
        }
        .build();
        let listener = listener.with_slug_route("cms_page");
        let mut context = PageContext::default();

        listener.on_request(&request("cms_page", None), &mut context).unwrap();
        assert!(untouched(&context));
    }

    #[test]
    fn test_non_decorable_is_skipped() {
        let (listener, manager) = Fixture {
            decorable: false,
            site: None,
            ..Default::default()
        }
        .build();
        let mut context = PageContext::default();

        listener.on_request(&request("contact", None), &mut context).unwrap();
        assert!(untouched(&context));
        assert_eq!(manager.unwrap().lookups.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_missing_site_is_internal_error() {
        let (listener, _) = Fixture {
            site: None,
            ..Default::default()
        }
        .build();
        let mut context = PageContext::default();

        let err = listener
            .on_request(&request("contact", None), &mut context)
            .unwrap_err();
        assert_eq!(err, CmsError::internal("No site available for the current request"));
    }

    #[test]
    fn test_locale_mismatch_is_not_found() {
        let mut site = test_site(1, "localhost");
        site.locale = Some("fr".into());
        let (listener, _) = Fixture {
            site: Some(site),
            ..Default::default()
        }
        .build();
        let mut context = PageContext::default();

        let err = listener
            .on_request(&request("contact", Some("en")), &mut context)
            .unwrap_err();
        assert_eq!(
            err,
            CmsError::not_found("Invalid locale - site.locale=fr - request._locale=en")
        );

        // A missing request locale does not satisfy a site locale either.
        let err = listener
            .on_request(&request("contact", None), &mut context)
            .unwrap_err();
        assert!(matches!(err, CmsError::PageNotFound(_)));
        assert!(context.current_page().is_none());
    }

    #[test]
    fn test_matching_locale_proceeds() {
        let mut site = test_site(1, "localhost");
        site.locale = Some("fr".into());
        let (listener, _) = Fixture {
            site: Some(site),
            ..Default::default()
        }
        .build();
        let mut context = PageContext::default();

        listener
            .on_request(&request("contact", Some("fr")), &mut context)
            .unwrap();
        assert_eq!(context.current_page().unwrap().id, 42);
        assert_eq!(context.site().unwrap().id, 1);
    }

    #[test]
    fn test_missing_page_is_not_found() {
        let (listener, _) = Fixture {
            page: None,
            ..Default::default()
        }
        .build();
        let mut context = PageContext::default();

        let err = listener
            .on_request(&request("contact", None), &mut context)
            .unwrap_err();
        assert!(matches!(err, CmsError::PageNotFound(_)));
    }

    #[test]
    fn test_disabled_page_requires_editor() {
        let mut page = crate::cms::page::test_page(42, "contact");
        page.enabled = false;

        let (listener, _) = Fixture {
            page: Some(page.clone()),
            ..Default::default()
        }
        .build();
        let mut context = PageContext::default();
        let err = listener
            .on_request(&request("contact", None), &mut context)
            .unwrap_err();
        assert_eq!(err, CmsError::not_found("The page is not enabled : id=42"));
        assert!(context.current_page().is_none());

        let (listener, _) = Fixture {
            page: Some(page),
            editor: true,
            ..Default::default()
        }
        .build();
        let mut context = PageContext::default();
        listener.on_request(&request("contact", None), &mut context).unwrap();
        assert_eq!(context.current_page().unwrap().id, 42);
        assert_eq!(context.manager(), Some(ManagerKind::Page));
    }

    #[test]
    fn test_seo_metadata_applied() {
        let mut page = crate::cms::page::test_page(42, "contact");
        page.title = Some(String::new());
        page.meta_description = Some("Get in touch".into());
        page.meta_keyword = Some("contact, support".into());
        let (listener, _) = Fixture {
            page: Some(page),
            ..Default::default()
        }
        .build();
        let mut context = PageContext::new(SeoPage::new());

        listener.on_request(&request("contact", None), &mut context).unwrap();

        let seo = &context.seo;
        assert_eq!(seo.title(), "Page 42");
        assert_eq!(seo.meta("name", "description"), Some("Get in touch"));
        assert_eq!(seo.meta("name", "keywords"), Some("contact, support"));
        assert_eq!(seo.meta("property", "og:type"), Some("article"));
        assert_eq!(
            seo.html_attributes().get("prefix").map(String::as_str),
            Some("og: http://ogp.me/ns#")
        );
    }

    #[test]
    fn test_absent_meta_omitted() {
        let (listener, _) = Fixture::default().build();
        let mut context = PageContext::new(SeoPage::new());

        listener.on_request(&request("contact", None), &mut context).unwrap();

        let seo = &context.seo;
        assert_eq!(seo.title(), "Contact us");
        assert!(!seo.has_meta("name", "description"));
        assert!(!seo.has_meta("name", "keywords"));
        assert!(seo.has_meta("property", "og:type"));
    }
}
