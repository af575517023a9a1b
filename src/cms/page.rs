//! Page entity.

use serde::{Deserialize, Serialize};

/// Route name of the catch-all route serving pages by URL.
pub const PAGE_SLUG_ROUTE: &str = "page_slug";

/// A routable content page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: u64,
    /// Site this page belongs to.
    pub site_id: u64,
    /// Route name the page is attached to (`page_slug` for pure CMS pages).
    pub route_name: String,
    pub name: String,
    /// Public URL, relative to the site. Only used by slug pages.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub meta_keyword: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Trusted HTML fragment rendered inside the page body.
    #[serde(default)]
    pub body: Option<String>,
}

fn default_enabled() -> bool {
    true
}

impl Page {
    /// Title used for the document head, falling back to the page name.
    pub fn seo_title(&self) -> &str {
        non_empty(&self.title).unwrap_or(&self.name)
    }

    pub fn description(&self) -> Option<&str> {
        non_empty(&self.meta_description)
    }

    pub fn keywords(&self) -> Option<&str> {
        non_empty(&self.meta_keyword)
    }

    /// Attached to a named route rather than served by URL on the slug route.
    pub fn is_hybrid(&self, slug_route: &str) -> bool {
        self.route_name != slug_route
    }
}

/// Treats empty strings the same as a missing value.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
pub(crate) fn test_page(id: u64, route_name: &str) -> Page {
    Page {
        id,
        site_id: 1,
        route_name: route_name.to_string(),
        name: format!("Page {}", id),
        url: None,
        title: None,
        meta_description: None,
        meta_keyword: None,
        enabled: true,
        body: None,
    }
}
