//! Host and path based site selection.
//!
//! # Design Decisions
//! - Exact host beats the `localhost` wildcard
//! - Longer relative path beats shorter (more specific site wins)
//! - Disabled sites are never selected, not even as default

use std::sync::Arc;

use crate::cms::PageRequest;
use crate::site::{Site, SiteSelector};

#[derive(Debug, Clone, Default)]
pub struct HostPathSiteSelector {
    sites: Vec<Arc<Site>>,
}

impl HostPathSiteSelector {
    pub fn new(sites: Vec<Arc<Site>>) -> Self {
        Self { sites }
    }

    pub fn sites(&self) -> &[Arc<Site>] {
        &self.sites
    }

    fn host_matches(site: &Site, host: &str) -> bool {
        site.is_localhost() || site.host.eq_ignore_ascii_case(host)
    }

    fn rank(site: &Site) -> (bool, usize) {
        (
            !site.is_localhost(),
            site.relative_path().map(str::len).unwrap_or(0),
        )
    }
}

impl SiteSelector for HostPathSiteSelector {
    fn retrieve(&self, request: &PageRequest) -> Option<Arc<Site>> {
        let mut best: Option<&Arc<Site>> = None;

        for site in self.sites.iter().filter(|s| s.enabled) {
            if !Self::host_matches(site, request.host()) {
                continue;
            }
            if site.relative_url(request.path()).is_none() {
                continue;
            }
            // Ties keep the first configured site.
            if best.map_or(true, |b| Self::rank(site) > Self::rank(b)) {
                best = Some(site);
            }
        }

        best.or_else(|| self.sites.iter().find(|s| s.enabled && s.is_default))
            .cloned()
    }
}
