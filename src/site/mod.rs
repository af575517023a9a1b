//! Site resolution subsystem.
//!
//! # Data Flow
//! ```text
//! PageRequest (host, path)
//!     → selector.rs (match enabled sites by host + relative path)
//!     → Return: matched Site, default Site, or none
//! ```

pub mod selector;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::cms::PageRequest;

pub use selector::HostPathSiteSelector;

/// Host that matches every request.
pub const LOCALHOST: &str = "localhost";

/// A configured domain/locale context under which pages resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: u64,
    pub name: String,
    /// Host served by this site, `localhost` matches any host.
    #[serde(default = "default_host")]
    pub host: String,
    /// Path prefix owned by this site, e.g. `/fr`.
    #[serde(default)]
    pub relative_path: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub is_default: bool,
}

fn default_host() -> String {
    LOCALHOST.to_string()
}

fn default_enabled() -> bool {
    true
}

impl Site {
    /// Locale required by this site, if any.
    pub fn locale(&self) -> Option<&str> {
        crate::cms::page::non_empty(&self.locale)
    }

    pub fn is_localhost(&self) -> bool {
        self.host.eq_ignore_ascii_case(LOCALHOST)
    }

    /// Relative path without its trailing slash; `None` when the site owns the root.
    pub fn relative_path(&self) -> Option<&str> {
        self.relative_path
            .as_deref()
            .map(|p| p.trim_end_matches('/'))
            .filter(|p| !p.is_empty())
    }

    /// Strip the site's relative path from `path`, and any trailing `/`,
    /// so `/fr/about/` and `/fr/about` both give `/about`.
    ///
    /// Returns `None` when the path lies outside the site.
    pub fn relative_url<'a>(&self, path: &'a str) -> Option<&'a str> {
        let rest = match self.relative_path() {
            Some(prefix) => path.strip_prefix(prefix)?,
            None => path,
        };
        if !rest.is_empty() && !rest.starts_with('/') {
            return None;
        }
        match rest.trim_end_matches('/') {
            "" => Some("/"),
            url => Some(url),
        }
    }
}

/// Resolves the site serving the current request.
pub trait SiteSelector: Send + Sync {
    fn retrieve(&self, request: &PageRequest) -> Option<Arc<Site>>;
}

#[cfg(test)]
pub(crate) fn test_site(id: u64, host: &str) -> Site {
    Site {
        id,
        name: format!("site-{}", id),
        host: host.to_string(),
        relative_path: None,
        locale: None,
        enabled: true,
        is_default: false,
    }
}
