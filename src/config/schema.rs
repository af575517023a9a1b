//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the page server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::cms::{Page, PAGE_SLUG_ROUTE};
use crate::site::Site;

/// Root configuration for the page server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CmsConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Management API settings.
    pub admin: AdminConfig,

    /// Page resolution settings.
    pub cms: CmsSettings,

    /// Which requests are decorated with a CMS page.
    pub decorator: DecoratorConfig,

    /// Default SEO metadata applied before page metadata.
    pub seo: SeoConfig,

    /// Site definitions.
    pub sites: Vec<Site>,

    /// Named route definitions.
    pub routes: Vec<RouteConfig>,

    /// Page definitions.
    pub pages: Vec<Page>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Management API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Enable the `/admin` routes.
    pub enabled: bool,

    /// API key for authentication (Bearer token).
    pub api_key: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: String::new(),
        }
    }
}

/// Page resolution settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CmsSettings {
    /// Route name of the catch-all route serving pages by URL.
    pub slug_route: String,

    /// Serve published snapshots to visitors instead of live pages.
    pub serve_snapshots: bool,

    /// Publish every site's pages at startup and on reload.
    pub publish_on_load: bool,

    /// Bearer token granting editor mode (access to disabled and unpublished pages).
    pub editor_token: Option<String>,
}

impl Default for CmsSettings {
    fn default() -> Self {
        Self {
            slug_route: PAGE_SLUG_ROUTE.to_string(),
            serve_snapshots: true,
            publish_on_load: true,
            editor_token: None,
        }
    }
}

/// Decoration rules, see [`crate::cms::PatternDecoratorStrategy`].
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DecoratorConfig {
    /// Route names never decorated.
    pub ignore_routes: Vec<String>,

    /// Regexes matched against the route name.
    pub ignore_route_patterns: Vec<String>,

    /// Regexes matched against the request path.
    pub ignore_uri_patterns: Vec<String>,
}

impl Default for DecoratorConfig {
    fn default() -> Self {
        Self {
            ignore_routes: vec![
                "page_cache_esi".to_string(),
                "page_cache_ssi".to_string(),
                "page_js_sync_cache".to_string(),
                "page_js_async_cache".to_string(),
            ],
            ignore_route_patterns: vec!["(.*)admin(.*)".to_string(), "^_(.*)".to_string()],
            ignore_uri_patterns: vec!["^/admin(.*)".to_string(), "^/api/(.*)".to_string()],
        }
    }
}

/// Default SEO metadata.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SeoConfig {
    /// Default document title.
    pub title: String,

    /// Separator used when title segments are prepended.
    pub separator: String,

    /// Metas by kind, then name: `[seo.metas.name] robots = "index, follow"`.
    pub metas: BTreeMap<String, BTreeMap<String, String>>,

    /// Attributes of the `<html>` tag.
    pub html_attributes: BTreeMap<String, String>,
}

impl Default for SeoConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            separator: " - ".to_string(),
            metas: BTreeMap::new(),
            html_attributes: BTreeMap::new(),
        }
    }
}

/// Named route configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route name, used to attach pages.
    pub name: String,

    /// Path pattern, e.g. `/{_locale}/contact` or `/{*path}`.
    pub path: String,

    /// Host header to match (exact match).
    #[serde(default)]
    pub host: Option<String>,

    /// Route priority (higher = checked first).
    #[serde(default)]
    pub priority: i32,

    /// Parameter values used when the path does not bind them.
    #[serde(default)]
    pub defaults: HashMap<String, String>,
}
