//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (pages reference existing sites)
//! - Validate route paths and decorator patterns
//! - Detect duplicate sites, routes and pages
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: CmsConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;

use crate::cms::Page;
use crate::config::schema::CmsConfig;
use crate::routing::PathPattern;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    InvalidBindAddress(String),

    #[error("invalid metrics address '{0}'")]
    InvalidMetricsAddress(String),

    #[error("cms.slug_route must not be empty")]
    EmptySlugRoute,

    #[error("admin.api_key must be set when the admin API is enabled")]
    MissingAdminKey,

    #[error("duplicate site id {0}")]
    DuplicateSite(u64),

    #[error("more than one default site")]
    MultipleDefaultSites,

    #[error("duplicate route name '{0}'")]
    DuplicateRoute(String),

    #[error("route '{route}' has an invalid path: {reason}")]
    InvalidRoutePath { route: String, reason: String },

    #[error("invalid decorator pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("page {page} references unknown site {site}")]
    UnknownSite { page: u64, site: u64 },

    #[error("duplicate page id {0}")]
    DuplicatePage(u64),

    #[error("site {site} has more than one page for '{key}'")]
    DuplicatePageRoute { site: u64, key: String },

    #[error("slug page {0} has no url")]
    SlugPageWithoutUrl(u64),

    #[error("page {page} has an invalid url '{url}': must start with '/' and not end with '/'")]
    InvalidPageUrl { page: u64, url: String },
}

pub fn validate_config(config: &CmsConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(config.listener.bind_address.clone()));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.cms.slug_route.is_empty() {
        errors.push(ValidationError::EmptySlugRoute);
    }

    if config.admin.enabled && config.admin.api_key.is_empty() {
        errors.push(ValidationError::MissingAdminKey);
    }

    validate_sites(config, &mut errors);
    validate_routes(config, &mut errors);
    validate_patterns(config, &mut errors);
    validate_pages(config, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_sites(config: &CmsConfig, errors: &mut Vec<ValidationError>) {
    let mut ids = HashSet::new();
    for site in &config.sites {
        if !ids.insert(site.id) {
            errors.push(ValidationError::DuplicateSite(site.id));
        }
    }

    if config.sites.iter().filter(|s| s.is_default).count() > 1 {
        errors.push(ValidationError::MultipleDefaultSites);
    }
}

fn validate_routes(config: &CmsConfig, errors: &mut Vec<ValidationError>) {
    let mut names = HashSet::new();
    for route in &config.routes {
        if !names.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateRoute(route.name.clone()));
        }
        if let Err(reason) = PathPattern::parse(&route.path) {
            errors.push(ValidationError::InvalidRoutePath {
                route: route.name.clone(),
                reason: reason.to_string(),
            });
        }
    }
}

fn validate_patterns(config: &CmsConfig, errors: &mut Vec<ValidationError>) {
    let patterns = config
        .decorator
        .ignore_route_patterns
        .iter()
        .chain(&config.decorator.ignore_uri_patterns);

    for pattern in patterns {
        if let Err(e) = regex::Regex::new(pattern) {
            errors.push(ValidationError::InvalidPattern {
                pattern: pattern.clone(),
                reason: e.to_string(),
            });
        }
    }
}

fn validate_pages(config: &CmsConfig, errors: &mut Vec<ValidationError>) {
    let site_ids: HashSet<u64> = config.sites.iter().map(|s| s.id).collect();
    let mut page_ids = HashSet::new();
    let mut keys = HashSet::new();

    for page in &config.pages {
        if !page_ids.insert(page.id) {
            errors.push(ValidationError::DuplicatePage(page.id));
        }
        if !site_ids.contains(&page.site_id) {
            errors.push(ValidationError::UnknownSite {
                page: page.id,
                site: page.site_id,
            });
        }

        let key = match page_key(page, &config.cms.slug_route) {
            Ok(key) => key,
            Err(e) => {
                errors.push(e);
                continue;
            }
        };

        if !keys.insert((page.site_id, key.clone())) {
            errors.push(ValidationError::DuplicatePageRoute {
                site: page.site_id,
                key,
            });
        }
    }
}

/// Check one page against the other pages of its site.
///
/// Used for pages written at runtime, which skip the config checks.
pub fn validate_page_update(
    page: &Page,
    slug_route: &str,
    site_pages: &[Arc<Page>],
) -> Result<(), ValidationError> {
    let key = page_key(page, slug_route)?;
    let taken = site_pages
        .iter()
        .filter(|other| other.id != page.id && other.site_id == page.site_id)
        .any(|other| page_key(other, slug_route).is_ok_and(|k| k == key));

    if taken {
        Err(ValidationError::DuplicatePageRoute {
            site: page.site_id,
            key,
        })
    } else {
        Ok(())
    }
}

/// Route name for hybrid pages, URL for slug pages.
fn page_key(page: &Page, slug_route: &str) -> Result<String, ValidationError> {
    if page.is_hybrid(slug_route) {
        return Ok(page.route_name.clone());
    }
    let url = page
        .url
        .as_deref()
        .ok_or(ValidationError::SlugPageWithoutUrl(page.id))?;
    if !url.starts_with('/') || (url.len() > 1 && url.ends_with('/')) {
        return Err(ValidationError::InvalidPageUrl {
            page: page.id,
            url: url.to_string(),
        });
    }
    Ok(url.to_string())
}
