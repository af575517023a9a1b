//! Route lookup.
//!
//! # Responsibilities
//! - Store compiled routes
//! - Look up the matching route name for a request
//! - Return matched route or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan (acceptable for typical route counts)
//! - Explicit `None` rather than silent default

use std::collections::HashMap;

use crate::config::RouteConfig;
use crate::routing::matcher::{HostMatcher, PathPattern};

/// A named route resolved for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub name: String,
    pub params: HashMap<String, String>,
}

#[derive(Debug, Clone)]
struct Route {
    name: String,
    host: Option<HostMatcher>,
    path: PathPattern,
    priority: i32,
    defaults: HashMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    /// Compile routes from configuration.
    ///
    /// Routes with an invalid path are skipped; validation reports them.
    pub fn from_config(configs: &[RouteConfig]) -> Self {
        let mut routes: Vec<Route> = configs
            .iter()
            .filter_map(|c| match PathPattern::parse(&c.path) {
                Ok(path) => Some(Route {
                    name: c.name.clone(),
                    host: c.host.as_deref().map(HostMatcher::new),
                    path,
                    priority: c.priority,
                    defaults: c.defaults.clone(),
                }),
                Err(e) => {
                    tracing::warn!(route = %c.name, error = %e, "Skipping route with invalid path");
                    None
                }
            })
            .collect();

        // Stable sort keeps config order among equal priorities.
        routes.sort_by(|a, b| b.priority.cmp(&a.priority));

        Self { routes }
    }

    /// Find the first route matching `host` (without port) and `path`.
    pub fn match_request(&self, host: &str, path: &str) -> Option<RouteMatch> {
        self.routes.iter().find_map(|route| {
            if let Some(matcher) = &route.host {
                if !matcher.matches(host) {
                    return None;
                }
            }
            let mut params = route.path.captures(path)?;
            for (key, value) in &route.defaults {
                params.entry(key.clone()).or_insert_with(|| value.clone());
            }
            Some(RouteMatch {
                name: route.name.clone(),
                params,
            })
        })
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
