//! Decides which requests get wrapped by a CMS page.
//!
//! # Design Decisions
//! - A request without a route name is never decorable
//! - Patterns are unanchored searches; anchor them explicitly with `^`/`$`
//! - Patterns are compiled once, at construction

use regex::Regex;

use crate::cms::request::PageRequest;
use crate::config::DecoratorConfig;

pub trait DecoratorStrategy: Send + Sync {
    fn is_request_decorable(&self, request: &PageRequest) -> bool;
}

#[derive(Debug, Clone)]
pub struct PatternDecoratorStrategy {
    ignore_routes: Vec<String>,
    ignore_route_patterns: Vec<Regex>,
    ignore_uri_patterns: Vec<Regex>,
}

impl PatternDecoratorStrategy {
    pub fn new(
        ignore_routes: Vec<String>,
        ignore_route_patterns: &[String],
        ignore_uri_patterns: &[String],
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            ignore_routes,
            ignore_route_patterns: compile(ignore_route_patterns)?,
            ignore_uri_patterns: compile(ignore_uri_patterns)?,
        })
    }

    pub fn from_config(config: &DecoratorConfig) -> Result<Self, regex::Error> {
        Self::new(
            config.ignore_routes.clone(),
            &config.ignore_route_patterns,
            &config.ignore_uri_patterns,
        )
    }

    pub fn is_route_name_decorable(&self, route_name: Option<&str>) -> bool {
        let Some(route_name) = route_name.filter(|r| !r.is_empty()) else {
            return false;
        };
        if self.ignore_routes.iter().any(|r| r == route_name) {
            return false;
        }
        !self.ignore_route_patterns.iter().any(|p| p.is_match(route_name))
    }

    pub fn is_route_uri_decorable(&self, uri: &str) -> bool {
        !self.ignore_uri_patterns.iter().any(|p| p.is_match(uri))
    }
}

impl DecoratorStrategy for PatternDecoratorStrategy {
    fn is_request_decorable(&self, request: &PageRequest) -> bool {
        self.is_route_name_decorable(request.route_name())
            && self.is_route_uri_decorable(request.path())
    }
}

fn compile(patterns: &[String]) -> Result<Vec<Regex>, regex::Error> {
    patterns.iter().map(|p| Regex::new(p)).collect()
}
