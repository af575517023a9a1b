//! Route matching logic.
//!
//! # Responsibilities
//! - Match host header (exact match, case-insensitive)
//! - Match path patterns and capture their parameters
//!
//! # Design Decisions
//! - Host matching is case-insensitive (RFC 9110)
//! - Path matching is case-sensitive, segment by segment
//! - A catch-all `{*name}` is only allowed as the last segment
//! - No regex to guarantee O(n) matching

use std::collections::HashMap;
use std::fmt;

/// Matches the Host header.
#[derive(Debug, Clone)]
pub struct HostMatcher {
    expected_host: String,
}

impl HostMatcher {
    /// Create a new host matcher.
    /// The host is normalized to lowercase for case-insensitive matching.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            expected_host: host.into().to_lowercase(),
        }
    }

    /// `host` is expected without port.
    pub fn matches(&self, host: &str) -> bool {
        host.eq_ignore_ascii_case(&self.expected_host)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
    CatchAll(String),
}

/// Why a path pattern was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    MissingLeadingSlash,
    EmptyParamName,
    CatchAllNotLast,
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::MissingLeadingSlash => write!(f, "path must start with '/'"),
            PatternError::EmptyParamName => write!(f, "parameter without a name"),
            PatternError::CatchAllNotLast => write!(f, "catch-all must be the last segment"),
        }
    }
}

/// A compiled path pattern such as `/{_locale}/blog/{*slug}`.
#[derive(Debug, Clone)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let rest = pattern
            .strip_prefix('/')
            .ok_or(PatternError::MissingLeadingSlash)?;

        let mut segments = Vec::new();
        for raw in rest.split('/').filter(|s| !s.is_empty()) {
            if matches!(segments.last(), Some(Segment::CatchAll(_))) {
                return Err(PatternError::CatchAllNotLast);
            }
            let segment = match raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) => match name.strip_prefix('*') {
                    Some("") => return Err(PatternError::EmptyParamName),
                    Some(name) => Segment::CatchAll(name.to_string()),
                    None if name.is_empty() => return Err(PatternError::EmptyParamName),
                    None => Segment::Param(name.to_string()),
                },
                None => Segment::Literal(raw.to_string()),
            };
            segments.push(segment);
        }

        Ok(Self { segments })
    }

    /// Match `path` and return the captured parameters.
    ///
    /// A catch-all captures the remaining path, including the leading `/`.
    pub fn captures(&self, path: &str) -> Option<HashMap<String, String>> {
        let mut params = HashMap::new();
        let mut parts = path.split('/').filter(|s| !s.is_empty()).peekable();

        for segment in &self.segments {
            match segment {
                Segment::Literal(expected) => {
                    if parts.next()? != expected.as_str() {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    params.insert(name.clone(), parts.next()?.to_string());
                }
                Segment::CatchAll(name) => {
                    let rest: Vec<&str> = parts.by_ref().collect();
                    params.insert(name.clone(), format!("/{}", rest.join("/")));
                }
            }
        }

        if parts.peek().is_some() {
            return None;
        }
        Some(params)
    }
}
