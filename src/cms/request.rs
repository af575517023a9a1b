//! Read-only view of an incoming request.
//!
//! Collaborators never see the framework request type, only this struct,
//! so they stay testable without an HTTP stack.

use std::collections::HashMap;

/// Request parameter carrying the requested locale.
pub const LOCALE_PARAM: &str = "_locale";

#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    host: String,
    path: String,
    route_name: Option<String>,
    route_params: HashMap<String, String>,
    query_locale: Option<String>,
    bearer_token: Option<String>,
    xml_http_request: bool,
}

impl PageRequest {
    /// Create a request for the given host and path.
    /// The host is normalized to lowercase without its port.
    pub fn new(host: impl AsRef<str>, path: impl Into<String>) -> Self {
        let host = host.as_ref();
        let host = host.split(':').next().unwrap_or(host).to_lowercase();
        Self {
            host,
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_route(mut self, name: impl Into<String>, params: HashMap<String, String>) -> Self {
        self.route_name = Some(name.into());
        self.route_params = params;
        self
    }

    /// Parse `_locale` out of a raw query string.
    pub fn with_query(mut self, query: Option<&str>) -> Self {
        self.query_locale = query.and_then(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .find(|(k, _)| k == LOCALE_PARAM)
                .map(|(_, v)| v.into_owned())
        });
        self
    }

    pub fn with_bearer_token(mut self, token: Option<String>) -> Self {
        self.bearer_token = token;
        self
    }

    pub fn with_xml_http_request(mut self, xhr: bool) -> Self {
        self.xml_http_request = xhr;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn route_name(&self) -> Option<&str> {
        self.route_name.as_deref()
    }

    pub fn route_param(&self, name: &str) -> Option<&str> {
        self.route_params.get(name).map(String::as_str)
    }

    /// Requested locale: route parameters win over the query string.
    pub fn locale(&self) -> Option<&str> {
        self.route_param(LOCALE_PARAM)
            .or(self.query_locale.as_deref())
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }

    pub fn is_xml_http_request(&self) -> bool {
        self.xml_http_request
    }
}
