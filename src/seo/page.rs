//! Per-request SEO metadata and its HTML rendering.

use std::collections::BTreeMap;

use crate::config::SeoConfig;
use crate::seo::SeoSink;

/// Metadata collected while handling a request.
///
/// Metas are grouped by kind (`name`, `property`, `http-equiv`, ...) and then
/// by name, so adding the same tag twice replaces the previous value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeoPage {
    title: String,
    separator: String,
    metas: BTreeMap<String, BTreeMap<String, String>>,
    html_attributes: BTreeMap<String, String>,
    link_canonical: Option<String>,
}

impl SeoPage {
    pub fn new() -> Self {
        Self {
            separator: " - ".to_string(),
            ..Default::default()
        }
    }

    /// Build a page seeded with the configured defaults.
    pub fn from_config(config: &SeoConfig) -> Self {
        let mut seo = Self::new();
        seo.separator = config.separator.clone();
        seo.title = config.title.clone();
        for (kind, entries) in &config.metas {
            for (name, content) in entries {
                seo.add_meta(kind, name, content);
            }
        }
        for (name, value) in &config.html_attributes {
            seo.add_html_attributes(name, value);
        }
        seo
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Prepend a title segment to the current title.
    pub fn add_title(&mut self, title: &str) {
        if self.title.is_empty() {
            self.title = title.to_string();
        } else {
            self.title = format!("{}{}{}", title, self.separator, self.title);
        }
    }

    pub fn meta(&self, kind: &str, name: &str) -> Option<&str> {
        self.metas
            .get(kind)
            .and_then(|entries| entries.get(name))
            .map(String::as_str)
    }

    pub fn has_meta(&self, kind: &str, name: &str) -> bool {
        self.meta(kind, name).is_some()
    }

    pub fn remove_meta(&mut self, kind: &str, name: &str) {
        if let Some(entries) = self.metas.get_mut(kind) {
            entries.remove(name);
            if entries.is_empty() {
                self.metas.remove(kind);
            }
        }
    }

    pub fn metas(&self) -> &BTreeMap<String, BTreeMap<String, String>> {
        &self.metas
    }

    pub fn html_attributes(&self) -> &BTreeMap<String, String> {
        &self.html_attributes
    }

    pub fn remove_html_attributes(&mut self, name: &str) {
        self.html_attributes.remove(name);
    }

    pub fn set_link_canonical(&mut self, href: impl Into<String>) {
        self.link_canonical = Some(href.into());
    }

    pub fn link_canonical(&self) -> Option<&str> {
        self.link_canonical.as_deref()
    }

    pub fn render_title(&self) -> String {
        format!("<title>{}</title>", escape_html(&self.title))
    }

    /// One `<meta>` tag per line, plus the canonical link when set.
    pub fn render_metadatas(&self) -> String {
        let mut out = String::new();
        for (kind, entries) in &self.metas {
            for (name, content) in entries {
                out.push_str(&format!(
                    "<meta {}=\"{}\" content=\"{}\" />\n",
                    escape_html(kind),
                    escape_html(name),
                    escape_html(content)
                ));
            }
        }
        if let Some(href) = &self.link_canonical {
            out.push_str(&format!("<link rel=\"canonical\" href=\"{}\"/>\n", escape_html(href)));
        }
        out
    }

    /// Attributes for the `<html>` tag, without leading space.
    pub fn render_html_attributes(&self) -> String {
        self.html_attributes
            .iter()
            .map(|(name, value)| format!("{}=\"{}\"", escape_html(name), escape_html(value)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl SeoSink for SeoPage {
    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn add_meta(&mut self, kind: &str, name: &str, content: &str) {
        self.metas
            .entry(kind.to_string())
            .or_default()
            .insert(name.to_string(), content.to_string());
    }

    fn add_html_attributes(&mut self, name: &str, value: &str) {
        self.html_attributes.insert(name.to_string(), value.to_string());
    }
}

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
