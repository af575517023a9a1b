//! SEO metadata subsystem.
//!
//! # Data Flow
//! ```text
//! [seo] config defaults
//!     → SeoPage::from_config (one per request)
//!     → listener / slug resolver write page title and metas (SeoSink)
//!     → http handler renders <title>, <meta>, <html ...>
//! ```

pub mod page;

pub use page::{escape_html, SeoPage};

/// Write side of the SEO metadata, as used by the request listener.
pub trait SeoSink {
    /// Replace the document title.
    fn set_title(&mut self, title: &str);

    /// Add (or replace) a meta tag, e.g. `("name", "description", "...")`.
    fn add_meta(&mut self, kind: &str, name: &str, content: &str);

    /// Add (or replace) an attribute on the `<html>` tag.
    fn add_html_attributes(&mut self, name: &str, value: &str);
}
