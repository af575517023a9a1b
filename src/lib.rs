//! CMS page server library.

pub mod admin;
pub mod cms;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod seo;
pub mod site;

pub use cms::{CmsError, RequestListener};
pub use config::CmsConfig;
pub use http::{CmsRuntime, HttpServer};
pub use lifecycle::Shutdown;
