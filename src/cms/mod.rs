//! CMS page resolution subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (route name, _locale, host, path)
//!     → request.rs (PageRequest, framework independent)
//!     → listener.rs (hybrid routes: manager → site → locale → page → SEO)
//!     → slug.rs (page_slug route: lookup by URL)
//!     → context.rs (PageContext: current page, site, SEO, read by renderers)
//!
//! Collaborators:
//!     selector.rs  → manager.rs (live pages or snapshots, per caller)
//!     decorator.rs → which routes get a CMS page
//!     store.rs     → pages + published snapshots
//! ```
//!
//! # Design Decisions
//! - Collaborators are traits injected as `Arc<dyn _>`
//! - Current page lives on the per-request context, never in shared state
//! - Two error kinds only; HTTP status mapping lives in the http layer

pub mod context;
pub mod decorator;
pub mod error;
pub mod listener;
pub mod manager;
pub mod page;
pub mod request;
pub mod selector;
pub mod slug;
pub mod store;

pub use context::PageContext;
pub use decorator::{DecoratorStrategy, PatternDecoratorStrategy};
pub use error::{CmsError, CmsResult};
pub use listener::RequestListener;
pub use manager::{CmsManager, ManagerKind, PageManager, SnapshotManager};
pub use page::{Page, PAGE_SLUG_ROUTE};
pub use request::PageRequest;
pub use selector::{CmsManagerSelector, EditorCmsManagerSelector};
pub use slug::SlugResolver;
pub use store::PageStore;
