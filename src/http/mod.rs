//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace, timeout)
//!     → request.rs (host, path, route, bearer token → PageRequest)
//!     → middleware/page_listener.rs (RequestListener, PageContext)
//!     → handlers.rs (slug pages, render current page)
//!     → response.rs (HTML document, CmsError → status code)
//!     → Send to client
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;
pub mod state;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::HttpServer;
pub use state::{AppState, CmsRuntime};
