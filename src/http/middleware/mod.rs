//! HTTP middleware.

pub mod page_listener;

pub use page_listener::page_listener_middleware;
