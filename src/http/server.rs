//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with page, admin and health handlers
//! - Wire up middleware (request ID, tracing, timeout, page listener)
//! - Apply configuration reloads
//! - Serve until shutdown

use axum::{
    body::Body,
    http::Request,
    middleware,
    routing::{any, get},
    Router,
};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::admin;
use crate::config::CmsConfig;
use crate::http::handlers::{health, page_handler};
use crate::http::middleware::page_listener_middleware;
use crate::http::request::{request_id, UuidRequestId};
use crate::http::state::{AppState, CmsRuntime};
use crate::lifecycle::Shutdown;

/// HTTP server for the page runtime.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server around a built runtime.
    pub fn new(runtime: CmsRuntime) -> Self {
        let request_secs = runtime.config.timeouts.request_secs;
        let state = AppState::new(runtime);
        let router = Self::build_router(state.clone(), Duration::from_secs(request_secs));
        Self { router, state }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: AppState, request_timeout: Duration) -> Router {
        let pages = Router::new()
            .route("/", any(page_handler))
            .route("/{*path}", any(page_handler))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                page_listener_middleware,
            ));

        Router::new()
            .route("/health", get(health))
            .merge(admin::router(state.clone()))
            .merge(pages)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                    .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                        tracing::info_span!(
                            "request",
                            method = %req.method(),
                            uri = %req.uri(),
                            request_id = %request_id(req),
                        )
                    }))
                    .layer(TimeoutLayer::new(request_timeout))
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// Shared state, e.g. to swap the runtime from outside.
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<CmsConfig>,
        shutdown: Shutdown,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let state = self.state.clone();
        tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                match CmsRuntime::build(config) {
                    Ok(runtime) => {
                        state.swap(runtime);
                        tracing::info!("Configuration reloaded");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to apply config, keeping current runtime");
                    }
                }
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move { shutdown.wait().await })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
