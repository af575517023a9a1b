//! CMS page server.
//!
//! Serves configured pages over HTTP. Every request goes through the CMS
//! request listener, which binds it to a page, enforces locale and
//! publication rules and fills the SEO metadata of the rendered document.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client Request
//!   ──────────────▶ http server ──▶ routing ──▶ page listener ──▶ page handler ──▶ HTML
//!                   (request id,    (route       (manager, site,    (slug pages,
//!                    trace,          name,        locale, page,      render
//!                    timeout)        params)      SEO)               document)
//!
//!   Cross-cutting: config (+ watcher), observability, admin API, lifecycle
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use page_server::config::{load_config, CmsConfig, ConfigWatcher};
use page_server::lifecycle::shutdown::trigger_on_ctrl_c;
use page_server::observability::{logging, metrics};
use page_server::{CmsRuntime, HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "page-server")]
#[command(about = "Serves CMS pages over HTTP", long_about = None)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reload the configuration when the file changes.
    #[arg(short, long)]
    watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => CmsConfig::default(),
    };

    logging::init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "page-server starting");

    tracing::info!(
        bind_address = %config.listener.bind_address,
        sites = config.sites.len(),
        pages = config.pages.len(),
        serve_snapshots = config.cms.serve_snapshots,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    // The watcher stops when dropped, keep it alive for the whole run.
    let (config_updates, _watcher) = match &args.config {
        Some(path) if args.watch => {
            let (watcher, updates) = ConfigWatcher::new(path);
            (updates, Some(watcher.run()?))
        }
        _ => {
            let (_, updates) = mpsc::unbounded_channel();
            (updates, None)
        }
    };

    let shutdown = Shutdown::new();
    trigger_on_ctrl_c(shutdown.clone());

    let server = HttpServer::new(CmsRuntime::build(config)?);
    server.run(listener, config_updates, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
