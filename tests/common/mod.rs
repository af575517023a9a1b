//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use page_server::cms::{Page, PAGE_SLUG_ROUTE};
use page_server::config::{CmsConfig, RouteConfig};
use page_server::site::Site;
use page_server::{CmsRuntime, HttpServer, Shutdown};

pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub config_updates: mpsc::UnboundedSender<CmsConfig>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a page server on an ephemeral port.
pub async fn start_server(config: CmsConfig) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (config_updates, updates_rx) = mpsc::unbounded_channel();
    let shutdown = Shutdown::new();
    let server = HttpServer::new(CmsRuntime::build(config).unwrap());

    let server_shutdown = shutdown.clone();
    tokio::spawn(async move {
        server.run(listener, updates_rx, server_shutdown).await.unwrap();
    });

    TestServer {
        addr,
        shutdown,
        config_updates,
    }
}

pub fn route(name: &str, path: &str) -> RouteConfig {
    RouteConfig {
        name: name.into(),
        path: path.into(),
        host: None,
        priority: 0,
        defaults: HashMap::new(),
    }
}

pub fn site(id: u64) -> Site {
    Site {
        id,
        name: format!("Site {}", id),
        host: "localhost".into(),
        relative_path: None,
        locale: None,
        enabled: true,
        is_default: true,
    }
}

pub fn page(id: u64, route_name: &str) -> Page {
    Page {
        id,
        site_id: 1,
        route_name: route_name.into(),
        name: format!("Page {}", id),
        url: None,
        title: None,
        meta_description: None,
        meta_keyword: None,
        enabled: true,
        body: None,
    }
}

/// One site, a `contact` route, a slug catch-all and two pages on them.
pub fn base_config() -> CmsConfig {
    let mut config = CmsConfig::default();
    config.sites = vec![site(1)];

    let mut slug = route(PAGE_SLUG_ROUTE, "/{*path}");
    slug.priority = -10;
    config.routes = vec![
        route("contact", "/contact"),
        route("api_contact", "/api/contact"),
        slug,
    ];

    let mut contact = page(1, "contact");
    contact.title = Some("Contact us".into());
    contact.meta_description = Some("How to reach us".into());
    contact.meta_keyword = Some("contact, email".into());
    contact.body = Some("<p>Write to us.</p>".into());

    let mut about = page(2, PAGE_SLUG_ROUTE);
    about.url = Some("/about".into());
    about.title = Some("About".into());

    config.pages = vec![contact, about];
    config
}
