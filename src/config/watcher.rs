//! Configuration file watcher for hot reload.
//!
//! The parent directory is watched, not the file: editors and deploy tools
//! often replace the file, which drops a watch held on the old inode.

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::config::loader::parse_config;
use crate::config::schema::CmsConfig;

/// Sends a freshly parsed [`CmsConfig`] whenever the file content changes.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<CmsConfig>,
}

impl ConfigWatcher {
    /// Returns the watcher and a receiver for validated configuration updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<CmsConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching. The returned watcher must be kept alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx;
        let path = self.path.clone();
        let file_name = path.file_name().map(ToOwned::to_owned);
        let last_content = Mutex::new(fs::read_to_string(&path).ok());

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    let ours = event
                        .paths
                        .iter()
                        .any(|p| p.file_name().map(ToOwned::to_owned) == file_name);
                    if !ours {
                        return;
                    }
                    let Ok(content) = fs::read_to_string(&path) else {
                        return;
                    };
                    let Ok(mut last) = last_content.lock() else {
                        return;
                    };
                    if let Some(config) = reload(&mut last, content) {
                        let _ = tx.send(config);
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Config watcher started");
        Ok(watcher)
    }
}

/// Parse `content` unless it matches what was last seen.
///
/// An invalid file is remembered too, so it is reported once per edit.
fn reload(last: &mut Option<String>, content: String) -> Option<CmsConfig> {
    if last.as_deref() == Some(content.as_str()) {
        return None;
    }

    let parsed = parse_config(&content);
    *last = Some(content);
    match parsed {
        Ok(config) => {
            tracing::info!("Config file changed, reloading");
            Some(config)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to reload config, keeping current configuration");
            None
        }
    }
}
