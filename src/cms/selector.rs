//! CMS manager selection upon caller permission.

use std::sync::Arc;

use crate::cms::manager::CmsManager;
use crate::cms::request::PageRequest;

pub trait CmsManagerSelector: Send + Sync {
    /// Manager for this request, or `None` when the CMS is unavailable.
    fn retrieve(&self, request: &PageRequest) -> Option<Arc<dyn CmsManager>>;

    /// Whether the caller is allowed to see disabled pages.
    fn is_editor(&self, request: &PageRequest) -> bool;
}

/// Editors get the live pages, visitors the published snapshots.
pub struct EditorCmsManagerSelector {
    page_manager: Arc<dyn CmsManager>,
    snapshot_manager: Option<Arc<dyn CmsManager>>,
    editor_token: Option<String>,
}

impl EditorCmsManagerSelector {
    /// `snapshot_manager` set to `None` serves live pages to everyone.
    pub fn new(
        page_manager: Arc<dyn CmsManager>,
        snapshot_manager: Option<Arc<dyn CmsManager>>,
        editor_token: Option<String>,
    ) -> Self {
        Self {
            page_manager,
            snapshot_manager,
            editor_token: editor_token.filter(|t| !t.is_empty()),
        }
    }
}

impl CmsManagerSelector for EditorCmsManagerSelector {
    fn retrieve(&self, request: &PageRequest) -> Option<Arc<dyn CmsManager>> {
        if self.is_editor(request) {
            return Some(self.page_manager.clone());
        }
        Some(
            self.snapshot_manager
                .clone()
                .unwrap_or_else(|| self.page_manager.clone()),
        )
    }

    fn is_editor(&self, request: &PageRequest) -> bool {
        match (&self.editor_token, request.bearer_token()) {
            (Some(expected), Some(given)) => expected == given,
            _ => false,
        }
    }
}
