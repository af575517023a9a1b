//! In-memory page storage with published snapshots.
//!
//! Live pages are what editors work on; snapshots are the frozen copies
//! served to visitors. `publish` replaces a site's snapshots with its
//! current live pages.

use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use crate::cms::page::Page;

/// Pages keyed by page id.
type PageMap = DashMap<u64, Arc<Page>>;

#[derive(Debug, Default)]
pub struct PageStore {
    pages: PageMap,
    snapshots: PageMap,
    writes: Mutex<()>,
}

impl PageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given live pages.
    pub fn from_pages(pages: impl IntoIterator<Item = Page>) -> Self {
        let store = Self::new();
        for page in pages {
            store.upsert(page);
        }
        store
    }

    /// Insert or replace a live page by id. Returns the replaced page.
    pub fn upsert(&self, page: Page) -> Option<Arc<Page>> {
        let _guard = self.writes.lock().unwrap_or_else(PoisonError::into_inner);
        self.pages.insert(page.id, Arc::new(page))
    }

    /// Like [`upsert`](Self::upsert), but only once `check` accepts the page
    /// against the live pages of its site. No other write runs in between.
    pub fn upsert_checked<E>(
        &self,
        page: Page,
        check: impl FnOnce(&Page, &[Arc<Page>]) -> Result<(), E>,
    ) -> Result<Option<Arc<Page>>, E> {
        let _guard = self.writes.lock().unwrap_or_else(PoisonError::into_inner);
        check(&page, &Self::list(&self.pages, Some(page.site_id)))?;
        Ok(self.pages.insert(page.id, Arc::new(page)))
    }

    pub fn page(&self, site_id: u64, route_name: &str) -> Option<Arc<Page>> {
        Self::find(&self.pages, site_id, |p| p.route_name == route_name)
    }

    pub fn page_by_url(&self, site_id: u64, url: &str) -> Option<Arc<Page>> {
        Self::find(&self.pages, site_id, |p| p.url.as_deref() == Some(url))
    }

    pub fn snapshot(&self, site_id: u64, route_name: &str) -> Option<Arc<Page>> {
        Self::find(&self.snapshots, site_id, |p| p.route_name == route_name)
    }

    pub fn snapshot_by_url(&self, site_id: u64, url: &str) -> Option<Arc<Page>> {
        Self::find(&self.snapshots, site_id, |p| p.url.as_deref() == Some(url))
    }

    /// Replace the snapshots of a site with its live pages.
    /// Returns the number of published pages.
    ///
    /// New snapshots are inserted before stale ones are dropped, so a page
    /// published before and after never goes missing for readers.
    pub fn publish(&self, site_id: u64) -> usize {
        // Stored pages are never mutated in place.
        let live: Vec<(u64, Arc<Page>)> = self
            .pages
            .iter()
            .filter(|r| r.value().site_id == site_id)
            .map(|r| (*r.key(), r.value().clone()))
            .collect();
        let live_ids: HashSet<u64> = live.iter().map(|(id, _)| *id).collect();

        for (id, page) in live {
            self.snapshots.insert(id, page);
        }
        self.snapshots
            .retain(|id, page| page.site_id != site_id || live_ids.contains(id));

        let published = live_ids.len();
        tracing::info!(site_id, published, "Published page snapshots");
        published
    }

    /// Live pages, sorted by id. `None` lists every site.
    pub fn pages(&self, site_id: Option<u64>) -> Vec<Arc<Page>> {
        Self::list(&self.pages, site_id)
    }

    pub fn snapshots(&self, site_id: Option<u64>) -> Vec<Arc<Page>> {
        Self::list(&self.snapshots, site_id)
    }

    pub fn count(&self) -> usize {
        self.pages.len()
    }

    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }

    /// Lowest-id page of the site accepted by `pred`.
    fn find(map: &PageMap, site_id: u64, pred: impl Fn(&Page) -> bool) -> Option<Arc<Page>> {
        map.iter()
            .filter(|r| r.value().site_id == site_id && pred(r.value()))
            .min_by_key(|r| *r.key())
            .map(|r| r.value().clone())
    }

    fn list(map: &PageMap, site_id: Option<u64>) -> Vec<Arc<Page>> {
        let mut pages: Vec<_> = map
            .iter()
            .filter(|r| site_id.map_or(true, |id| r.value().site_id == id))
            .map(|r| r.value().clone())
            .collect();
        pages.sort_by_key(|p| p.id);
        pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::page::{test_page, PAGE_SLUG_ROUTE};

    fn slug_page(id: u64, url: &str) -> Page {
        let mut page = test_page(id, PAGE_SLUG_ROUTE);
        page.url = Some(url.to_string());
        page
    }

    #[test]
    fn test_lookup_by_route_and_url() {
        let mut contact = test_page(1, "contact");
        contact.url = Some("/contact".into());
        let store = PageStore::from_pages(vec![contact, slug_page(2, "/about"), slug_page(3, "/team")]);

        assert_eq!(store.count(), 3);
        assert_eq!(store.page(1, "contact").unwrap().id, 1);
        assert_eq!(store.page(1, PAGE_SLUG_ROUTE).unwrap().id, 2);
        assert!(store.page(2, "contact").is_none());
        assert_eq!(store.page_by_url(1, "/about").unwrap().id, 2);
        assert_eq!(store.page_by_url(1, "/team").unwrap().id, 3);
        assert!(store.page_by_url(1, "/missing").is_none());
    }

    #[test]
    fn test_upsert_checked_rejects_without_writing() {
        let store = PageStore::from_pages(vec![test_page(1, "contact")]);

        let rejected = store.upsert_checked(test_page(2, "contact"), |page, site_pages| {
            if site_pages.iter().any(|p| p.id != page.id && p.route_name == page.route_name) {
                Err("taken")
            } else {
                Ok(())
            }
        });
        assert_eq!(rejected, Err("taken"));
        assert_eq!(store.count(), 1);

        let accepted = store.upsert_checked(test_page(3, "home"), |_, site_pages| {
            assert_eq!(site_pages.len(), 1);
            Ok::<_, ()>(())
        });
        assert!(accepted.unwrap().is_none());
        assert_eq!(store.count(), 2);
    }

    #[test]
    fn test_publish_replaces_snapshots() {
        let store = PageStore::from_pages(vec![test_page(1, "home")]);
        assert!(store.snapshot(1, "home").is_none());

        assert_eq!(store.publish(1), 1);
        assert_eq!(store.snapshot(1, "home").unwrap().name, "Page 1");

        // Live edits are invisible until the next publish.
        let mut edited = test_page(1, "home");
        edited.name = "Edited".into();
        store.upsert(edited);
        assert_eq!(store.snapshot(1, "home").unwrap().name, "Page 1");
        assert_eq!(store.page(1, "home").unwrap().name, "Edited");

        store.publish(1);
        assert_eq!(store.snapshot(1, "home").unwrap().name, "Edited");
        assert_eq!(store.snapshot_count(), 1);
    }

    #[test]
    fn test_publish_drops_removed_pages() {
        let store = PageStore::from_pages(vec![test_page(1, "home"), test_page(2, "contact")]);
        store.publish(1);
        assert_eq!(store.snapshot_count(), 2);

        let mut moved = test_page(2, "contact");
        moved.site_id = 2;
        store.upsert(moved);

        assert_eq!(store.publish(1), 1);
        assert!(store.snapshot(1, "contact").is_none());
        assert_eq!(store.snapshot(1, "home").unwrap().id, 1);
    }

    #[test]
    fn test_publish_keeps_snapshots_visible() {
        use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
        use std::thread;

        let store = Arc::new(PageStore::from_pages(vec![
            test_page(1, "home"),
            test_page(2, "contact"),
            slug_page(3, "/about"),
        ]));
        store.publish(1);

        let done = Arc::new(AtomicBool::new(false));
        let misses = Arc::new(AtomicUsize::new(0));
        let reader = {
            let (store, done, misses) = (store.clone(), done.clone(), misses.clone());
            thread::spawn(move || {
                while !done.load(Ordering::Relaxed) {
                    if store.snapshot(1, "home").is_none()
                        || store.snapshot_by_url(1, "/about").is_none()
                    {
                        misses.fetch_add(1, Ordering::Relaxed);
                    }
                }
            })
        };

        for _ in 0..5_000 {
            store.publish(1);
        }
        done.store(true, Ordering::Relaxed);
        reader.join().unwrap();

        assert_eq!(misses.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_publish_is_per_site() {
        let mut other = test_page(2, "home");
        other.site_id = 2;
        let store = PageStore::from_pages(vec![test_page(1, "home"), other]);

        store.publish(2);
        assert!(store.snapshot(1, "home").is_none());
        assert_eq!(store.snapshots(Some(2)).len(), 1);
        assert_eq!(store.pages(None).len(), 2);
    }
}
