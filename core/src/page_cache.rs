use catalog_protocol::Page;
use std::collections::BTreeMap;

/// Pages of the active query that are currently resident, keyed by index.
///
/// Knows nothing about scrolling; the window decides what goes in and out.
#[derive(Debug, Default, Clone)]
pub struct PageCache {
    pages: BTreeMap<usize, Page>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Option<&Page> {
        self.pages.get(&index)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.pages.contains_key(&index)
    }

    /// Inserts `page`, replacing whatever was stored under its index.
    pub fn put(&mut self, page: Page) {
        self.pages.insert(page.index, page);
    }

    /// Drops the page at `index`. Evicting an absent page is a no-op.
    pub fn evict(&mut self, index: usize) -> Option<Page> {
        self.pages.remove(&index)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Resident page indices in ascending order.
    pub fn indices(&self) -> Vec<usize> {
        self.pages.keys().copied().collect()
    }
}
