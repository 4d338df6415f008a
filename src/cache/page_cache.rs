//! Process-lifetime cache of fetched auction pages

use crate::api::AuctionRecord;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Mapping from page number to the auctions on that page
///
/// Pages are stored as shared immutable slices: once set, a page's records are
/// never modified, only dropped by `clear` and replaced by a later fetch.
/// Iteration is always in ascending page order.
#[derive(Debug, Clone, Default)]
pub struct PageCache {
    pages: BTreeMap<u32, Arc<[AuctionRecord]>>,
}

impl PageCache {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the page has been fetched since the last clear
    pub fn has(&self, page: u32) -> bool {
        self.pages.contains_key(&page)
    }

    /// Returns the records of a cached page
    pub fn get(&self, page: u32) -> Option<Arc<[AuctionRecord]>> {
        self.pages.get(&page).cloned()
    }

    /// Stores the records of a page, replacing any previous entry
    pub fn set(&mut self, page: u32, records: Vec<AuctionRecord>) {
        self.pages.insert(page, records.into());
    }

    /// Drops every cached page
    pub fn clear(&mut self) {
        self.pages.clear();
    }

    /// Iterates over cached pages in ascending page order
    pub fn all_entries(&self) -> impl Iterator<Item = (u32, &[AuctionRecord])> + '_ {
        self.pages.iter().map(|(page, records)| (*page, &records[..]))
    }

    /// Iterates over every cached record, page by page
    pub fn records(&self) -> impl Iterator<Item = &AuctionRecord> + '_ {
        self.pages.values().flat_map(|records| records.iter())
    }

    /// Number of cached pages
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Returns true if no page is cached
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Total number of cached records across all pages
    pub fn record_count(&self) -> usize {
        self.pages.values().map(|records| records.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> AuctionRecord {
        AuctionRecord {
            name: format!("Item {}", id),
            lore: String::new(),
            starting_price: 100.0,
            id: id.to_string(),
        }
    }

    #[test]
    fn test_set_and_get() {
        let mut cache = PageCache::new();
        assert!(cache.is_empty());
        assert!(!cache.has(0));

        cache.set(0, vec![record("a"), record("b")]);

        assert!(cache.has(0));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.record_count(), 2);
        assert_eq!(cache.get(0).unwrap()[1].id, "b");
        assert!(cache.get(1).is_none());
    }

    #[test]
    fn test_empty_page_is_still_cached() {
        let mut cache = PageCache::new();
        cache.set(4, vec![]);

        assert!(cache.has(4));
        assert!(!cache.is_empty());
        assert_eq!(cache.record_count(), 0);
    }

    #[test]
    fn test_entries_in_ascending_page_order() {
        let mut cache = PageCache::new();
        cache.set(2, vec![record("c")]);
        cache.set(0, vec![record("a")]);
        cache.set(1, vec![record("b")]);

        let pages: Vec<u32> = cache.all_entries().map(|(page, _)| page).collect();
        assert_eq!(pages, vec![0, 1, 2]);

        let ids: Vec<&str> = cache.records().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_clear() {
        let mut cache = PageCache::new();
        cache.set(0, vec![record("a")]);
        cache.set(1, vec![record("b")]);

        cache.clear();

        assert!(cache.is_empty());
        assert!(!cache.has(0));
        assert_eq!(cache.record_count(), 0);
    }

    #[test]
    fn test_handed_out_page_survives_replacement() {
        let mut cache = PageCache::new();
        cache.set(0, vec![record("old")]);
        let before = cache.get(0).unwrap();

        cache.clear();
        cache.set(0, vec![record("new")]);

        assert_eq!(before[0].id, "old");
        assert_eq!(cache.get(0).unwrap()[0].id, "new");
    }
}
