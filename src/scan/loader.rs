//! Bounded-concurrency page loading
//!
//! Pages are fetched in consecutive chunks of at most `width` pages. All
//! uncached pages of a chunk are requested together and the whole chunk
//! settles before the next one starts, so the API never sees more than
//! `width` requests in flight from one loader.

use crate::api::PageSource;
use crate::cache::PageCache;
use futures::future::join_all;

/// Default number of concurrent page fetches
pub const DEFAULT_BATCH_WIDTH: usize = 5;

/// Fetches ranges of pages into a `PageCache`
#[derive(Debug, Clone, Copy)]
pub struct BatchLoader {
    width: usize,
}

impl BatchLoader {
    /// Creates a loader; a width of zero is treated as one
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
        }
    }

    /// Maximum number of fetches in flight
    pub fn width(&self) -> usize {
        self.width
    }

    /// Fetches every uncached page in `start..=end`
    ///
    /// Pages that fail to load are left out of the cache; one failure does
    /// not affect the rest of the range.
    ///
    /// # Returns
    ///
    /// The number of pages requested from the source (cache misses), whether
    /// or not they loaded.
    pub async fn load_range(
        &self,
        source: &dyn PageSource,
        cache: &mut PageCache,
        start: u32,
        end: u32,
    ) -> usize {
        if start > end {
            return 0;
        }

        let span = u32::try_from(self.width - 1).unwrap_or(u32::MAX);
        let mut fetched = 0;
        let mut chunk_start = start;

        loop {
            let chunk_end = chunk_start.saturating_add(span).min(end);
            let missing: Vec<u32> = (chunk_start..=chunk_end)
                .filter(|page| !cache.has(*page))
                .collect();

            if !missing.is_empty() {
                tracing::debug!(
                    "Fetching {} pages in chunk {}..={}",
                    missing.len(),
                    chunk_start,
                    chunk_end
                );

                let results = join_all(
                    missing
                        .iter()
                        .map(|&page| async move { (page, source.fetch_page(page).await) }),
                )
                .await;

                fetched += results.len();
                for (page, records) in results {
                    if let Some(records) = records {
                        cache.set(page, records);
                    }
                }
            }

            if chunk_end == end {
                break;
            }
            chunk_start = chunk_end + 1;
        }

        fetched
    }
}

impl Default for BatchLoader {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_WIDTH)
    }
}
