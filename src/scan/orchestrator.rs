//! Scan orchestration
//!
//! The `Scanner` owns the page cache and decides, per scan, whether the cache
//! can be trusted or must be rebuilt from the API:
//! 1. An empty or stale cache is cleared and refilled, window by window,
//!    across every page the API reports
//! 2. A fresh cache is used as-is, without any request
//! 3. Every cached record is matched and the matches are sorted by price

use crate::api::{HttpPageSource, PageSource};
use crate::cache::{PageCache, ScanState};
use crate::config::{Config, ScanConfig};
use crate::output::{ResultEntry, ResultPresenter};
use crate::scan::loader::BatchLoader;
use crate::scan::matcher::{filter_and_sort, FoundItem, MatchCriteria};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shareable view of whether a scan is running
///
/// Front ends clone this handle to disable their search trigger while a scan
/// is in flight.
#[derive(Debug, Clone, Default)]
pub struct ScanStatus {
    scanning: Arc<AtomicBool>,
}

impl ScanStatus {
    /// Returns true while a scan is in progress
    pub fn is_scanning(&self) -> bool {
        self.scanning.load(Ordering::SeqCst)
    }
}

/// Sets the scanning flag for its lifetime
struct ScanGuard {
    scanning: Arc<AtomicBool>,
}

impl ScanGuard {
    fn begin(status: &ScanStatus) -> Self {
        status.scanning.store(true, Ordering::SeqCst);
        Self {
            scanning: status.scanning.clone(),
        }
    }
}

impl Drop for ScanGuard {
    fn drop(&mut self) {
        self.scanning.store(false, Ordering::SeqCst);
    }
}

/// Statistics for one scan
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanReport {
    /// Whether the cache was rebuilt for this scan
    pub refreshed: bool,

    /// Page count reported by the API (0 when no refresh happened)
    pub total_pages: u32,

    /// Pages requested by the batch loader (page 0 arrives with the page count)
    pub pages_fetched: usize,

    /// Pages in the cache when filtering started
    pub pages_cached: usize,

    /// Records examined by the matcher
    pub records_scanned: usize,

    /// Number of matches
    pub matches: usize,

    /// Wall time of the scan
    pub elapsed: Duration,
}

/// Cached, incremental auction scanner
pub struct Scanner<S: PageSource> {
    source: S,
    cache: PageCache,
    state: ScanState,
    loader: BatchLoader,
    window_size: u32,
    status: ScanStatus,
    last_report: Option<ScanReport>,
}

impl Scanner<HttpPageSource> {
    /// Creates a scanner for the live API described by `config`
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        let source = HttpPageSource::new(&config.api)?;
        Ok(Self::new(source, &config.scan))
    }
}

impl<S: PageSource> Scanner<S> {
    /// Creates a scanner over `source` with an empty cache
    pub fn new(source: S, config: &ScanConfig) -> Self {
        Self::with_parts(
            source,
            BatchLoader::new(config.batch_width),
            ScanState::with_staleness_secs(config.staleness_secs),
            config.window_size,
        )
    }

    /// Creates a scanner from explicit parts
    pub fn with_parts(source: S, loader: BatchLoader, state: ScanState, window_size: u32) -> Self {
        Self {
            source,
            cache: PageCache::new(),
            state,
            loader,
            window_size: window_size.max(1),
            status: ScanStatus::default(),
            last_report: None,
        }
    }

    /// Handle for observing whether a scan is running
    pub fn status(&self) -> ScanStatus {
        self.status.clone()
    }

    /// The page cache
    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    /// Refresh bookkeeping
    pub fn state(&self) -> &ScanState {
        &self.state
    }

    /// The underlying page source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Statistics of the most recent scan
    pub fn last_report(&self) -> Option<&ScanReport> {
        self.last_report.as_ref()
    }

    /// Scans for auctions matching `criteria`, cheapest first
    pub async fn scan(&mut self, criteria: &MatchCriteria) -> Vec<FoundItem> {
        self.scan_at(criteria, Utc::now()).await
    }

    /// Scans using `now` to judge cache freshness
    pub async fn scan_at(&mut self, criteria: &MatchCriteria, now: DateTime<Utc>) -> Vec<FoundItem> {
        let _guard = ScanGuard::begin(&self.status);
        let started = Instant::now();
        tracing::info!("Scanning...");

        let mut report = ScanReport::default();

        if self.state.is_authoritative(&self.cache, now) {
            tracing::debug!(
                "Using cached pages ({} pages, refreshed {:?} ago)",
                self.cache.len(),
                self.state.age(now)
            );
        } else {
            let (total_pages, pages_fetched) = self.refresh_at(now).await;
            report.refreshed = true;
            report.total_pages = total_pages;
            report.pages_fetched = pages_fetched;
        }

        let found = filter_and_sort(self.cache.records(), criteria);

        report.pages_cached = self.cache.len();
        report.records_scanned = self.cache.record_count();
        report.matches = found.len();
        report.elapsed = started.elapsed();

        tracing::info!(
            "Scan complete: {} matches in {} auctions across {} pages ({:?})",
            report.matches,
            report.records_scanned,
            report.pages_cached,
            report.elapsed
        );

        self.last_report = Some(report);
        found
    }

    /// Rebuilds the cache from the API
    ///
    /// # Returns
    ///
    /// The reported page count and the number of pages the batch loader requested.
    pub async fn refresh(&mut self) -> (u32, usize) {
        self.refresh_at(Utc::now()).await
    }

    /// Rebuilds the cache, recording `now` as the refresh time
    async fn refresh_at(&mut self, now: DateTime<Utc>) -> (u32, usize) {
        let first_page = self.source.fetch_first_page().await;
        let total_pages = first_page.as_ref().map_or(0, |first| first.total_pages);
        if first_page.is_none() {
            tracing::warn!("Could not determine page count, nothing to scan");
        }

        tracing::info!("Refreshing cache across {} pages", total_pages);
        self.cache.clear();

        // Page 0 came with the count, so the loader finds it cached
        if let Some(first) = first_page.filter(|_| total_pages > 0) {
            self.cache.set(0, first.records);
        }

        let mut pages_fetched = 0;
        let mut window_start = 0u32;
        while window_start < total_pages {
            let window_end = window_start
                .saturating_add(self.window_size - 1)
                .min(total_pages - 1);

            pages_fetched += self
                .loader
                .load_range(&self.source, &mut self.cache, window_start, window_end)
                .await;

            tracing::debug!(
                "Loaded pages {}..={} ({} cached)",
                window_start,
                window_end,
                self.cache.len()
            );
            window_start = window_end + 1;
        }

        let missing = (total_pages as usize).saturating_sub(self.cache.len());
        if missing > 0 {
            tracing::warn!("{} of {} pages could not be loaded", missing, total_pages);
        }

        self.state.mark_refreshed(now);
        (total_pages, pages_fetched)
    }

    /// Scans and hands every match to `presenter`, cheapest first
    pub async fn scan_and_present(
        &mut self,
        criteria: &MatchCriteria,
        presenter: &mut dyn ResultPresenter,
    ) -> crate::Result<Vec<FoundItem>> {
        let found = self.scan(criteria).await;

        presenter.begin()?;
        for item in &found {
            presenter.present(ResultEntry::from_item(item))?;
        }
        presenter.finish()?;

        Ok(found)
    }
}
