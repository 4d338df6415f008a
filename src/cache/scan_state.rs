//! Refresh bookkeeping for the page cache

use crate::cache::PageCache;
use chrono::{DateTime, Duration, Utc};

/// Tracks when the page cache was last fully refreshed
///
/// The cache is authoritative only while it is non-empty and the last refresh
/// happened less than `staleness_window` ago.
#[derive(Debug, Clone)]
pub struct ScanState {
    /// When the last full refresh completed
    pub last_refresh: Option<DateTime<Utc>>,

    /// How long a refresh is trusted
    pub staleness_window: Duration,
}

impl ScanState {
    /// Creates a state that has never refreshed
    pub fn new(staleness_window: Duration) -> Self {
        Self {
            last_refresh: None,
            staleness_window,
        }
    }

    /// Creates a state from a window expressed in seconds
    pub fn with_staleness_secs(secs: u64) -> Self {
        Self::new(Duration::seconds(secs.min(i64::MAX as u64 / 1000) as i64))
    }

    /// Checks if the last refresh is older than the staleness window
    ///
    /// A state that has never refreshed is always stale.
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        match self.last_refresh {
            Some(at) => now - at >= self.staleness_window,
            None => true,
        }
    }

    /// Returns true if `cache` can be scanned without refetching
    pub fn is_authoritative(&self, cache: &PageCache, now: DateTime<Utc>) -> bool {
        !cache.is_empty() && !self.is_stale(now)
    }

    /// Records a completed refresh
    pub fn mark_refreshed(&mut self, at: DateTime<Utc>) {
        self.last_refresh = Some(at);
    }

    /// Returns the age of the last refresh, if any
    pub fn age(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.last_refresh.map(|at| now - at)
    }
}

impl Default for ScanState {
    fn default() -> Self {
        Self::with_staleness_secs(10)
    }
}
