//! Page caching
//!
//! This module keeps fetched auction pages for the lifetime of the process and
//! decides when they are too old to trust.

mod page_cache;
mod scan_state;

pub use page_cache::PageCache;
pub use scan_state::ScanState;
