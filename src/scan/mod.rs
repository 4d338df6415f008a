//! Scan module for searching the auction house
//!
//! This module contains the core scanning logic, including:
//! - Bounded-concurrency loading of page ranges
//! - Matching auctions by name keywords and lore text
//! - Cache-aware scan orchestration

mod loader;
mod matcher;
mod orchestrator;

pub use loader::{BatchLoader, DEFAULT_BATCH_WIDTH};
pub use matcher::{filter_and_sort, FoundItem, MatchCriteria};
pub use orchestrator::{ScanReport, ScanStatus, Scanner};
