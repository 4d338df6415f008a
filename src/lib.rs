//! Auction-Scout: a cached auction house scanner
//!
//! This crate scans a paginated auction listing API, keeps the fetched pages
//! in a process-lifetime cache, and filters the cached listings by item name
//! and lore text, returning matches ordered by starting price.

pub mod api;
pub mod cache;
pub mod config;
pub mod output;
pub mod scan;

use thiserror::Error;

/// Main error type for Auction-Scout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Clipboard error: {0}")]
    Clipboard(#[from] output::ClipboardError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Auction-Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use api::{AuctionRecord, FirstPage, HttpPageSource, PageSource};
pub use cache::{PageCache, ScanState};
pub use config::Config;
pub use output::format_price;
pub use scan::{FoundItem, MatchCriteria, ScanStatus, Scanner};
