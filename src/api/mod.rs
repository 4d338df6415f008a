//! Auction API access
//!
//! This module contains:
//! - Wire types for the paginated auctions endpoint
//! - The `PageSource` abstraction used by the scanner
//! - An HTTP implementation of `PageSource`

mod fetcher;
mod types;

pub use fetcher::{
    build_http_client, fetch_page, page_url, FetchResult, FirstPage, HttpPageSource, PageSource,
};
pub use types::{AuctionRecord, AuctionsResponse, RawAuction};
