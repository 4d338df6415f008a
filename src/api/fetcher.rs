//! HTTP page fetcher implementation
//!
//! This module handles all requests to the auction API, including:
//! - Building the HTTP client from configuration
//! - Fetching a single page of auctions
//! - Fetching page 0 together with the total page count
//! - Error classification
//!
//! No failure is propagated past this module: every failed page collapses
//! into `None` after being logged.

use crate::api::types::{AuctionRecord, AuctionsResponse};
use crate::config::ApiConfig;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Result of a page fetch
#[derive(Debug)]
pub enum FetchResult {
    /// The API returned `success: true`
    Success {
        /// Auctions on this page
        records: Vec<AuctionRecord>,
        /// Total page count, when the API reports it
        total_pages: Option<u32>,
    },

    /// The API answered `success: false`
    ApiFailure {
        /// The reported cause
        cause: String,
    },

    /// Non-success HTTP status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, etc.)
    NetworkError {
        /// Error description
        error: String,
    },

    /// Body was not a valid auctions response
    DecodeError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Classifies a decoded response body
    pub fn from_response(response: AuctionsResponse) -> Self {
        if !response.success {
            return FetchResult::ApiFailure {
                cause: response
                    .cause
                    .unwrap_or_else(|| "unknown cause".to_string()),
            };
        }

        FetchResult::Success {
            records: response
                .auctions
                .unwrap_or_default()
                .into_iter()
                .map(AuctionRecord::from)
                .collect(),
            total_pages: response.total_pages,
        }
    }

    /// Returns true if the API delivered a page
    pub fn is_success(&self) -> bool {
        matches!(self, FetchResult::Success { .. })
    }

    /// Collapses the result into the page sentinel, logging any failure
    ///
    /// # Returns
    ///
    /// * `Some(records)` - The page was delivered
    /// * `None` - The page is absent for this scan
    pub fn into_records(self, page: u32) -> Option<Vec<AuctionRecord>> {
        match self {
            FetchResult::Success { records, .. } => Some(records),
            failure => {
                failure.log_failure(page);
                None
            }
        }
    }

    /// Logs why `page` was not delivered; does nothing for a success
    pub fn log_failure(&self, page: u32) {
        match self {
            FetchResult::Success { .. } => {}
            FetchResult::ApiFailure { cause } => {
                tracing::warn!("API reported failure for page {}: {}", page, cause);
            }
            FetchResult::HttpError { status_code } => {
                tracing::warn!("Failed to fetch page {}: HTTP {}", page, status_code);
            }
            FetchResult::NetworkError { error } => {
                tracing::warn!("Failed to fetch page {}: {}", page, error);
            }
            FetchResult::DecodeError { error } => {
                tracing::warn!("Failed to decode page {}: {}", page, error);
            }
        }
    }
}

/// Page 0 together with the page count it reported
#[derive(Debug, Clone, PartialEq)]
pub struct FirstPage {
    /// Total number of pages
    pub total_pages: u32,

    /// Auctions on page 0
    pub records: Vec<AuctionRecord>,
}

/// A paginated source of auction records
///
/// Implementations never fail loudly: a missing page is reported as `None`.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches one page, returning `None` if it could not be delivered
    async fn fetch_page(&self, page: u32) -> Option<Vec<AuctionRecord>>;

    /// Fetches page 0 along with the total page count, returning `None` on failure
    async fn fetch_first_page(&self) -> Option<FirstPage>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The API configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &ApiConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Builds the URL for a given page
pub fn page_url(base: &Url, page: u32) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut().append_pair("page", &page.to_string());
    url
}

/// Fetches a single page and classifies the outcome
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `base` - The auctions endpoint
/// * `page` - Zero-based page index
pub async fn fetch_page(client: &Client, base: &Url, page: u32) -> FetchResult {
    let url = page_url(base, page);
    tracing::debug!("Fetching page {}...", page);

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection refused".to_string()
            } else {
                e.to_string()
            };
            return FetchResult::NetworkError { error };
        }
    };

    let status = response.status();
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            return FetchResult::NetworkError {
                error: e.to_string(),
            }
        }
    };

    // The API reports logical failures with a JSON body even on 4xx
    match serde_json::from_str::<AuctionsResponse>(&body) {
        Ok(decoded) => FetchResult::from_response(decoded),
        Err(_) if !status.is_success() => FetchResult::HttpError {
            status_code: status.as_u16(),
        },
        Err(e) => FetchResult::DecodeError {
            error: e.to_string(),
        },
    }
}

/// Page source backed by the live HTTP API
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: Client,
    base_url: Url,
}

impl HttpPageSource {
    /// Creates a page source from the API configuration
    pub fn new(config: &ApiConfig) -> crate::Result<Self> {
        let client = build_http_client(config)?;
        let base_url = Url::parse(&config.base_url)?;
        Ok(Self { client, base_url })
    }

    /// Creates a page source with a pre-built client
    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// The endpoint pages are fetched from
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_page(&self, page: u32) -> Option<Vec<AuctionRecord>> {
        let records = fetch_page(&self.client, &self.base_url, page)
            .await
            .into_records(page)?;
        tracing::debug!("Done fetching page {} ({} auctions)", page, records.len());
        Some(records)
    }

    async fn fetch_first_page(&self) -> Option<FirstPage> {
        match fetch_page(&self.client, &self.base_url, 0).await {
            FetchResult::Success {
                records,
                total_pages,
            } => {
                let total_pages = total_pages.unwrap_or_else(|| {
                    tracing::debug!("Page 0 carried no totalPages, assuming a single page");
                    1
                });
                Some(FirstPage {
                    total_pages,
                    records,
                })
            }
            failure => {
                failure.log_failure(0);
                None
            }
        }
    }
}
