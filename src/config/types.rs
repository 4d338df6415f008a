use serde::Deserialize;

/// Default auction listing endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.hypixel.net/skyblock/auctions";

/// Main configuration structure for Auction-Scout
///
/// Every section is optional; a missing file or section falls back to the
/// defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub clipboard: ClipboardConfig,
}

/// Remote auction API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Endpoint that serves auction pages via a `page` query parameter
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// Total request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(
        rename = "connect-timeout-secs",
        default = "default_connect_timeout_secs"
    )]
    pub connect_timeout_secs: u64,

    /// User agent sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Scan and cache behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    /// Maximum number of page fetches in flight at once
    #[serde(rename = "batch-width", default = "default_batch_width")]
    pub batch_width: usize,

    /// Number of pages handed to the batch loader per refresh window
    #[serde(rename = "window-size", default = "default_window_size")]
    pub window_size: u32,

    /// How long a completed refresh is trusted (seconds)
    #[serde(rename = "staleness-secs", default = "default_staleness_secs")]
    pub staleness_secs: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            batch_width: default_batch_width(),
            window_size: default_window_size(),
            staleness_secs: default_staleness_secs(),
        }
    }
}

/// Clipboard integration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClipboardConfig {
    /// Program and arguments that read the copied text from stdin
    /// (e.g. `["xclip", "-selection", "clipboard"]`)
    #[serde(default)]
    pub command: Option<Vec<String>>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("auction-scout/{}", env!("CARGO_PKG_VERSION"))
}

fn default_batch_width() -> usize {
    5
}

fn default_window_size() -> u32 {
    50
}

fn default_staleness_secs() -> u64 {
    10
}
