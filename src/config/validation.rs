use crate::config::types::{ApiConfig, ClipboardConfig, Config, ScanConfig};
use crate::ConfigError;
use url::Url;

/// Upper bound on concurrent page fetches
const MAX_BATCH_WIDTH: usize = 50;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_api_config(&config.api)?;
    validate_scan_config(&config.scan)?;
    validate_clipboard_config(&config.clipboard)?;
    Ok(())
}

/// Validates remote API configuration
fn validate_api_config(config: &ApiConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use http or https",
            config.base_url
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "connect-timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates scan configuration
fn validate_scan_config(config: &ScanConfig) -> Result<(), ConfigError> {
    if config.batch_width < 1 || config.batch_width > MAX_BATCH_WIDTH {
        return Err(ConfigError::Validation(format!(
            "batch-width must be between 1 and {}, got {}",
            MAX_BATCH_WIDTH, config.batch_width
        )));
    }

    if config.window_size < 1 {
        return Err(ConfigError::Validation(format!(
            "window-size must be >= 1, got {}",
            config.window_size
        )));
    }

    Ok(())
}

/// Validates clipboard configuration
fn validate_clipboard_config(config: &ClipboardConfig) -> Result<(), ConfigError> {
    if let Some(command) = &config.command {
        match command.first() {
            Some(program) if !program.trim().is_empty() => {}
            _ => {
                return Err(ConfigError::Validation(
                    "clipboard command must name a program".to_string(),
                ))
            }
        }
    }

    Ok(())
}
