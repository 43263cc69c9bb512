use color_eyre::eyre::{eyre, Result};
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::TradeType;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_LOG_FILE: &str = "urgent-sales.log";

/// Runtime configuration, resolved from `.env` and the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub debounce: Duration,
    pub trade_type: TradeType,
    pub request_timeout: Option<Duration>,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            trade_type: TradeType::default(),
            request_timeout: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl AppConfig {
    /// Build a config from any key lookup. Unset or blank keys fall back to
    /// defaults; set-but-malformed keys are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let api_base_url = get("API_BASE_URL").map_or(defaults.api_base_url, |url| {
            url.trim().trim_end_matches('/').to_string()
        });

        let debounce = match get("SEARCH_DEBOUNCE_MS") {
            Some(raw) => Duration::from_millis(
                raw.trim()
                    .parse()
                    .map_err(|e| eyre!("SEARCH_DEBOUNCE_MS must be milliseconds, got {raw:?}: {e}"))?,
            ),
            None => defaults.debounce,
        };

        let trade_type = match get("TRADE_TYPE") {
            Some(raw) => TradeType::parse(&raw)
                .ok_or_else(|| eyre!("Unsupported TRADE_TYPE {raw:?}; only A1 (sale) is analysed"))?,
            None => defaults.trade_type,
        };

        let request_timeout = match get("REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|e| {
                    eyre!("REQUEST_TIMEOUT_SECS must be whole seconds, got {raw:?}: {e}")
                })?;
                (secs > 0).then_some(Duration::from_secs(secs))
            }
            None => None,
        };

        let log_file = get("LOG_FILE").map_or(defaults.log_file, PathBuf::from);

        Ok(Self {
            api_base_url,
            debounce,
            trade_type,
            request_timeout,
            log_file,
        })
    }
}

/// Initializes the application configuration from `.env` and the process
/// environment.
pub fn init_app_config() -> Result<AppConfig> {
    // Load environment variables from .env file
    dotenv().ok();

    AppConfig::from_lookup(|key| env::var(key).ok())
}
