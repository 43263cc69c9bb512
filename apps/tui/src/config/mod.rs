#[allow(clippy::module_inception)]
mod config;

pub use config::{
    init_app_config, AppConfig, DEFAULT_API_BASE_URL, DEFAULT_DEBOUNCE_MS, DEFAULT_LOG_FILE,
};
