use clap::{CommandFactory, Parser};

#[derive(Debug, Parser)]
#[command(
    name = "urgent-sales",
    version,
    about = "Search apartment complexes and browse their urgent-sale analysis"
)]
pub struct CliArgs {
    /// Print results and exit instead of starting the TUI
    #[arg(long)]
    pub headless: bool,

    /// Print headless output as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the listing API base url
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Override the search debounce delay
    #[arg(long = "debounce-ms", value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// Override the log file used while the TUI is running
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,

    /// Headless: search complexes by keyword
    #[arg(long, value_name = "TEXT")]
    pub keyword: Option<String>,

    /// Headless: fetch the analysis of a complex
    #[arg(long = "complex-id", value_name = "ID", conflicts_with = "keyword")]
    pub complex_id: Option<String>,

    /// Headless: only list sales in this area group
    #[arg(long, value_name = "GROUP", requires = "complex_id")]
    pub area: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.base_url {
            std::env::set_var("API_BASE_URL", url);
        }
        if let Some(ms) = self.debounce_ms {
            std::env::set_var("SEARCH_DEBOUNCE_MS", ms.to_string());
        }
        if let Some(path) = &self.log_file {
            std::env::set_var("LOG_FILE", path);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    /// Whether the run asks for a one-shot headless query.
    pub const fn wants_headless(&self) -> bool {
        self.headless || self.keyword.is_some() || self.complex_id.is_some()
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}
