use color_eyre::eyre::{eyre, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    /// Append to the configured log file; the TUI owns stdout/stderr.
    File,
    Stderr,
}

/// `RUST_LOG` wins; otherwise `debug` when `DEBUG=1`, else `info`.
fn env_filter() -> EnvFilter {
    let debug = std::env::var("DEBUG").is_ok_and(|value| value == "1");
    let default_level = if debug { "debug" } else { "info" };

    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install the global tracing subscriber.
pub fn init_logging(config: &AppConfig, sink: LogSink) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false);

    let installed = match sink {
        LogSink::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogSink::File => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&config.log_file)
                .map_err(|e| {
                    eyre!(
                        "Failed to open log file {}: {e}",
                        config.log_file.display()
                    )
                })?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    installed.map_err(|e| eyre!("Failed to install tracing subscriber: {e}"))
}
