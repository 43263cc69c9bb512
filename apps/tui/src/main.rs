use clap::Parser;
use color_eyre::Result;
use std::sync::Arc;

use urgent_sales_tui::api::{HttpListingApi, ListingApi};
use urgent_sales_tui::app::App;
use urgent_sales_tui::cli::CliArgs;
use urgent_sales_tui::config::init_app_config;
use urgent_sales_tui::logging::{init_logging, LogSink};
use urgent_sales_tui::{event, terminal};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = init_app_config()?;

    let headless = args.wants_headless() || !is_terminal();
    init_logging(
        &config,
        if headless {
            LogSink::Stderr
        } else {
            LogSink::File
        },
    )?;
    tracing::info!(base_url = %config.api_base_url, headless, "starting urgent-sales");

    let api: Arc<dyn ListingApi> = Arc::new(HttpListingApi::new(
        &config.api_base_url,
        config.request_timeout,
    )?);

    if headless {
        return event::run_headless(api.as_ref(), config.trade_type, &args).await;
    }

    let mut app = App::new(api, &config);

    terminal::install_panic_hook();
    let mut tui = terminal::setup()?;

    let result = event::run(&mut tui, &mut app).await;

    terminal::cleanup(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
