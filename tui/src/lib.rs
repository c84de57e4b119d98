//! Terminal browser for a remote asset catalog.

mod app;
mod app_event;
mod app_event_sender;
mod cli;
mod config;
mod detail_view;
mod logging;
mod scroll;
mod search_input;
mod table_view;
mod tui;

pub use cli::Cli;
pub use config::BrowserConfig;
pub use config::default_log_path;

use anyhow::Context;
use anyhow::Result;
use catalog_client::HttpCatalogClient;
use std::sync::Arc;
use tracing::info;

pub async fn run_main(cli: Cli) -> Result<()> {
    let config = BrowserConfig::resolve(&cli)?;
    let log_path = cli.log_file.clone().unwrap_or_else(default_log_path);
    let _log_guard = logging::init(cli.verbose, &log_path)?;
    info!(
        base_url = %config.client.base_url,
        display_count = config.pager.display_count,
        step_size = config.pager.step_size,
        "starting catalog browser"
    );

    let client = HttpCatalogClient::new(&config.client).context("failed to build catalog client")?;
    let mut terminal = tui::init().context("failed to initialize terminal")?;
    let result = app::run(&mut terminal, Arc::new(client), config.pager, cli.query).await;
    let restored = tui::restore().context("failed to restore terminal");
    if let Err(err) = &result {
        tracing::error!("browser exited with error: {err:#}");
    }
    result.and(restored)
}
