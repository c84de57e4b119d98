use catalog_tui::Cli;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    catalog_tui::run_main(cli).await
}
