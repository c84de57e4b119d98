use clap::ArgAction;
use clap::Parser;
use std::path::PathBuf;

/// Browse a remote asset catalog from the terminal.
#[derive(Debug, Default, Parser)]
#[command(name = "catalog", version)]
pub struct Cli {
    /// Catalog service to talk to, e.g. `http://localhost:7600`.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Config file to read instead of the default location.
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Rows shown at once.
    #[arg(long, value_name = "N")]
    pub rows: Option<usize>,

    /// Rows moved per scroll step.
    #[arg(long, value_name = "N")]
    pub step: Option<usize>,

    /// Opening query (`term/term/...`); defaults to the first suggestion.
    #[arg(long, short = 'q', value_name = "TEXT")]
    pub query: Option<String>,

    /// Where to write logs.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(long, short = 'v', action = ArgAction::Count)]
    pub verbose: u8,
}
