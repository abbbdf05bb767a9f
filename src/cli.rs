//! Command-line surface.
//!
//! The binary takes no subcommands: it loads configuration, initializes
//! tracing, and launches the quiz. The few flags exist to override config
//! values for a single session.

use anyhow::Result;
use clap::Parser;

use crate::config::Config;
use crate::errors::SmellhuntError;
use crate::telemetry::init_tracing;
use crate::tui;

#[derive(Parser)]
#[command(name = "smellhunt")]
#[command(about = "Terminal trainer for spotting bad code")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Model identifier to request
    #[arg(short, long, value_name = "ID")]
    model: Option<String>,

    /// Number of examples per round
    #[arg(short, long, value_name = "N")]
    rounds: Option<usize>,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing();

    let mut config = Config::load(cli.config.as_deref())
        .map_err(|e| SmellhuntError::Config(format!("{:#}", e)))?;
    if let Some(model) = cli.model {
        config.model = model;
    }
    if let Some(rounds) = cli.rounds {
        config.rounds = rounds.max(1);
    }

    tracing::info!(model = %config.model, rounds = config.rounds, "Starting quiz");
    tui::run(&config).await
}
