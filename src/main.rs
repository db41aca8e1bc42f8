//! SMA200 tracker - main entry point
//!
//! This binary provides two subcommands:
//! - track: fetch configured symbols and print their current regime summary
//! - report: parse a local CSV and print the annotated signal series

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "sma200-tracker")]
#[command(about = "Track market risk regimes against the 200-day moving average", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch each symbol's CSV source and print its regime summary
    Track {
        /// Symbols to track (comma-separated). Each needs a {SYMBOL}_CSV_URL
        /// environment variable pointing at its CSV export.
        #[arg(short, long, default_value = "QQQ,SPY")]
        symbols: String,

        /// Emit machine-readable JSON instead of the text summary
        #[arg(long)]
        json: bool,
    },

    /// Parse a local CSV file and print the annotated signal series
    Report {
        /// Path to the CSV file
        #[arg(short, long)]
        file: PathBuf,

        /// Emit machine-readable JSON instead of the table
        #[arg(long)]
        json: bool,

        /// Also write the annotated series to this CSV file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn setup_logging(verbose: bool) -> Result<()> {
    // Filter out noisy external crates
    let level = if verbose { "debug" } else { "info" };
    let filter_str = format!(
        "{},hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn,h2=warn",
        level
    );
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    match cli.command {
        Commands::Track { symbols, json } => commands::track::run(symbols, json),
        Commands::Report { file, json, out } => commands::report::run(file, json, out),
    }
}
