use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser};
use log::LevelFilter;

use krait::config::Settings;
use krait::orchestrator::Orchestrator;

/// Inline a multi-file Python script into a single self-contained file.
#[derive(Debug, Parser)]
#[command(name = "krait", version, about)]
struct Cli {
    /// Entry Python script to inline
    #[arg(short, long)]
    entry: PathBuf,

    /// Destination for the inlined script (created fresh, truncated if present)
    #[arg(short, long)]
    output: PathBuf,

    /// JSON settings file naming ignorable packages and installation paths
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let settings = Settings::load(cli.settings.as_deref())?;
    Orchestrator::new(settings).inline(&cli.entry, &cli.output)
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}
