mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Create route sheets from receipt images or PDFs.
#[derive(Parser)]
#[command(name = "routesheet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the route-sheet template location
    #[arg(long, global = true)]
    template: Option<PathBuf>,

    /// Override the output directory
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a record from one receipt and create its route sheet
    Process(commands::ProcessArgs),

    /// Process several receipts, reporting each outcome independently
    Batch(commands::BatchArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = commands::load_config(cli.config.as_deref(), cli.template, cli.output_dir)?;

    match cli.command {
        Commands::Process(args) => commands::process(args, &config),
        Commands::Batch(args) => commands::batch(args, &config),
    }
}
