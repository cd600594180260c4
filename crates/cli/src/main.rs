//! Revkeep CLI - revkeep command

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod config;
mod input;

/// Revkeep - time-bucketed retention for content revision histories
#[derive(Parser)]
#[command(name = "revkeep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify revisions as kept or removed under a retention policy
    Prune(cmd::prune::PruneArgs),
    /// Emit a synthetic revision CSV for exercising policies
    Generate(cmd::generate::GenerateArgs),
    /// Show configuration defaults and the config file location
    Config,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Prune(args) => cmd::prune::run(args),
        Commands::Generate(args) => cmd::generate::run(args),
        Commands::Config => cmd::config::run(),
    }
}
