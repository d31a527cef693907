//! tagsmith CLI - Go struct tag generator
//!
//! Commands:
//! - `tagsmith generate` - Add or rewrite struct tags in Go sources
//! - `tagsmith check` - Validate a tagsmith.toml config file

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

mod check;
mod generate;
mod logging;

#[derive(Parser)]
#[command(name = "tagsmith")]
#[command(author, version, about = "Generate struct tags for Go sources", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add or rewrite struct tags in a Go file or package directory
    Generate(generate::GenerateArgs),

    /// Validate a tagsmith.toml config file
    Check {
        /// Path to the config file (default: ./tagsmith.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Generate(args) => {
            generate::run(args)?;
        }
        Commands::Check { config } => {
            check::run(config)?;
        }
    }

    Ok(())
}
