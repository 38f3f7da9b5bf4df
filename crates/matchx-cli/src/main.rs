//! matchx CLI
//!
//! Command-line interface for structural JSON assertions

use clap::{Parser, Subcommand};
use matchx_core::logging_facility::{self, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "matchx")]
#[command(about = "matchx - Structural JSON pattern assertions", long_about = None)]
struct Cli {
    /// Emit logs to stderr with the given profile (dev, prod)
    #[arg(long, global = true)]
    log: Option<Profile>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check an actual value against an expected pattern
    Check(commands::check::CheckArgs),
}

fn main() {
    let cli = Cli::parse();

    if let Some(profile) = cli.log {
        logging_facility::init(profile);
    }

    let result = match cli.command {
        Commands::Check(args) => commands::check::execute(args),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
