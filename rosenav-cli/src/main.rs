//! Rosenav CLI - command-line interface
//!
//! This binary provides a command-line interface to the rosenav library:
//! a synthetic-flight simulator for exercising the compositor and
//! configuration management.

use clap::{Parser, Subcommand};

mod commands;
mod error;

use commands::config::ConfigCommands;
use commands::simulate::SimulateArgs;

#[derive(Parser)]
#[command(
    name = "rosenav",
    version,
    about = "Rose-mode navigation display compositor"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive the compositor with a synthetic flight
    Simulate(SimulateArgs),

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    if let Err(e) = rosenav::logging::try_init("info") {
        eprintln!("warning: logging not initialized: {}", e);
    }

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Simulate(args) => commands::simulate::run(args),
        Commands::Config { command } => commands::config::run(command),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
