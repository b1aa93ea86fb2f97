//! Speaker Link CLI - command-line control of networked speaker groups.
//!
//! Lists the speakers a backend has discovered, adds speakers by address,
//! and forms or dissolves groups, reconciling with the backend after each
//! command.

mod cli;
mod commands;
mod context;
mod error;
mod output;

use clap::Parser;
use speaker_link_core::logging::{init_logging, LoggingMode};

use cli::{Cli, Commands};
use context::AppContext;
use error::{exit_codes, CliError};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mode = if cli.verbose {
        LoggingMode::Debug
    } else if cli.json {
        LoggingMode::Silent
    } else {
        LoggingMode::Development
    };
    if let Err(e) = init_logging(mode) {
        eprintln!("Warning: {}", e);
    }

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    if let Commands::Config(args) = &cli.command {
        return commands::run_config(args.clone(), &cli).await;
    }

    let ctx = AppContext::from_cli(&cli).await?;
    let json = cli.json;

    match cli.command {
        Commands::Speakers(args) => commands::run_speakers(args, ctx, json).await,
        Commands::Add(args) => commands::run_add(args, ctx, json).await,
        Commands::Group(args) => commands::run_group(args, ctx, json).await,
        Commands::Ungroup(args) => commands::run_ungroup(args, ctx, json).await,
        Commands::Status => commands::run_status(ctx, json).await,
        Commands::Watch(args) => commands::run_watch(args, ctx, json).await,
        Commands::Shell => commands::run_shell(ctx, json).await,
        Commands::Config(_) => unreachable!("handled above"),
    }
}
