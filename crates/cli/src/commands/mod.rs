//! CLI command definitions and execution
//!
//! This module contains all CLI commands and their implementations.

use clap::{Parser, Subcommand};

use crate::exit_code::ExitCode;
use crate::output::OutputConfig;

mod completions;
pub mod get;

/// bu - banned users export tool
///
/// Queries the user database for banned accounts and renders them as a
/// console table or a delimited file.
#[derive(Parser, Debug)]
#[command(name = "bu")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Get banned users
    Get(get::GetArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Get(args) => get::execute(args, output_config).await,
        Commands::Completions(args) => completions::execute(args),
    }
}
