//! bu - banned users export tool
//!
//! A command-line interface that queries the user database for banned
//! accounts and renders them as a console table or a delimited file.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;
mod exit_code;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber for logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let exit_code = commands::execute(cli).await;

    std::process::exit(exit_code.as_i32());
}
