//! Site CLI - self-updating server binary
//!
//! This is the main entry point for the `site` command-line interface.

mod cli;
mod commands;
mod exit;
mod output;
mod system;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    // Parse CLI args
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose, cli.quiet);

    // Run command; every terminal state routes through the one exit helper.
    let code = match cli.command {
        Commands::Version(args) => commands::version::run(args),
        Commands::Update(args) => commands::update::run(args).await,
    };

    exit::graceful_exit(code);
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}
