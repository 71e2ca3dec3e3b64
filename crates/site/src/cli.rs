//! CLI argument parsing with clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use site_update::ReleaseChannel;

/// Site - small web server with self-updating binaries
#[derive(Parser, Debug)]
#[command(name = "site")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version(VersionArgs),

    /// Update the installed binary to the latest release
    Update(UpdateArgs),
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Release channel to track (stable or beta)
    #[arg(long)]
    pub channel: Option<ReleaseChannel>,

    /// Override the release host URL
    #[arg(long)]
    pub url: Option<String>,

    /// Path to the update configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Only check whether an update is available
    #[arg(long)]
    pub check: bool,
}
