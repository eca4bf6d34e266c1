//! CLI entry points

pub mod serve;

use clap::{Parser, Subcommand};

/// Reelquote - movie quote recommendation API
#[derive(Parser)]
#[command(name = "reelquote")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,
}
