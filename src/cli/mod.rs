pub mod completions;
pub mod convert;
pub mod inspect;

use clap::{Parser, Subcommand};

/// ora2level - Level asset converter
#[derive(Parser, Debug)]
#[command(name = "ora2level")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show per-layer diagnostics (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert levels into terrain, artwork, background and thumbnail files
    Convert(convert::ConvertArgs),

    /// Show a layer stack's tree and the terrain palette it produces
    Inspect(inspect::InspectArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
