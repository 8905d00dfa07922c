//! CLI module for Estante.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Estante - Spoken study notes to book recommendations
///
/// A local-first CLI that transcribes an audio recording of study
/// interests, asks a local language model for the study topics, and
/// builds a book-recommendation report from a public catalog.
/// "Estante" is Portuguese for "bookshelf."
#[derive(Parser, Debug)]
#[command(name = "estante")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full pipeline against an audio file
    Run {
        /// Audio file to process (defaults to the configured path)
        audio: Option<String>,

        /// Directory to write the report into
        #[arg(short, long)]
        output: Option<String>,

        /// Maximum book results per topic
        #[arg(long)]
        max_results: Option<u32>,

        /// Completion model to use for topic extraction
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Check system requirements and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write a default configuration file
    Init,

    /// Show configuration file path
    Path,
}
