//! Command-line interface wiring for lexiscope.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Settings;

pub mod dedup;
pub mod enrich;
pub mod extract;
pub mod sentiment;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Cross-language keyword co-occurrence analysis", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Dedup(args) => dedup::run(args, settings).await,
            Commands::Extract(args) => extract::run(args, settings).await,
            Commands::Enrich(args) => enrich::run(args, settings).await,
            Commands::Sentiment(args) => sentiment::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Collapse exact and near-duplicate sentences in the scraped corpus.
    Dedup(dedup::Args),
    /// Run keyword co-occurrence extraction over dependency parses.
    Extract(extract::Args),
    /// Add counts, translations and display labels for visualization.
    Enrich(enrich::Args),
    /// Join externally computed sentence sentiment onto relations.
    Sentiment(sentiment::Args),
}
