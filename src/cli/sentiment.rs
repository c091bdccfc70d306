//! CLI entry-point for the sentiment join.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{config::Settings, corpus, enrich::sentiment};

/// Args for the `sentiment` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Relation record CSV from `extract`.
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Per-sentence star-label CSV produced by the external classifier.
    #[arg(long)]
    pub scores: PathBuf,
    /// Destination CSV for sentiment-joined relations.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let input = args
        .input
        .unwrap_or_else(|| settings.join_output("dependence_analysis.csv"));
    let output = args
        .output
        .unwrap_or_else(|| settings.join_output("dependence_sentiment.csv"));

    let records = corpus::load_relations_csv(&input)?;
    let scores = sentiment::load_scores_csv(&args.scores)?;
    let rows = sentiment::join_sentiment(records, &scores);
    sentiment::write_sentiment_csv(&output, &rows)?;
    Ok(())
}
