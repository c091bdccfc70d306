//! CLI entry-point for keyword co-occurrence extraction.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{config::Settings, corpus, parse::conllu::ConlluParser};

/// Args for the `extract` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Deduplicated sentence CSV (language,source_word,sentence).
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Destination CSV for relation records.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let input = args
        .input
        .unwrap_or_else(|| settings.join_output("deduped_sentences.csv"));
    let output = args
        .output
        .unwrap_or_else(|| settings.join_output("dependence_analysis.csv"));

    let rows = corpus::load_scraped_csv(&input)?;
    let groups = corpus::group_by_language(&rows);
    let parser = ConlluParser::load_dir(&settings.parses_dir)?;

    let report = corpus::run_extraction(&groups, &parser)?;
    info!(
        records = report.records.len(),
        skipped = report.parse_failures,
        "extraction finished"
    );

    corpus::write_relations_csv(&output, &report.records)?;
    Ok(())
}
