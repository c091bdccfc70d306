//! CLI entry-point for near-duplicate sentence filtering.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::{info, instrument, warn};

use crate::{
    config::Settings,
    corpus::{
        self,
        dedup::{collapse_exact_indices, greedy_keep_indices, Similarity, SimilarityMatrix},
    },
};

/// Args for the `dedup` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Scraped sentence CSV (language,source_word,sentence).
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Destination CSV for the retained sentences.
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Override the configured similarity threshold.
    #[arg(long)]
    pub threshold: Option<f32>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let input = args
        .input
        .unwrap_or_else(|| settings.join_data("scraped_sentences.csv"));
    let output = args
        .output
        .unwrap_or_else(|| settings.join_output("deduped_sentences.csv"));
    let threshold = args.threshold.unwrap_or(settings.similarity_threshold);

    let rows = corpus::load_scraped_csv(&input)?;
    let sentences: Vec<String> = rows.iter().map(|r| r.sentence.clone()).collect();

    // Exact duplicates never reach the similarity pass.
    let exact_kept = collapse_exact_indices(&sentences);
    info!(
        before = sentences.len(),
        after = exact_kept.len(),
        "collapsed exact duplicates"
    );

    let candidate_texts: Vec<String> = exact_kept
        .iter()
        .map(|&idx| sentences[idx].clone())
        .collect();

    #[cfg(feature = "embeddings")]
    let similarity = corpus::dedup::EmbeddingSimilarity;
    #[cfg(not(feature = "embeddings"))]
    let similarity = corpus::dedup::LexicalSimilarity;

    // Whole-batch scoring failure is fail-open: retain everything rather
    // than silently drop unique sentences.
    let kept: Vec<usize> = match similarity.embed(&candidate_texts) {
        Ok(embeddings) => {
            let matrix = SimilarityMatrix::from_embeddings(&embeddings);
            greedy_keep_indices(&matrix, threshold)
                .into_iter()
                .map(|local| exact_kept[local])
                .collect()
        }
        Err(err) => {
            warn!(%err, "similarity unavailable; keeping all sentences");
            exact_kept
        }
    };
    info!(kept = kept.len(), threshold, "near-duplicate sweep complete");

    let deduped: Vec<_> = kept.into_iter().map(|idx| rows[idx].clone()).collect();
    corpus::write_scraped_csv(&output, &deduped)?;
    Ok(())
}
