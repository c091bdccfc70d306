//! Typed pipeline errors shared across modules.

use thiserror::Error;

/// Failure modes of the extraction pipeline.
///
/// Per-sentence failures (`ParseFailure`, `SimilarityUnavailable`) are
/// recovered locally and surface only as diagnostics; configuration failures
/// (`UnknownLanguage`) abort before any sentence is processed.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The parsing capability could not process a sentence.
    #[error("parse failure for sentence: {text:?}")]
    ParseFailure { text: String },

    /// A corpus language has no configured rule family or keyword.
    #[error("no rule set configured for language {0:?}")]
    UnknownLanguage(String),

    /// A configured language contributed zero sentences.
    #[error("empty corpus for language {0:?}")]
    EmptyCorpus(String),

    /// The similarity capability failed for a sentence pair.
    #[error("similarity unavailable for pair ({0}, {1})")]
    SimilarityUnavailable(usize, usize),
}
