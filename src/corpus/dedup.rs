//! Near-duplicate sentence filtering.
//!
//! Two passes: exact duplicates are collapsed on normalized text before any
//! similarity scoring happens (scoring is the expensive step and exact
//! duplicates always score at the maximum), then a greedy sweep drops every
//! later sentence whose similarity to a kept one reaches the threshold.

use std::collections::HashSet;

use anyhow::Result;
use indexmap::IndexSet;
use ndarray::Array2;
use tracing::warn;
use unicode_normalization::UnicodeNormalization;

use crate::error::PipelineError;

/// Canonical text form used for exact-duplicate detection and parse lookup:
/// Unicode NFC plus collapsed whitespace. Case and diacritics are preserved.
pub fn normalize_text(text: &str) -> String {
    text.nfc()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Indices of the first occurrence of each distinct normalized text, in
/// input order.
pub fn collapse_exact_indices(sentences: &[String]) -> Vec<usize> {
    let mut seen = IndexSet::new();
    let mut kept = Vec::new();
    for (idx, sentence) in sentences.iter().enumerate() {
        if seen.insert(normalize_text(sentence)) {
            kept.push(idx);
        }
    }
    kept
}

/// Symmetric pairwise similarity over a sentence index set. The diagonal is
/// never consulted.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    scores: Array2<f32>,
}

impl SimilarityMatrix {
    /// Build from a pairwise scoring function. A failing pair is fail-open:
    /// it scores 0.0 so neither sentence can be dropped because of it, and
    /// the number of such pairs is returned alongside the matrix.
    pub fn from_fn<F>(n: usize, mut score: F) -> (Self, usize)
    where
        F: FnMut(usize, usize) -> Result<f32, PipelineError>,
    {
        let mut scores = Array2::zeros((n, n));
        let mut unavailable = 0usize;
        for i in 0..n {
            for j in (i + 1)..n {
                let value = match score(i, j) {
                    Ok(value) => value,
                    Err(err) => {
                        warn!(%err, "similarity unavailable; retaining pair");
                        unavailable += 1;
                        0.0
                    }
                };
                scores[[i, j]] = value;
                scores[[j, i]] = value;
            }
        }
        (Self { scores }, unavailable)
    }

    /// Build a cosine-similarity matrix from embedding vectors.
    pub fn from_embeddings(embeddings: &[Vec<f32>]) -> Self {
        let (matrix, _) = Self::from_fn(embeddings.len(), |i, j| {
            Ok(cosine(&embeddings[i], &embeddings[j]))
        });
        matrix
    }

    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.scores[[i, j]]
    }

    pub fn len(&self) -> usize {
        self.scores.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.nrows() == 0
    }
}

/// Greedy, input-order-dependent near-duplicate sweep.
///
/// Earlier sentences win: sentence `i` is kept unless a kept earlier sentence
/// scored at or above `threshold` against it. Swapping the input order can
/// change which member of a near-duplicate pair survives; that asymmetry is
/// part of the contract, not an optimization target.
pub fn greedy_keep_indices(matrix: &SimilarityMatrix, threshold: f32) -> Vec<usize> {
    let n = matrix.len();
    let mut dropped = HashSet::new();
    let mut kept = Vec::new();
    for i in 0..n {
        if dropped.contains(&i) {
            continue;
        }
        kept.push(i);
        for j in (i + 1)..n {
            if !dropped.contains(&j) && matrix.get(i, j) >= threshold {
                dropped.insert(j);
            }
        }
    }
    kept
}

/// Similarity capability: turns sentences into comparable vectors. The
/// embedding technique is the implementation's concern.
pub trait Similarity {
    fn embed(&self, sentences: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// MiniLM embeddings via fastembed, when the feature is enabled.
#[cfg(feature = "embeddings")]
pub struct EmbeddingSimilarity;

#[cfg(feature = "embeddings")]
impl Similarity for EmbeddingSimilarity {
    fn embed(&self, sentences: &[String]) -> Result<Vec<Vec<f32>>> {
        let embedder = fastembed::TextEmbedding::try_new(Default::default())?;
        let documents: Vec<&str> = sentences.iter().map(String::as_str).collect();
        Ok(embedder.embed(documents, None)?)
    }
}

/// Deterministic fallback: sentences as lowercased token multiset vectors
/// over a shared vocabulary, so cosine reduces to lexical overlap. Exact
/// duplicates still score 1.0; unrelated sentences score near 0.0.
pub struct LexicalSimilarity;

impl Similarity for LexicalSimilarity {
    fn embed(&self, sentences: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut vocabulary = IndexSet::new();
        let tokenized: Vec<Vec<String>> = sentences
            .iter()
            .map(|sentence| {
                normalize_text(sentence)
                    .to_lowercase()
                    .split(|c: char| !c.is_alphanumeric())
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .collect();
        for tokens in &tokenized {
            for token in tokens {
                vocabulary.insert(token.clone());
            }
        }
        Ok(tokenized
            .iter()
            .map(|tokens| {
                let mut vector = vec![0.0; vocabulary.len()];
                for token in tokens {
                    if let Some(slot) = vocabulary.get_index_of(token) {
                        vector[slot] += 1.0;
                    }
                }
                vector
            })
            .collect())
    }
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot = a.iter().zip(b).map(|(x, y)| x * y).sum::<f32>();
    let norm_a = a.iter().map(|v| v * v).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
