//! Join externally produced sentence sentiment labels onto relation records.
//!
//! The multilingual star-rating classifier runs outside this crate; its
//! per-sentence output (`sentence,label` CSV) is consumed here and collapsed
//! to a three-way polarity.

use std::{collections::HashMap, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{corpus::dedup::normalize_text, rules::extract::RelationRecord};

/// Map a star-rating label ("1 star" .. "5 stars") to a simple polarity.
pub fn simplify_stars(label: &str) -> &'static str {
    if label.contains('1') || label.contains('2') {
        "NEGATIVE"
    } else if label.contains('3') {
        "NEUTRAL"
    } else if label.contains('4') || label.contains('5') {
        "POSITIVE"
    } else {
        "UNKNOWN"
    }
}

#[derive(Debug, Deserialize)]
struct ScoreRow {
    sentence: String,
    label: String,
}

/// Relation record with its sentence's sentiment attached. Fields are kept
/// flat because the CSV serializer cannot handle nested structs.
#[derive(Debug, Clone, Serialize)]
pub struct SentimentRow {
    pub keyword: String,
    pub co_word: String,
    pub pos: String,
    pub dep_type: crate::rules::RelationKind,
    pub sentence: String,
    pub lang_name: String,
    pub sentiment: String,
    pub sentiment_simple: String,
}

/// Load sentence star labels, keyed by normalized sentence text.
pub fn load_scores_csv<P: AsRef<Path>>(path: P) -> Result<HashMap<String, String>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening sentiment csv {}", path.display()))?;
    let mut scores = HashMap::new();
    for result in reader.deserialize() {
        let row: ScoreRow = result?;
        scores.insert(normalize_text(&row.sentence), row.label);
    }
    info!(sentences = scores.len(), "loaded sentiment scores");
    Ok(scores)
}

/// Attach sentiment labels to every record; unscored sentences are UNKNOWN.
pub fn join_sentiment(
    records: Vec<RelationRecord>,
    scores: &HashMap<String, String>,
) -> Vec<SentimentRow> {
    records
        .into_iter()
        .map(|record| {
            let label = scores
                .get(&normalize_text(&record.sentence))
                .cloned()
                .unwrap_or_else(|| "UNKNOWN".to_string());
            let simple = simplify_stars(&label).to_string();
            SentimentRow {
                keyword: record.keyword,
                co_word: record.co_word,
                pos: record.pos,
                dep_type: record.dep_type,
                sentence: record.sentence,
                lang_name: record.lang_name,
                sentiment: label,
                sentiment_simple: simple,
            }
        })
        .collect()
}

/// Write sentiment-joined rows to CSV.
pub fn write_sentiment_csv<P: AsRef<Path>>(path: P, rows: &[SentimentRow]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating sentiment csv {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!(rows = rows.len(), path = %path.display(), "wrote sentiment rows");
    Ok(())
}
