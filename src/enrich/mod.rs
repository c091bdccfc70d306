//! Enrichment of relation records into a visualization-ready table.
//!
//! Mirrors the downstream contract: de-duplicated rows with per-language
//! co-word counts, English translations, cross-language shared-word
//! frequencies and a combined display label.

pub mod sentiment;
pub mod translate;

use std::{collections::HashMap, path::Path};

use anyhow::{Context, Result};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    enrich::translate::{TranslationCache, Translator},
    rules::{extract::RelationRecord, RelationKind},
};

/// One row of the visualization export.
#[derive(Debug, Clone, Serialize)]
pub struct VizRow {
    pub lang_name: String,
    pub keyword: String,
    pub co_word: String,
    pub pos: String,
    pub dep_type: RelationKind,
    pub sentence: String,
    pub co_word_and_pos: String,
    pub count: u64,
    pub english_coword: Option<String>,
    pub shared_word_frequency: u64,
    pub combined_label: Option<String>,
}

/// Build the enriched table from raw relation records.
///
/// Rows are de-duplicated on (language, co-word, sentence); the translation
/// pass is sequential because the cache is read-through/write-through and
/// the API is rate limited.
pub async fn build_viz_table(
    records: &[RelationRecord],
    translator: &dyn Translator,
    cache: &mut TranslationCache,
) -> Result<Vec<VizRow>> {
    // Clean and de-duplicate, keeping first occurrences.
    let mut seen = IndexSet::new();
    let mut rows: Vec<RelationRecord> = Vec::new();
    for record in records {
        let co_word = record.co_word.trim().to_lowercase();
        let pos = record.pos.trim().to_uppercase();
        let key = (
            record.lang_name.clone(),
            co_word.clone(),
            record.sentence.clone(),
        );
        if !seen.insert(key) {
            continue;
        }
        rows.push(RelationRecord {
            co_word,
            pos,
            ..record.clone()
        });
    }
    info!(raw = records.len(), deduped = rows.len(), "prepared relation rows");

    // Per-language co-word counts.
    let mut counts: HashMap<(String, String), u64> = HashMap::new();
    for row in &rows {
        *counts
            .entry((row.lang_name.clone(), row.co_word.clone()))
            .or_insert(0) += 1;
    }

    // Translate each unique (language, co-word) once, cache-first.
    let mut english: IndexMap<(String, String), Option<String>> = IndexMap::new();
    for row in &rows {
        let key = (row.lang_name.clone(), row.co_word.clone());
        if english.contains_key(&key) {
            continue;
        }
        let translated = if row.lang_name == "English" {
            Some(row.co_word.clone())
        } else if let Some(cached) = cache.get(&row.lang_name, &row.co_word) {
            cached.clone()
        } else {
            let result = match translator.translate(&row.co_word, &row.lang_name).await {
                Ok(result) => result,
                Err(err) => {
                    warn!(word = %row.co_word, %err, "translation failed");
                    None
                }
            };
            let result = result.map(|word| word.trim().to_lowercase());
            cache.insert(&row.lang_name, &row.co_word, result.clone());
            result
        };
        english.insert(key, translated);
    }

    // Cross-language frequency of each English co-word within a language.
    let mut shared: HashMap<(String, String), u64> = HashMap::new();
    for row in &rows {
        let key = (row.lang_name.clone(), row.co_word.clone());
        if let Some(Some(word)) = english.get(&key) {
            *shared
                .entry((word.clone(), row.lang_name.clone()))
                .or_insert(0) += 1;
        }
    }

    let viz = rows
        .into_iter()
        .map(|row| {
            let key = (row.lang_name.clone(), row.co_word.clone());
            let english_coword = english.get(&key).cloned().flatten();
            let shared_word_frequency = english_coword
                .as_ref()
                .and_then(|word| shared.get(&(word.clone(), row.lang_name.clone())))
                .copied()
                .unwrap_or(0);
            let combined_label = english_coword
                .as_ref()
                .map(|word| format!("{word} ({})", row.co_word));
            VizRow {
                co_word_and_pos: format!("{}_{}", row.co_word, row.pos),
                count: counts.get(&key).copied().unwrap_or(0),
                english_coword,
                shared_word_frequency,
                combined_label,
                lang_name: row.lang_name,
                keyword: row.keyword,
                co_word: row.co_word,
                pos: row.pos,
                dep_type: row.dep_type,
                sentence: row.sentence,
            }
        })
        .collect();
    Ok(viz)
}

/// Write the enriched table to CSV.
pub fn write_viz_csv<P: AsRef<Path>>(path: P, rows: &[VizRow]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating viz csv {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!(rows = rows.len(), path = %path.display(), "wrote viz-ready rows");
    Ok(())
}
