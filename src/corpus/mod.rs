//! Corpus I/O and the per-language extraction orchestrator.

pub mod dedup;

use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    error::PipelineError,
    parse::Parser,
    rules::{
        self,
        extract::{self, MatchOutcome, RelationRecord},
    },
};

/// Row shape of the scrape collaborator's CSV.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedRow {
    pub language: String,
    pub source_word: String,
    pub sentence: String,
}

/// One language's sentence collection and target keyword.
#[derive(Debug, Clone)]
pub struct LanguageGroup {
    pub language: String,
    pub keyword: String,
    pub sentences: Vec<String>,
}

/// Aggregated output of one extraction run: the record stream plus the
/// diagnostic counts kept out of it.
#[derive(Debug, Default)]
pub struct RunReport {
    pub records: Vec<RelationRecord>,
    pub parse_failures: usize,
    pub keyword_absent: usize,
    pub no_relations: usize,
}

/// Read scraped sentence rows from CSV.
pub fn load_scraped_csv<P: AsRef<Path>>(path: P) -> Result<Vec<ScrapedRow>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening corpus csv {}", path.display()))?;
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: ScrapedRow = result?;
        rows.push(row);
    }
    info!(rows = rows.len(), path = %path.display(), "loaded corpus rows");
    Ok(rows)
}

/// Write sentence rows back out (used by the dedup stage).
pub fn write_scraped_csv<P: AsRef<Path>>(path: P, rows: &[ScrapedRow]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating corpus csv {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!(rows = rows.len(), path = %path.display(), "wrote corpus rows");
    Ok(())
}

/// Group rows by language, preserving first-seen language order and
/// within-language sentence order. The keyword is the language's
/// `source_word`; later rows with a differing source word are flagged.
pub fn group_by_language(rows: &[ScrapedRow]) -> Vec<LanguageGroup> {
    let mut groups: IndexMap<String, LanguageGroup> = IndexMap::new();
    for row in rows {
        let group = groups
            .entry(row.language.clone())
            .or_insert_with(|| LanguageGroup {
                language: row.language.clone(),
                keyword: row.source_word.clone(),
                sentences: Vec::new(),
            });
        if group.keyword != row.source_word {
            warn!(
                language = %row.language,
                expected = %group.keyword,
                got = %row.source_word,
                "conflicting source word; keeping the first"
            );
        }
        group.sentences.push(row.sentence.clone());
    }
    groups.into_values().collect()
}

/// Fail fast when any corpus language lacks a rule family or keyword.
/// Runs over the whole configuration before a single sentence is processed.
pub fn validate_languages(groups: &[LanguageGroup]) -> Result<(), PipelineError> {
    for group in groups {
        if rules::rules_for_language(&group.language).is_none() || group.keyword.is_empty() {
            return Err(PipelineError::UnknownLanguage(group.language.clone()));
        }
    }
    Ok(())
}

/// Run extraction for every language group and concatenate the records.
///
/// Per-sentence parse failures are skipped and counted, never fatal; an
/// empty language logs and contributes nothing. Record order is stable
/// within a sentence; consumers must not rely on cross-language order.
pub fn run_extraction(groups: &[LanguageGroup], parser: &dyn Parser) -> Result<RunReport> {
    validate_languages(groups)?;

    let mut report = RunReport::default();
    for group in groups {
        if group.sentences.is_empty() {
            let err = PipelineError::EmptyCorpus(group.language.clone());
            warn!(%err, "skipping language");
            continue;
        }
        let rules = rules::rules_for_language(&group.language)
            .ok_or_else(|| PipelineError::UnknownLanguage(group.language.clone()))?;
        info!(
            language = %group.language,
            keyword = %group.keyword,
            sentences = group.sentences.len(),
            "processing language"
        );

        for sentence_text in &group.sentences {
            let sentence = match parser.parse(sentence_text, &group.language) {
                Ok(sentence) => sentence,
                Err(err) => {
                    warn!(%err, "skipping unparseable sentence");
                    report.parse_failures += 1;
                    continue;
                }
            };
            let extraction = extract::extract(&sentence, &group.keyword, rules);
            match extraction.outcome {
                MatchOutcome::KeywordAbsent => report.keyword_absent += 1,
                MatchOutcome::NoRelations => report.no_relations += 1,
                MatchOutcome::Related(_) => {}
            }
            report.records.extend(extraction.records);
        }
    }

    info!(
        records = report.records.len(),
        parse_failures = report.parse_failures,
        keyword_absent = report.keyword_absent,
        no_relations = report.no_relations,
        "extraction run complete"
    );
    Ok(report)
}

/// Write relation records to CSV for downstream consumers.
pub fn write_relations_csv<P: AsRef<Path>>(path: P, records: &[RelationRecord]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating relations csv {}", path.display()))?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    info!(rows = records.len(), path = %path.display(), "wrote relation records");
    Ok(())
}

/// Read relation records back for enrichment stages.
pub fn load_relations_csv<P: AsRef<Path>>(path: P) -> Result<Vec<RelationRecord>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening relations csv {}", path.display()))?;
    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: RelationRecord = result?;
        records.push(record);
    }
    info!(rows = records.len(), path = %path.display(), "loaded relation records");
    Ok(records)
}
