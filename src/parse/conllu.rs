//! CoNLL-U backed parser.
//!
//! Parses are produced offline by whichever UD/spaCy model suits each
//! language and exported as one `.conllu` file per language. This module
//! loads those files and serves sentences by their raw text, satisfying the
//! [`Parser`] contract without running a model in-process.

use std::{collections::HashMap, path::Path};

use anyhow::{bail, Context, Result};
use tracing::{debug, info};

use crate::{
    corpus::dedup::normalize_text,
    error::PipelineError,
    parse::{Parser, Sentence, Token},
};

/// In-memory index of pre-parsed sentences, keyed by language and
/// normalized sentence text.
#[derive(Debug, Default)]
pub struct ConlluParser {
    sentences: HashMap<(String, String), Sentence>,
}

impl ConlluParser {
    /// Load every `<Language>.conllu` file under `dir`.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let mut parser = Self::default();
        let dir = dir.as_ref();
        if !dir.exists() {
            bail!("parses directory {} does not exist", dir.display());
        }
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if entry.path().extension().and_then(|s| s.to_str()) != Some("conllu") {
                continue;
            }
            let language = entry
                .path()
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown")
                .to_string();
            let content = std::fs::read_to_string(entry.path())
                .with_context(|| format!("reading {}", entry.path().display()))?;
            parser.load_str(&content, &language)?;
        }
        info!(sentences = parser.sentences.len(), "loaded conllu parses");
        Ok(parser)
    }

    /// Index every sentence block of a CoNLL-U document.
    pub fn load_str(&mut self, content: &str, language: &str) -> Result<()> {
        for block in content.split("\n\n") {
            if block.trim().is_empty() {
                continue;
            }
            let sentence = parse_block(block, language)
                .with_context(|| format!("malformed conllu block for {language}"))?;
            let key = (language.to_string(), normalize_text(&sentence.text));
            self.sentences.insert(key, sentence);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

impl Parser for ConlluParser {
    fn parse(&self, text: &str, language: &str) -> Result<Sentence, PipelineError> {
        let key = (language.to_string(), normalize_text(text));
        self.sentences
            .get(&key)
            .cloned()
            .ok_or_else(|| PipelineError::ParseFailure {
                text: text.to_string(),
            })
    }
}

/// Parse a single sentence block into a token arena.
pub fn parse_block(block: &str, language: &str) -> Result<Sentence> {
    let mut text = None;
    let mut forms: Vec<(String, String, String, String, usize)> = Vec::new();

    for line in block.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        if let Some(rest) = line.strip_prefix("# text =") {
            text = Some(rest.trim().to_string());
            continue;
        }
        if line.starts_with('#') {
            continue;
        }
        let cols: Vec<&str> = line.split('\t').collect();
        if cols.len() < 8 {
            bail!("expected at least 8 columns, got {}: {line:?}", cols.len());
        }
        // Multi-word token ranges and empty nodes carry no tree structure.
        if cols[0].contains('-') || cols[0].contains('.') {
            continue;
        }
        let form = cols[1].to_string();
        let lemma = match cols[2] {
            "_" | "" => form.to_lowercase(),
            lemma => lemma.to_string(),
        };
        let upos = cols[3].to_string();
        let deprel = cols[7].to_string();
        let head: usize = cols[6]
            .parse()
            .with_context(|| format!("bad head column in {line:?}"))?;
        forms.push((form, lemma, upos, deprel, head));
    }

    if forms.is_empty() {
        bail!("sentence block contains no token lines");
    }
    if let Some((form, .., head)) = forms.iter().find(|(.., head)| *head > forms.len()) {
        bail!("head {head} of token {form:?} points outside the sentence");
    }

    let text = text.unwrap_or_else(|| {
        forms
            .iter()
            .map(|(form, ..)| form.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    });

    let mut tokens: Vec<Token> = forms
        .into_iter()
        .enumerate()
        .map(|(idx, (form, lemma, upos, deprel, head))| Token {
            text: form,
            lemma,
            upos,
            deprel,
            // CoNLL-U heads are 1-based; 0 marks the root, which points at
            // itself in the arena.
            head: if head == 0 { idx } else { head - 1 },
            children: Vec::new(),
        })
        .collect();

    for idx in 0..tokens.len() {
        let head = tokens[idx].head;
        if head != idx {
            tokens[head].children.push(idx);
        }
    }

    debug!(tokens = tokens.len(), %language, "parsed sentence block");
    Ok(Sentence {
        tokens,
        text,
        language: language.to_string(),
    })
}
