//! Dependency-parse data model and the parsing capability boundary.

pub mod conllu;

use crate::error::PipelineError;

/// Atomic parse unit.
///
/// `head` and `children` are indices into the owning sentence's token arena;
/// the root token's head is its own index. The tree shape (single root, no
/// cycles) is guaranteed by the upstream parser and consumed as-is.
#[derive(Debug, Clone)]
pub struct Token {
    /// Surface text.
    pub text: String,
    /// Normalized base form; falls back to lowercased surface text.
    pub lemma: String,
    /// Universal part-of-speech tag (NOUN, VERB, ADJ, ...).
    pub upos: String,
    /// Dependency label relative to the head.
    pub deprel: String,
    /// Arena index of the grammatical head.
    pub head: usize,
    /// Arena indices of direct dependents.
    pub children: Vec<usize>,
}

/// An ordered token arena plus the raw text it was parsed from.
#[derive(Debug, Clone)]
pub struct Sentence {
    pub tokens: Vec<Token>,
    pub text: String,
    pub language: String,
}

impl Sentence {
    /// Head token of the token at `index`.
    pub fn head_of(&self, index: usize) -> &Token {
        &self.tokens[self.tokens[index].head]
    }

    pub fn is_root(&self, index: usize) -> bool {
        self.tokens[index].head == index
    }
}

/// Parsing capability consumed by the extractor.
///
/// Implementations must supply lemma, part-of-speech, dependency label and a
/// well-defined head per token; which model produces the parse is not the
/// pipeline's concern.
pub trait Parser: Send + Sync {
    fn parse(&self, text: &str, language: &str) -> Result<Sentence, PipelineError>;
}
