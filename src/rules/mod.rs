//! Per-language-family relation rule tables.
//!
//! Each family is a data-only table of dependency-label sets; the traversal
//! logic in [`extract`] is shared. Supporting a new language means mapping it
//! to an existing family or declaring a new table, not new control flow.

pub mod extract;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Closed vocabulary of keyword/co-word relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    AdjModifier,
    NounModifier,
    SubjectOfVerb,
    ObjectOfVerb,
    PrepObject,
    PrepLinked,
    Coordination,
}

impl RelationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AdjModifier => "adj_modifier",
            Self::NounModifier => "noun_modifier",
            Self::SubjectOfVerb => "subject_of_verb",
            Self::ObjectOfVerb => "object_of_verb",
            Self::PrepObject => "prep_object",
            Self::PrepLinked => "prep_linked",
            Self::Coordination => "coordination",
        }
    }
}

/// Dependency-label table for one language family.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub name: &'static str,
    /// Labels marking the keyword as a clause subject.
    pub subject_labels: &'static [&'static str],
    /// Labels marking the keyword as a verb object (direct/indirect/oblique).
    pub object_labels: &'static [&'static str],
    /// Labels marking the keyword as the object of a preposition.
    pub prep_object_labels: &'static [&'static str],
    /// Labels on a child of the keyword that attach a preposition to it.
    pub prep_anchor_labels: &'static [&'static str],
    /// Child labels emitted as noun modifiers even when their POS is
    /// grammatically functional (possessives, compounds, genitives).
    pub noun_modifier_labels: &'static [&'static str],
    /// Labels marking a token as coordinated with its head.
    pub coordination_labels: &'static [&'static str],
    /// When set, copula complements must carry one of these labels.
    pub copula_complement_labels: Option<&'static [&'static str]>,
    /// Part-of-speech tags accepted as verbal governors.
    pub verbal_pos: &'static [&'static str],
    /// Part-of-speech tags excluded from co-word emission.
    pub junk_pos: &'static [&'static str],
}

impl RuleSet {
    pub fn is_junk(&self, pos: &str) -> bool {
        self.junk_pos.contains(&pos)
    }

    pub fn is_verbal(&self, pos: &str) -> bool {
        self.verbal_pos.contains(&pos)
    }
}

/// English, Spanish and Italian share spaCy-style label conventions; ADP is
/// junk because analytic prepositions carry no content of their own.
static ROMANCE: Lazy<RuleSet> = Lazy::new(|| RuleSet {
    name: "romance",
    subject_labels: &["nsubj", "nsubjpass", "nsubj:pass"],
    object_labels: &["obj", "dobj", "iobj"],
    prep_object_labels: &["pobj", "obl"],
    prep_anchor_labels: &["prep"],
    noun_modifier_labels: &["poss", "det:poss", "nmod:poss", "compound"],
    coordination_labels: &["conj"],
    copula_complement_labels: None,
    verbal_pos: &["AUX", "VERB"],
    junk_pos: &["DET", "PRON", "PART", "CCONJ", "SCONJ", "PUNCT", "ADP"],
});

/// German case marking surfaces through ADP attachment, so ADP stays out of
/// the junk set and the TIGER-style labels (sb, oa, da, nk) are admitted.
static GERMAN: Lazy<RuleSet> = Lazy::new(|| RuleSet {
    name: "german",
    subject_labels: &["nsubj", "sb"],
    object_labels: &["dobj", "obj", "iobj", "oa", "da", "pobj", "obl"],
    prep_object_labels: &["nk"],
    prep_anchor_labels: &["prep", "mnr"],
    noun_modifier_labels: &["poss", "det:poss", "ag", "pg"],
    coordination_labels: &["conj", "cj"],
    copula_complement_labels: Some(&["acomp", "attr", "pd"]),
    verbal_pos: &["AUX", "VERB"],
    junk_pos: &["DET", "PRON", "PART", "CCONJ", "SCONJ", "PUNCT"],
});

/// Resolve the rule family for a corpus language tag, if one is configured.
/// Only the analyzed corpora are mapped; languages known solely to the
/// translation layer (e.g. Swedish) resolve to `None`.
pub fn rules_for_language(language: &str) -> Option<&'static RuleSet> {
    match language {
        "English" | "Spanish" | "Italian" => Some(&ROMANCE),
        "German" => Some(&GERMAN),
        _ => None,
    }
}
