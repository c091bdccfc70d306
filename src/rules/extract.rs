//! Keyword co-occurrence extraction over a single parsed sentence.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    parse::Sentence,
    rules::{RelationKind, RuleSet},
};

/// One keyword/co-word pair located in a sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationRecord {
    pub keyword: String,
    pub co_word: String,
    pub pos: String,
    pub dep_type: RelationKind,
    pub sentence: String,
    pub lang_name: String,
}

/// Diagnostic classification of one sentence's extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The keyword does not occur in the sentence.
    KeywordAbsent,
    /// The keyword occurs but no rule group fired.
    NoRelations,
    /// The keyword occurs and yielded this many records.
    Related(usize),
}

/// Extraction result: the record sequence plus its diagnostic outcome.
///
/// The outcome is observability only; it never changes the records.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub records: Vec<RelationRecord>,
    pub outcome: MatchOutcome,
}

/// Walk the dependency tree around every occurrence of `keyword`.
///
/// Rule groups are evaluated in fixed order per matching token (subject,
/// object, prepositional, direct-modifier, coordination), so identical input
/// always yields an identical record sequence. Self-relations are excluded
/// unconditionally.
pub fn extract(sentence: &Sentence, keyword: &str, rules: &RuleSet) -> Extraction {
    let keyword = keyword.to_lowercase();
    let mut records = Vec::new();
    let mut keyword_found = false;

    for (idx, token) in sentence.tokens.iter().enumerate() {
        if token.lemma.to_lowercase() != keyword && token.text.to_lowercase() != keyword {
            continue;
        }
        keyword_found = true;
        let keyword_lemma = token.lemma.to_lowercase();

        let emit = |co: usize, kind: RelationKind, records: &mut Vec<RelationRecord>| {
            let co_token = &sentence.tokens[co];
            let co_lemma = co_token.lemma.to_lowercase();
            if co_lemma == keyword_lemma {
                return;
            }
            records.push(RelationRecord {
                keyword: keyword_lemma.clone(),
                co_word: co_lemma,
                pos: co_token.upos.clone(),
                dep_type: kind,
                sentence: sentence.text.clone(),
                lang_name: sentence.language.clone(),
            });
        };

        let head_idx = token.head;
        let head = &sentence.tokens[head_idx];

        // 1. Subject of a verb, including copula complements ("freedom is
        //    important" links both "be" and "important").
        if rules.subject_labels.contains(&token.deprel.as_str())
            && head_idx != idx
            && rules.is_verbal(&head.upos)
        {
            emit(head_idx, RelationKind::SubjectOfVerb, &mut records);
            for &comp in &head.children {
                if comp == idx {
                    continue;
                }
                let comp_token = &sentence.tokens[comp];
                if let Some(allowed) = rules.copula_complement_labels {
                    if !allowed.contains(&comp_token.deprel.as_str()) {
                        continue;
                    }
                }
                if !rules.is_junk(&comp_token.upos) {
                    emit(comp, modifier_kind(&comp_token.upos), &mut records);
                }
            }
        }

        // 2. Object of a verb.
        if rules.object_labels.contains(&token.deprel.as_str())
            && head_idx != idx
            && rules.is_verbal(&head.upos)
        {
            emit(head_idx, RelationKind::ObjectOfVerb, &mut records);
        }

        // 3a. Keyword as prepositional object: report the governing verb.
        //     Handles both annotation styles, keyword under the preposition
        //     ("talk about freedom") and oblique attachment straight to the
        //     verb.
        if rules.prep_object_labels.contains(&token.deprel.as_str()) && head_idx != idx {
            if head.upos == "ADP" && !sentence.is_root(head_idx) {
                let governor = head.head;
                if rules.is_verbal(&sentence.tokens[governor].upos) {
                    emit(governor, RelationKind::PrepObject, &mut records);
                }
            } else if rules.is_verbal(&head.upos) {
                emit(head_idx, RelationKind::PrepObject, &mut records);
            }
        }

        // 3b. Keyword anchoring a preposition: report the preposition's own
        //     object ("freedom of speech" links "speech").
        for &child in &token.children {
            let child_token = &sentence.tokens[child];
            if !rules.prep_anchor_labels.contains(&child_token.deprel.as_str()) {
                continue;
            }
            for &obj in &child_token.children {
                let obj_token = &sentence.tokens[obj];
                if rules.prep_object_labels.contains(&obj_token.deprel.as_str())
                    && !rules.is_junk(&obj_token.upos)
                {
                    emit(obj, RelationKind::PrepLinked, &mut records);
                }
            }
        }

        // 4. Direct modifiers. Possessive-labelled children are emitted even
        //    when their POS is functional; everything else passes the junk
        //    filter first.
        for &child in &token.children {
            let child_token = &sentence.tokens[child];
            if rules
                .noun_modifier_labels
                .contains(&child_token.deprel.as_str())
            {
                emit(child, RelationKind::NounModifier, &mut records);
            } else if !rules.is_junk(&child_token.upos) {
                emit(child, modifier_kind(&child_token.upos), &mut records);
            }
        }

        // 5. Coordinated peers of the keyword.
        for (other_idx, other) in sentence.tokens.iter().enumerate() {
            if other_idx == idx {
                continue;
            }
            if rules.coordination_labels.contains(&other.deprel.as_str())
                && other.head == idx
                && !rules.is_junk(&other.upos)
            {
                emit(other_idx, RelationKind::Coordination, &mut records);
            }
        }
    }

    let outcome = if !keyword_found {
        MatchOutcome::KeywordAbsent
    } else if records.is_empty() {
        MatchOutcome::NoRelations
    } else {
        MatchOutcome::Related(records.len())
    };

    match outcome {
        MatchOutcome::KeywordAbsent => {
            debug!(%keyword, sentence = %sentence.text, "keyword not found")
        }
        MatchOutcome::NoRelations => {
            debug!(%keyword, sentence = %sentence.text, "keyword found but no relations")
        }
        MatchOutcome::Related(count) => debug!(%keyword, count, "extracted relations"),
    }

    Extraction { records, outcome }
}

/// Classify a modifier or complement by its part-of-speech.
fn modifier_kind(pos: &str) -> RelationKind {
    if pos == "ADJ" {
        RelationKind::AdjModifier
    } else {
        RelationKind::NounModifier
    }
}
