use lexiscope::corpus::{self, LanguageGroup};
use lexiscope::error::PipelineError;
use lexiscope::parse::conllu::{parse_block, ConlluParser};
use lexiscope::rules::extract::{extract, MatchOutcome};
use lexiscope::rules::{rules_for_language, RelationKind};

const COPULA_EN: &str = "\
# text = Freedom is important to me.
1\tFreedom\tfreedom\tNOUN\tNN\t_\t2\tnsubj\t_\t_
2\tis\tbe\tAUX\tVBZ\t_\t0\troot\t_\t_
3\timportant\timportant\tADJ\tJJ\t_\t2\tacomp\t_\t_
4\tto\tto\tADP\tIN\t_\t3\tprep\t_\t_
5\tme\ti\tPRON\tPRP\t_\t4\tpobj\t_\t_
6\t.\t.\tPUNCT\t.\t_\t2\tpunct\t_\t_";

const POSSESSIVE_DE: &str = "\
# text = Ich kämpfe für meine Freiheit.
1\tIch\tich\tPRON\t_\t_\t2\tsb\t_\t_
2\tkämpfe\tkämpfen\tVERB\t_\t_\t0\troot\t_\t_
3\tfür\tfür\tADP\t_\t_\t2\tmnr\t_\t_
4\tmeine\tmein\tDET\t_\t_\t5\tposs\t_\t_
5\tFreiheit\tFreiheit\tNOUN\t_\t_\t3\tnk\t_\t_
6\t.\t.\tPUNCT\t_\t_\t2\tpunct\t_\t_";

const NO_KEYWORD_DE: &str = "\
# text = Der Hund läuft.
1\tDer\tder\tDET\t_\t_\t2\tnk\t_\t_
2\tHund\tHund\tNOUN\t_\t_\t3\tsb\t_\t_
3\tläuft\tlaufen\tVERB\t_\t_\t0\troot\t_\t_
4\t.\t.\tPUNCT\t_\t_\t3\tpunct\t_\t_";

const COORDINATION_EN: &str = "\
# text = I value freedom and justice.
1\tI\ti\tPRON\t_\t_\t2\tnsubj\t_\t_
2\tvalue\tvalue\tVERB\t_\t_\t0\troot\t_\t_
3\tfreedom\tfreedom\tNOUN\t_\t_\t2\tdobj\t_\t_
4\tand\tand\tCCONJ\t_\t_\t3\tcc\t_\t_
5\tjustice\tjustice\tNOUN\t_\t_\t3\tconj\t_\t_
6\t.\t.\tPUNCT\t_\t_\t2\tpunct\t_\t_";

const PREP_LINKED_EN: &str = "\
# text = Freedom of speech matters.
1\tFreedom\tfreedom\tNOUN\t_\t_\t4\tnsubj\t_\t_
2\tof\tof\tADP\t_\t_\t1\tprep\t_\t_
3\tspeech\tspeech\tNOUN\t_\t_\t2\tpobj\t_\t_
4\tmatters\tmatter\tVERB\t_\t_\t0\troot\t_\t_
5\t.\t.\tPUNCT\t_\t_\t4\tpunct\t_\t_";

const SELF_RELATION_EN: &str = "\
# text = Freedom is freedom.
1\tFreedom\tfreedom\tNOUN\t_\t_\t2\tnsubj\t_\t_
2\tis\tbe\tAUX\t_\t_\t0\troot\t_\t_
3\tfreedom\tfreedom\tNOUN\t_\t_\t2\tattr\t_\t_
4\t.\t.\tPUNCT\t_\t_\t2\tpunct\t_\t_";

#[test]
fn copula_subject_links_verb_and_complement() {
    let sentence = parse_block(COPULA_EN, "English").unwrap();
    let rules = rules_for_language("English").unwrap();
    let extraction = extract(&sentence, "freedom", rules);

    let pairs: Vec<(RelationKind, &str)> = extraction
        .records
        .iter()
        .map(|r| (r.dep_type, r.co_word.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            (RelationKind::SubjectOfVerb, "be"),
            (RelationKind::AdjModifier, "important"),
        ]
    );
    assert_eq!(extraction.outcome, MatchOutcome::Related(2));
    assert!(extraction.records.iter().all(|r| r.keyword == "freedom"));
    assert!(extraction
        .records
        .iter()
        .all(|r| r.sentence == "Freedom is important to me."));
}

#[test]
fn german_possessive_child_is_a_noun_modifier() {
    let sentence = parse_block(POSSESSIVE_DE, "German").unwrap();
    let rules = rules_for_language("German").unwrap();
    let extraction = extract(&sentence, "Freiheit", rules);

    assert!(extraction.records.iter().any(|r| {
        r.dep_type == RelationKind::NounModifier && r.keyword == "freiheit" && r.co_word == "mein"
    }));
    // The ADP-attached object also surfaces its governing verb.
    assert!(extraction
        .records
        .iter()
        .any(|r| r.dep_type == RelationKind::PrepObject && r.co_word == "kämpfen"));
}

#[test]
fn missing_keyword_yields_absent_diagnostic_and_no_records() {
    let sentence = parse_block(NO_KEYWORD_DE, "German").unwrap();
    let rules = rules_for_language("German").unwrap();
    let extraction = extract(&sentence, "Freiheit", rules);

    assert!(extraction.records.is_empty());
    assert_eq!(extraction.outcome, MatchOutcome::KeywordAbsent);
}

#[test]
fn coordinated_peer_is_reported() {
    let sentence = parse_block(COORDINATION_EN, "English").unwrap();
    let rules = rules_for_language("English").unwrap();
    let extraction = extract(&sentence, "freedom", rules);

    assert!(extraction
        .records
        .iter()
        .any(|r| r.dep_type == RelationKind::ObjectOfVerb && r.co_word == "value"));
    assert!(extraction
        .records
        .iter()
        .any(|r| r.dep_type == RelationKind::Coordination && r.co_word == "justice"));
}

#[test]
fn anchored_preposition_reports_its_object() {
    let sentence = parse_block(PREP_LINKED_EN, "English").unwrap();
    let rules = rules_for_language("English").unwrap();
    let extraction = extract(&sentence, "freedom", rules);

    assert!(extraction
        .records
        .iter()
        .any(|r| r.dep_type == RelationKind::PrepLinked && r.co_word == "speech"));
    // The preposition itself is junk and never emitted.
    assert!(extraction.records.iter().all(|r| r.co_word != "of"));
}

#[test]
fn self_relations_are_never_emitted() {
    let sentence = parse_block(SELF_RELATION_EN, "English").unwrap();
    let rules = rules_for_language("English").unwrap();
    let extraction = extract(&sentence, "freedom", rules);

    assert!(extraction.records.iter().all(|r| r.co_word != "freedom"));
}

#[test]
fn extraction_is_deterministic() {
    let sentence = parse_block(COORDINATION_EN, "English").unwrap();
    let rules = rules_for_language("English").unwrap();
    let first = extract(&sentence, "freedom", rules);
    let second = extract(&sentence, "freedom", rules);
    assert_eq!(first.records, second.records);
}

#[test]
fn orchestrator_skips_unparseable_sentences_and_counts_them() {
    let mut parser = ConlluParser::default();
    parser.load_str(COPULA_EN, "English").unwrap();

    let groups = vec![LanguageGroup {
        language: "English".into(),
        keyword: "freedom".into(),
        sentences: vec![
            "Freedom is important to me.".into(),
            "This sentence has no parse.".into(),
        ],
    }];
    let report = corpus::run_extraction(&groups, &parser).unwrap();
    assert_eq!(report.parse_failures, 1);
    assert_eq!(report.records.len(), 2);
}

#[test]
fn only_corpus_languages_have_rule_families() {
    for language in ["English", "Spanish", "Italian", "German"] {
        assert!(rules_for_language(language).is_some(), "{language}");
    }
    // Swedish has a translation code but no corpus, so no rule family.
    assert!(rules_for_language("Swedish").is_none());
    assert!(rules_for_language("Klingon").is_none());
}

#[test]
fn unknown_language_fails_before_processing() {
    let groups = vec![LanguageGroup {
        language: "Klingon".into(),
        keyword: "batlh".into(),
        sentences: vec!["tlhIngan maH.".into()],
    }];
    let parser = ConlluParser::default();
    let err = corpus::run_extraction(&groups, &parser).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PipelineError>(),
        Some(PipelineError::UnknownLanguage(_))
    ));
}

#[test]
fn empty_language_yields_zero_records_and_continues() {
    let mut parser = ConlluParser::default();
    parser.load_str(POSSESSIVE_DE, "German").unwrap();

    let groups = vec![
        LanguageGroup {
            language: "English".into(),
            keyword: "freedom".into(),
            sentences: vec![],
        },
        LanguageGroup {
            language: "German".into(),
            keyword: "Freiheit".into(),
            sentences: vec!["Ich kämpfe für meine Freiheit.".into()],
        },
    ];
    let report = corpus::run_extraction(&groups, &parser).unwrap();
    assert!(report
        .records
        .iter()
        .all(|record| record.lang_name == "German"));
    assert!(!report.records.is_empty());
}
