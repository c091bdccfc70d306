use lexiscope::error::PipelineError;
use lexiscope::parse::conllu::{parse_block, ConlluParser};
use lexiscope::parse::Parser;

const BLOCK: &str = "\
# sent_id = 1
# text = La libertà è importante.
1\tLa\til\tDET\t_\t_\t2\tdet\t_\t_
2\tlibertà\tlibertà\tNOUN\t_\t_\t4\tnsubj\t_\t_
3\tè\tessere\tAUX\t_\t_\t4\tcop\t_\t_
4\timportante\timportante\tADJ\t_\t_\t0\troot\t_\t_
5\t.\t.\tPUNCT\t_\t_\t4\tpunct\t_\t_";

#[test]
fn block_builds_an_arena_with_back_links() {
    let sentence = parse_block(BLOCK, "Italian").unwrap();
    assert_eq!(sentence.text, "La libertà è importante.");
    assert_eq!(sentence.tokens.len(), 5);

    // Root points at itself; everyone else at a real head.
    assert!(sentence.is_root(3));
    assert_eq!(sentence.tokens[1].head, 3);
    assert_eq!(sentence.head_of(1).lemma, "importante");

    // Children mirror the head links.
    assert!(sentence.tokens[3].children.contains(&1));
    assert!(sentence.tokens[1].children.contains(&0));
}

#[test]
fn missing_lemma_falls_back_to_lowercased_form() {
    let block = "1\tFreiheit\t_\tNOUN\t_\t_\t0\troot\t_\t_";
    let sentence = parse_block(block, "German").unwrap();
    assert_eq!(sentence.tokens[0].lemma, "freiheit");
    // Without a text comment the surface forms are joined.
    assert_eq!(sentence.text, "Freiheit");
}

#[test]
fn multiword_ranges_are_skipped() {
    let block = "\
1-2\tdella\t_\t_\t_\t_\t_\t_\t_\t_
1\tdi\tdi\tADP\t_\t_\t3\tcase\t_\t_
2\tla\til\tDET\t_\t_\t3\tdet\t_\t_
3\tlibertà\tlibertà\tNOUN\t_\t_\t0\troot\t_\t_";
    let sentence = parse_block(block, "Italian").unwrap();
    assert_eq!(sentence.tokens.len(), 3);
}

#[test]
fn out_of_range_head_is_rejected() {
    let block = "1\tlibertà\tlibertà\tNOUN\t_\t_\t9\tnsubj\t_\t_";
    assert!(parse_block(block, "Italian").is_err());
}

#[test]
fn lookup_is_whitespace_insensitive_and_misses_are_parse_failures() {
    let mut parser = ConlluParser::default();
    parser.load_str(BLOCK, "Italian").unwrap();
    assert_eq!(parser.len(), 1);

    let found = parser.parse("La  libertà è importante. ", "Italian").unwrap();
    assert_eq!(found.language, "Italian");

    let err = parser.parse("Una frase sconosciuta.", "Italian").unwrap_err();
    assert!(matches!(err, PipelineError::ParseFailure { .. }));

    // Same text under another language tag is a different parse.
    assert!(parser
        .parse("La libertà è importante.", "Spanish")
        .is_err());
}
