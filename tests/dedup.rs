use lexiscope::corpus::dedup::{
    collapse_exact_indices, greedy_keep_indices, normalize_text, LexicalSimilarity, Similarity,
    SimilarityMatrix,
};
use lexiscope::error::PipelineError;
use proptest::prelude::*;

fn matrix_from_pairs(n: usize, pairs: &[(usize, usize, f32)]) -> SimilarityMatrix {
    let (matrix, _) = SimilarityMatrix::from_fn(n, |i, j| {
        Ok(pairs
            .iter()
            .find(|(a, b, _)| (*a, *b) == (i, j) || (*a, *b) == (j, i))
            .map(|(_, _, score)| *score)
            .unwrap_or(0.0))
    });
    matrix
}

#[test]
fn normalization_collapses_whitespace_and_composes_unicode() {
    assert_eq!(normalize_text("  la   libertà  "), "la libertà");
    // Decomposed a + combining grave composes to the same form.
    assert_eq!(normalize_text("liberta\u{0300}"), "libert\u{e0}");
}

#[test]
fn exact_duplicates_keep_one_representative() {
    let sentences = vec![
        "Freedom is important.".to_string(),
        "Freedom  is important. ".to_string(),
        "Another sentence.".to_string(),
    ];
    assert_eq!(collapse_exact_indices(&sentences), vec![0, 2]);
}

#[test]
fn greedy_sweep_privileges_earlier_sentences() {
    // [A, B] keeps A; [B, A] keeps B. Order dependence is contractual.
    let a = "The dog runs in the park.".to_string();
    let b = "The dog runs in the park!".to_string();

    let forward = vec![a.clone(), b.clone()];
    let embeddings = LexicalSimilarity.embed(&forward).unwrap();
    let matrix = SimilarityMatrix::from_embeddings(&embeddings);
    let kept = greedy_keep_indices(&matrix, 0.95);
    assert_eq!(kept, vec![0]);
    assert_eq!(forward[kept[0]], a);

    let reverse = vec![b.clone(), a];
    let embeddings = LexicalSimilarity.embed(&reverse).unwrap();
    let matrix = SimilarityMatrix::from_embeddings(&embeddings);
    let kept = greedy_keep_indices(&matrix, 0.95);
    assert_eq!(kept, vec![0]);
    assert_eq!(reverse[kept[0]], b);
}

#[test]
fn threshold_boundary_is_inclusive() {
    let at_threshold = matrix_from_pairs(2, &[(0, 1, 0.95)]);
    assert_eq!(greedy_keep_indices(&at_threshold, 0.95), vec![0]);

    let below = matrix_from_pairs(2, &[(0, 1, 0.9499)]);
    assert_eq!(greedy_keep_indices(&below, 0.95), vec![0, 1]);
}

#[test]
fn dropped_sentence_cannot_drop_others() {
    // 1 is near-duplicate of 0 and of 2, but 0 and 2 are unrelated: once 1
    // is dropped it must not take 2 down with it.
    let matrix = matrix_from_pairs(3, &[(0, 1, 0.99), (1, 2, 0.99)]);
    assert_eq!(greedy_keep_indices(&matrix, 0.95), vec![0, 2]);
}

#[test]
fn similarity_failure_is_fail_open() {
    let (matrix, unavailable) = SimilarityMatrix::from_fn(2, |i, j| {
        Err(PipelineError::SimilarityUnavailable(i, j))
    });
    assert_eq!(unavailable, 1);
    assert_eq!(matrix.get(0, 1), 0.0);
    assert_eq!(greedy_keep_indices(&matrix, 0.95), vec![0, 1]);
}

#[test]
fn lexical_similarity_scores_duplicates_at_one() {
    let sentences = vec![
        "La libertà è importante.".to_string(),
        "La libertà è importante.".to_string(),
        "Il cane corre nel parco.".to_string(),
    ];
    let embeddings = LexicalSimilarity.embed(&sentences).unwrap();
    let matrix = SimilarityMatrix::from_embeddings(&embeddings);
    assert!(matrix.get(0, 1) > 0.999);
    assert!(matrix.get(0, 2) < 0.5);
    assert_eq!(greedy_keep_indices(&matrix, 0.95), vec![0, 2]);
}

proptest! {
    /// Running the sweep on its own output drops nothing further.
    #[test]
    fn greedy_dedup_is_idempotent(scores in proptest::collection::vec(0.0f32..=1.0, 0..28)) {
        // Interpret the vector as the upper triangle of a symmetric matrix.
        let n = (1..=8usize)
            .find(|&k| k * k.saturating_sub(1) / 2 >= scores.len())
            .unwrap_or(8);
        let (matrix, _) = SimilarityMatrix::from_fn(n, |i, j| {
            let flat = i * n + j;
            Ok(scores.get(flat % scores.len().max(1)).copied().unwrap_or(0.0))
        });
        let kept = greedy_keep_indices(&matrix, 0.95);

        let (sub, _) = SimilarityMatrix::from_fn(kept.len(), |i, j| {
            Ok(matrix.get(kept[i], kept[j]))
        });
        let again = greedy_keep_indices(&sub, 0.95);
        prop_assert_eq!(again, (0..kept.len()).collect::<Vec<_>>());
    }
}
