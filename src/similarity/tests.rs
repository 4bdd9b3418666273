use super::*;

#[test]
fn test_cosine_identical_vectors() {
    let v = [0.3, 0.4, 0.5];
    assert!((cosine(&v, &v) - 1.0).abs() < 1e-9);
}

#[test]
fn test_cosine_orthogonal_vectors() {
    assert_eq!(cosine(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
}

#[test]
fn test_cosine_degenerate_inputs() {
    assert_eq!(cosine(&[], &[]), 0.0);
    assert_eq!(cosine(&[1.0, 2.0], &[1.0]), 0.0);
    assert_eq!(cosine(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    assert_eq!(cosine(&[f64::NAN, 1.0], &[1.0, 1.0]), 0.0);
}

#[test]
fn test_cosine_negative_is_clamped() {
    assert_eq!(cosine(&[1.0, 0.0], &[-1.0, 0.0]), 0.0);
}

#[test]
fn test_vectorize_rows_are_unit_length() {
    let engine = SimilarityEngine::new();
    let matrix = engine.vectorize(&[
        "database server backup",
        "payroll benefits review",
        "database migration plan",
    ]);

    assert_eq!(matrix.len(), 3);
    for row in matrix.rows() {
        let norm: f64 = row.iter().map(|v| v * v).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }
}

#[test]
fn test_vectorize_removes_stop_words() {
    let engine = SimilarityEngine::new();
    let matrix = engine.vectorize(&["the database", "a server"]);

    assert!(!matrix.vocabulary().iter().any(|t| t == "the"));
    assert!(matrix.vocabulary().iter().any(|t| t == "database"));
}

#[test]
fn test_vectorize_includes_bigrams() {
    let engine = SimilarityEngine::new();
    let matrix = engine.vectorize(&["database backup policy", "payroll"]);

    assert!(matrix.vocabulary().iter().any(|t| t == "database backup"));
}

#[test]
fn test_terms_in_every_document_of_small_corpus_are_pruned() {
    // 2 documents: df = 2 exceeds 0.95 * 2, so a shared term is dropped.
    let engine = SimilarityEngine::new();
    let scores = engine.content_tag_similarities("database", &["database"]);

    assert_eq!(scores, vec![0.0]);
}

#[test]
fn test_content_tag_similarities_orders_by_relevance() {
    let engine = SimilarityEngine::new();
    let content = "The database server needs a nightly backup and database maintenance window.";
    let scores = engine.content_tag_similarities(content, &["database", "cooking"]);

    assert_eq!(scores.len(), 2);
    assert!(scores[0] > 0.0);
    assert_eq!(scores[1], 0.0);
}

#[test]
fn test_content_tag_similarities_no_tags() {
    let engine = SimilarityEngine::new();
    let tags: [&str; 0] = [];
    assert!(engine.content_tag_similarities("anything", &tags).is_empty());
}

#[test]
fn test_stop_word_tags_score_zero() {
    let engine = SimilarityEngine::new();
    let scores = engine.content_tag_similarities(
        "Quarterly payroll review for the finance team",
        &["the", "and"],
    );

    assert!(scores.iter().all(|&s| s == 0.0));
}

#[test]
fn test_probe_similarities_prefers_matching_reference() {
    let engine = SimilarityEngine::new();
    let references = [
        "api database server client network",
        "employee staff payroll benefits",
        "contract compliance privacy regulation",
    ];
    let scores = engine.probe_similarities("payroll", &references);

    assert_eq!(scores.len(), 3);
    assert!(scores[1] > 0.0);
    assert_eq!(scores[0], 0.0);
    assert_eq!(scores[2], 0.0);
}

#[test]
fn test_pairwise_tag_similarities_counts_pairs() {
    let engine = SimilarityEngine::new();
    let pairs = engine.pairwise_tag_similarities(&[
        "database backup",
        "database restore",
        "payroll",
        "benefits",
    ]);

    assert_eq!(pairs.len(), 6);
    assert!(pairs.iter().all(|&(i, j, _)| i < j));

    let related = pairs
        .iter()
        .find(|&&(i, j, _)| i == 0 && j == 1)
        .map(|&(_, _, s)| s)
        .unwrap_or_default();
    assert!(related > 0.0);
}

#[test]
fn test_pairwise_with_empty_vocabulary_is_zero() {
    let engine = SimilarityEngine::new();
    let pairs = engine.pairwise_tag_similarities(&["the", "and", "of"]);

    assert_eq!(pairs.len(), 3);
    assert!(pairs.iter().all(|&(_, _, s)| s == 0.0));
}

#[test]
fn test_pairwise_single_tag_is_empty() {
    let engine = SimilarityEngine::new();
    assert!(engine.pairwise_tag_similarities(&["solo"]).is_empty());
}

#[test]
fn test_with_configs_can_keep_shared_terms() {
    let lenient = TfidfConfig {
        max_df: 1.0,
        ..TfidfConfig::with_max_features(TAG_MAX_FEATURES)
    };
    let engine = SimilarityEngine::with_configs(lenient.clone(), lenient);

    let scores = engine.content_tag_similarities("database", &["database"]);

    assert!((scores[0] - 1.0).abs() < 1e-9);
}
