use super::*;

#[test]
fn test_normalize_lowercases_and_collapses() {
    assert_eq!(normalize("  Hello   WORLD \n\t again "), "hello world again");
}

#[test]
fn test_normalize_strips_punctuation_keeping_boundaries() {
    assert_eq!(normalize("data-driven, cloud/edge!"), "data driven cloud edge");
}

#[test]
fn test_normalize_strips_markup() {
    assert_eq!(
        normalize("<p>Quarterly <b>payroll</b> audit</p>"),
        "quarterly payroll audit"
    );
}

#[test]
fn test_normalize_empty_and_punctuation_only() {
    assert_eq!(normalize(""), "");
    assert_eq!(normalize("!!! ... ???"), "");
}

#[test]
fn test_normalize_is_idempotent() {
    let once = normalize("Kubernetes: Pod-Scheduling <i>Deep</i> Dive");
    assert_eq!(normalize(&once), once);
}

#[test]
fn test_tokenize_keeps_short_tokens() {
    assert_eq!(tokenize("A cat, 42 dogs"), vec!["a", "cat", "42", "dogs"]);
}

#[test]
fn test_feature_tokens_drop_single_characters() {
    assert_eq!(feature_tokens("a bc d efg"), vec!["bc", "efg"]);
}

#[test]
fn test_fingerprint_form_ignores_case_spacing_and_punctuation() {
    assert_eq!(
        fingerprint_form("  Hello,   World! "),
        fingerprint_form("hello world")
    );
}

#[test]
fn test_fingerprint_form_standalone_symbols_leave_single_spaces() {
    assert_eq!(fingerprint_form("Payroll - audit"), "payroll audit");
    assert_eq!(fingerprint_form("Payroll -- audit !"), "payroll audit");
    assert_eq!(fingerprint_form("- backup & restore -"), "backup restore");
    assert_eq!(fingerprint_form("don't"), "dont");
}

#[test]
fn test_stopword_lists() {
    assert!(ENGLISH_STOP_WORDS.contains("the"));
    assert!(ENGLISH_STOP_WORDS.contains("system"));
    assert!(!ENGLISH_STOP_WORDS.contains("kubernetes"));

    assert!(is_tag_stopword("document"));
    assert!(is_tag_stopword("human resources"));
    assert!(!is_tag_stopword("kubernetes"));
}
