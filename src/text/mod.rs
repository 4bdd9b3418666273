//! Text normalization and tokenization shared by the checks and the similarity engine.
//!
//! Everything here is deterministic and side-effect free.

pub mod stopwords;

#[cfg(test)]
mod tests;

pub use stopwords::{
    DOMAIN_TAG_STOPWORDS, ENGLISH_STOP_WORDS, GENERIC_TAG_STOPWORDS, TAG_STOPWORDS,
    is_tag_stopword,
};

use regex::Regex;
use std::sync::LazyLock;

static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^<>]*>").expect("markup pattern is valid"));

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("punctuation pattern is valid"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("word pattern is valid"));

static FEATURE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("feature pattern is valid"));

/// Lowercases, strips markup tags and punctuation, and collapses whitespace.
///
/// Punctuation is replaced by a space so `"data-driven"` becomes `"data driven"`
/// rather than `"datadriven"`.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let lowered = text.to_lowercase();
    let without_markup = MARKUP_TAG.replace_all(&lowered, " ");
    let without_punct = NON_WORD.replace_all(&without_markup, " ");
    WHITESPACE_RUN
        .replace_all(&without_punct, " ")
        .trim()
        .to_string()
}

/// Lowercased word tokens (`\w+`) in order of appearance.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD.find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Tokens of two or more word characters, the unit TF-IDF features are built from.
pub fn feature_tokens(text: &str) -> Vec<&str> {
    FEATURE_WORD.find_iter(text).map(|m| m.as_str()).collect()
}

/// Normalizes text for content fingerprinting: lowercased, punctuation removed
/// without inserting separators, then whitespace collapsed and trimmed.
///
/// Collapsing after the strip keeps a standalone symbol such as `" - "` from
/// leaving a double space behind.
pub fn fingerprint_form(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = NON_WORD.replace_all(&lowered, "");
    WHITESPACE_RUN
        .replace_all(stripped.trim(), " ")
        .into_owned()
}
