//! Vector-space similarity for content/tag comparison.
//!
//! [`SimilarityEngine`] wraps a [`TfidfVectorizer`] and answers the three questions
//! the checks ask: how close is each tag to the content, how close is a tag to
//! each domain lexicon, and how close are the tags to one another.
//!
//! Degenerate input (empty text, tags made only of stop words, or a vocabulary
//! pruned to nothing) always scores `0.0`; the engine never fails.

pub mod tfidf;

#[cfg(test)]
mod tests;

pub use tfidf::{
    CONTENT_MAX_FEATURES, DEFAULT_MAX_DF, TAG_MAX_FEATURES, TfidfConfig, TfidfMatrix,
    TfidfVectorizer,
};

use tracing::debug;

#[derive(Debug, Clone)]
/// TF-IDF backed similarity scoring.
pub struct SimilarityEngine {
    content_vectorizer: TfidfVectorizer,
    tag_vectorizer: TfidfVectorizer,
}

impl Default for SimilarityEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SimilarityEngine {
    /// Creates an engine with the standard vocabulary caps.
    pub fn new() -> Self {
        Self {
            content_vectorizer: TfidfVectorizer::new(TfidfConfig::with_max_features(
                CONTENT_MAX_FEATURES,
            )),
            tag_vectorizer: TfidfVectorizer::new(TfidfConfig::with_max_features(
                TAG_MAX_FEATURES,
            )),
        }
    }

    /// Creates an engine with explicit vectorizer settings.
    pub fn with_configs(content: TfidfConfig, tags: TfidfConfig) -> Self {
        Self {
            content_vectorizer: TfidfVectorizer::new(content),
            tag_vectorizer: TfidfVectorizer::new(tags),
        }
    }

    /// Vectorizes an ordered corpus with the content-scale vectorizer.
    pub fn vectorize<S: AsRef<str>>(&self, corpus: &[S]) -> TfidfMatrix {
        self.content_vectorizer.fit_transform(corpus)
    }

    /// Cosine similarity between `content` and each tag, in tag order.
    ///
    /// Content and tags are fitted together as one corpus.
    pub fn content_tag_similarities<S: AsRef<str>>(&self, content: &str, tags: &[S]) -> Vec<f64> {
        if tags.is_empty() {
            return Vec::new();
        }

        let mut corpus: Vec<&str> = Vec::with_capacity(tags.len() + 1);
        corpus.push(content);
        corpus.extend(tags.iter().map(AsRef::as_ref));

        let matrix = self.content_vectorizer.fit_transform(&corpus);
        similarities_to_row(&matrix, 0)
    }

    /// Cosine similarity between `probe` and each reference document, in order.
    ///
    /// Used to compare a tag against the domain lexicons.
    pub fn probe_similarities<S: AsRef<str>>(&self, probe: &str, references: &[S]) -> Vec<f64> {
        if references.is_empty() {
            return Vec::new();
        }

        let mut corpus: Vec<&str> = references.iter().map(AsRef::as_ref).collect();
        corpus.push(probe);

        let matrix = self.content_vectorizer.fit_transform(&corpus);
        let probe_index = corpus.len() - 1;
        (0..references.len())
            .map(|i| row_cosine(&matrix, probe_index, i))
            .collect()
    }

    /// Upper-triangle pairwise similarities between tags as `(i, j, score)` with `i < j`.
    pub fn pairwise_tag_similarities<S: AsRef<str>>(&self, tags: &[S]) -> Vec<(usize, usize, f64)> {
        if tags.len() < 2 {
            return Vec::new();
        }

        let matrix = self.tag_vectorizer.fit_transform(tags);
        if matrix.has_empty_vocabulary() {
            debug!(tags = tags.len(), "Tag vocabulary empty; coherence is zero");
        }

        let mut pairs = Vec::with_capacity(tags.len() * (tags.len() - 1) / 2);
        for i in 0..tags.len() {
            for j in (i + 1)..tags.len() {
                pairs.push((i, j, row_cosine(&matrix, i, j)));
            }
        }
        pairs
    }
}

fn similarities_to_row(matrix: &TfidfMatrix, anchor: usize) -> Vec<f64> {
    (0..matrix.len())
        .filter(|&i| i != anchor)
        .map(|i| row_cosine(matrix, anchor, i))
        .collect()
}

fn row_cosine(matrix: &TfidfMatrix, a: usize, b: usize) -> f64 {
    match (matrix.row(a), matrix.row(b)) {
        (Some(ra), Some(rb)) => cosine(ra, rb),
        _ => 0.0,
    }
}

/// Cosine similarity clamped to `[0, 1]`.
///
/// Mismatched lengths, empty vectors and zero vectors score `0.0`.
#[inline]
pub fn cosine(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a_sq, norm_b_sq) =
        a.iter()
            .zip(b.iter())
            .fold((0.0f64, 0.0f64, 0.0f64), |(dot, na, nb), (av, bv)| {
                (dot + av * bv, na + av * av, nb + bv * bv)
            });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let similarity = dot / (norm_a * norm_b);
    if similarity.is_nan() {
        0.0
    } else {
        similarity.clamp(0.0, 1.0)
    }
}
