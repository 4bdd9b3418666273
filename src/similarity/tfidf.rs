//! TF-IDF vectorization over a small, per-call corpus.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::trace;

use crate::text::{ENGLISH_STOP_WORDS, feature_tokens, normalize};

/// Vocabulary cap used when comparing content against tags.
pub const CONTENT_MAX_FEATURES: usize = 1000;

/// Vocabulary cap used when comparing tags against each other.
pub const TAG_MAX_FEATURES: usize = 500;

/// Terms present in more than this share of documents are dropped.
pub const DEFAULT_MAX_DF: f64 = 0.95;

#[derive(Debug, Clone, PartialEq)]
/// Feature-extraction settings for [`TfidfVectorizer`].
pub struct TfidfConfig {
    /// Maximum vocabulary size, keeping the most frequent terms.
    pub max_features: usize,
    /// Smallest and largest n-gram length (inclusive).
    pub ngram_range: (usize, usize),
    /// Minimum number of documents a term must appear in.
    pub min_df: usize,
    /// Maximum share of documents a term may appear in.
    pub max_df: f64,
    /// Remove English stop words before building n-grams.
    pub remove_stop_words: bool,
}

impl Default for TfidfConfig {
    fn default() -> Self {
        Self {
            max_features: CONTENT_MAX_FEATURES,
            ngram_range: (1, 2),
            min_df: 1,
            max_df: DEFAULT_MAX_DF,
            remove_stop_words: true,
        }
    }
}

impl TfidfConfig {
    /// Settings with a specific vocabulary cap.
    pub fn with_max_features(max_features: usize) -> Self {
        Self {
            max_features,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
/// Dense, L2-normalized TF-IDF rows (one per input document).
pub struct TfidfMatrix {
    vocabulary: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl TfidfMatrix {
    /// Number of documents (rows).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the matrix has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sorted feature names; column `i` of every row corresponds to `vocabulary()[i]`.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Returns `true` if pruning left no usable features.
    pub fn has_empty_vocabulary(&self) -> bool {
        self.vocabulary.is_empty()
    }

    /// Returns the vector for document `index`.
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Returns all rows.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }
}

#[derive(Debug, Clone, Default)]
/// Builds [`TfidfMatrix`] values from raw text.
pub struct TfidfVectorizer {
    config: TfidfConfig,
}

impl TfidfVectorizer {
    /// Creates a vectorizer with the given settings.
    pub fn new(config: TfidfConfig) -> Self {
        Self { config }
    }

    /// Returns the active settings.
    pub fn config(&self) -> &TfidfConfig {
        &self.config
    }

    /// Fits a vocabulary on `corpus` and returns its TF-IDF matrix.
    ///
    /// Each document is normalized first. Smooth IDF is used:
    /// `idf(t) = ln((1 + n) / (1 + df(t))) + 1`, with raw term counts as TF and
    /// L2-normalized rows. Documents with no surviving features become zero rows.
    pub fn fit_transform<S: AsRef<str>>(&self, corpus: &[S]) -> TfidfMatrix {
        if corpus.is_empty() {
            return TfidfMatrix::default();
        }

        let counts: Vec<HashMap<String, usize>> = corpus
            .iter()
            .map(|doc| self.count_features(doc.as_ref()))
            .collect();

        let vocabulary = self.select_vocabulary(&counts);
        if vocabulary.is_empty() {
            trace!(documents = corpus.len(), "TF-IDF vocabulary empty after pruning");
            return TfidfMatrix {
                vocabulary,
                rows: vec![Vec::new(); corpus.len()],
            };
        }

        let n_docs = counts.len() as f64;
        let idf: Vec<f64> = vocabulary
            .iter()
            .map(|term| {
                let df = counts.iter().filter(|c| c.contains_key(term)).count() as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let rows = counts
            .iter()
            .map(|doc_counts| {
                let mut row: Vec<f64> = vocabulary
                    .iter()
                    .zip(idf.iter())
                    .map(|(term, weight)| {
                        doc_counts.get(term).copied().unwrap_or(0) as f64 * weight
                    })
                    .collect();
                l2_normalize(&mut row);
                row
            })
            .collect();

        TfidfMatrix { vocabulary, rows }
    }

    fn count_features(&self, document: &str) -> HashMap<String, usize> {
        let normalized = normalize(document);
        let tokens: Vec<&str> = feature_tokens(&normalized)
            .into_iter()
            .filter(|t| !self.config.remove_stop_words || !ENGLISH_STOP_WORDS.contains(t))
            .collect();

        let (min_n, max_n) = self.config.ngram_range;
        let mut counts = HashMap::new();
        for n in min_n.max(1)..=max_n {
            if tokens.len() < n {
                break;
            }
            for window in tokens.windows(n) {
                *counts.entry(window.join(" ")).or_insert(0) += 1;
            }
        }
        counts
    }

    fn select_vocabulary(&self, counts: &[HashMap<String, usize>]) -> Vec<String> {
        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        let mut corpus_frequency: HashMap<&str, usize> = HashMap::new();
        for doc in counts {
            for (term, count) in doc {
                *document_frequency.entry(term.as_str()).or_insert(0) += 1;
                *corpus_frequency.entry(term.as_str()).or_insert(0) += count;
            }
        }

        let max_doc_count = self.config.max_df * counts.len() as f64;
        let mut retained: Vec<&str> = document_frequency
            .into_iter()
            .filter(|(_, df)| *df >= self.config.min_df && (*df as f64) <= max_doc_count)
            .map(|(term, _)| term)
            .collect();

        if retained.len() > self.config.max_features {
            retained.sort_by(|a, b| {
                corpus_frequency[b]
                    .cmp(&corpus_frequency[a])
                    .then_with(|| a.cmp(b))
            });
            retained.truncate(self.config.max_features);
        }

        let unique: HashSet<&str> = retained.into_iter().collect();
        let mut vocabulary: Vec<String> = unique.into_iter().map(str::to_string).collect();
        vocabulary.sort();
        vocabulary
    }
}

fn l2_normalize(row: &mut [f64]) {
    let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        row.iter_mut().for_each(|v| *v /= norm);
    }
}
