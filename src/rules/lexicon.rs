//! Domain vocabularies used by the domain relevance and specificity checks.

use std::fmt;

use crate::text::normalize;

/// One named domain and its characteristic terms (single words or phrases).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    pub name: String,
    pub terms: Vec<String>,
}

impl Domain {
    pub fn new<S: AsRef<str>>(name: impl Into<String>, terms: &[S]) -> Self {
        Self {
            name: name.into(),
            terms: terms
                .iter()
                .map(|t| normalize(t.as_ref()))
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    /// Number of distinct terms that occur in `text` on token boundaries.
    pub fn hits(&self, text: &str) -> usize {
        let padded = padded(text);
        self.terms
            .iter()
            .filter(|term| padded.contains(&format!(" {term} ")))
            .count()
    }

    /// Share of this domain's terms present in `text`.
    pub fn coverage(&self, text: &str) -> f64 {
        if self.terms.is_empty() {
            return 0.0;
        }
        self.hits(text) as f64 / self.terms.len() as f64
    }

    /// The terms joined into one reference document for TF-IDF comparison.
    pub fn reference_document(&self) -> String {
        self.terms.join(" ")
    }
}

/// An extensible set of [`Domain`]s.
///
/// [`DomainLexicon::default`] carries the technology, human resources and legal
/// vocabularies.
#[derive(Clone, PartialEq, Eq)]
pub struct DomainLexicon {
    domains: Vec<Domain>,
}

impl fmt::Debug for DomainLexicon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainLexicon")
            .field(
                "domains",
                &self.domains.iter().map(|d| d.name.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Default for DomainLexicon {
    fn default() -> Self {
        Self::empty()
            .with_domain(Domain::new(
                "technology",
                &[
                    "api",
                    "database",
                    "server",
                    "client",
                    "application",
                    "software",
                    "hardware",
                    "network",
                    "security",
                    "backup",
                    "maintenance",
                ],
            ))
            .with_domain(Domain::new(
                "human_resources",
                &[
                    "employee",
                    "staff",
                    "personnel",
                    "human resources",
                    "hr",
                    "benefits",
                    "payroll",
                    "performance",
                    "evaluation",
                ],
            ))
            .with_domain(Domain::new(
                "legal",
                &[
                    "compliance",
                    "regulation",
                    "legal",
                    "contract",
                    "agreement",
                    "terms",
                    "conditions",
                    "privacy",
                    "confidential",
                ],
            ))
    }
}

impl DomainLexicon {
    /// A lexicon with no domains.
    pub fn empty() -> Self {
        Self {
            domains: Vec::new(),
        }
    }

    /// Adds a domain, replacing any existing domain with the same name.
    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.add_domain(domain);
        self
    }

    pub fn add_domain(&mut self, domain: Domain) {
        match self.domains.iter_mut().find(|d| d.name == domain.name) {
            Some(existing) => *existing = domain,
            None => self.domains.push(domain),
        }
    }

    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Returns `true` if `term` equals one of the lexicon terms after normalization.
    pub fn contains_term(&self, term: &str) -> bool {
        let term = normalize(term);
        !term.is_empty()
            && self
                .domains
                .iter()
                .any(|d| d.terms.iter().any(|t| *t == term))
    }

    /// First domain with a term occurring in `text`.
    pub fn matching_domain(&self, text: &str) -> Option<&str> {
        self.domains
            .iter()
            .find(|d| d.hits(text) > 0)
            .map(|d| d.name.as_str())
    }

    /// One reference document per domain, in domain order.
    pub fn reference_documents(&self) -> Vec<String> {
        self.domains.iter().map(Domain::reference_document).collect()
    }
}

fn padded(text: &str) -> String {
    format!(" {} ", normalize(text))
}
