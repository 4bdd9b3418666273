//! Word lists used by the preprocessor and the tag checks.

use std::collections::HashSet;
use std::sync::LazyLock;

/// English stop words removed before TF-IDF feature extraction.
pub static ENGLISH_STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
        "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
        "amongst", "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone",
        "anything", "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became",
        "because", "become", "becomes", "becoming", "been", "before", "beforehand", "behind",
        "being", "below", "beside", "besides", "between", "beyond", "bill", "both", "bottom",
        "but", "by", "call", "can", "cannot", "cant", "co", "con", "could", "couldnt", "cry",
        "de", "describe", "detail", "do", "done", "down", "due", "during", "each", "eg", "eight",
        "either", "eleven", "else", "elsewhere", "empty", "enough", "etc", "even", "ever",
        "every", "everyone", "everything", "everywhere", "except", "few", "fifteen", "fifty",
        "fill", "find", "fire", "first", "five", "for", "former", "formerly", "forty", "found",
        "four", "from", "front", "full", "further", "get", "give", "go", "had", "has", "hasnt",
        "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein", "hereupon",
        "hers", "herself", "him", "himself", "his", "how", "however", "hundred", "i", "ie", "if",
        "in", "inc", "indeed", "interest", "into", "is", "it", "its", "itself", "keep", "last",
        "latter", "latterly", "least", "less", "ltd", "made", "many", "may", "me", "meanwhile",
        "might", "mill", "mine", "more", "moreover", "most", "mostly", "move", "much", "must",
        "my", "myself", "name", "namely", "neither", "never", "nevertheless", "next", "nine",
        "no", "nobody", "none", "noone", "nor", "not", "nothing", "now", "nowhere", "of", "off",
        "often", "on", "once", "one", "only", "onto", "or", "other", "others", "otherwise",
        "our", "ours", "ourselves", "out", "over", "own", "part", "per", "perhaps", "please",
        "put", "rather", "re", "same", "see", "seem", "seemed", "seeming", "seems", "serious",
        "several", "she", "should", "show", "side", "since", "sincere", "six", "sixty", "so",
        "some", "somehow", "someone", "something", "sometime", "sometimes", "somewhere",
        "still", "such", "system", "take", "ten", "than", "that", "the", "their", "them",
        "themselves", "then", "thence", "there", "thereafter", "thereby", "therefore",
        "therein", "thereupon", "these", "they", "thick", "thin", "third", "this", "those",
        "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too",
        "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up",
        "upon", "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when",
        "whence", "whenever", "where", "whereafter", "whereas", "whereby", "wherein",
        "whereupon", "wherever", "whether", "which", "while", "whither", "who", "whoever",
        "whole", "whom", "whose", "why", "will", "with", "within", "without", "would", "yet",
        "you", "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

/// Business terms too generic to be useful as a primary tag.
pub const GENERIC_TAG_STOPWORDS: &[&str] = &[
    "document", "file", "content", "text", "information", "data", "report", "summary",
    "overview", "details", "description", "general", "misc", "miscellaneous", "other",
    "various", "company", "business", "corporate", "organization", "important", "urgent",
    "critical", "high", "low", "medium", "new", "old", "recent", "current", "updated", "latest",
    "final", "draft", "version", "revision", "edit", "meeting", "call", "discussion",
    "conversation", "email", "message", "communication", "note", "memo", "project", "task",
    "work", "job", "assignment", "process", "procedure", "method", "approach", "team", "group",
    "department", "division", "customer", "client", "user", "person", "people", "product",
    "service", "solution", "system", "policy", "guideline", "rule", "requirement", "review",
    "analysis", "evaluation", "assessment", "planning", "strategy", "goal", "objective",
    "training", "education", "learning", "knowledge", "support", "help", "assistance",
    "guidance", "management", "admin", "administration", "operational", "technical",
    "functional", "and", "or", "but", "the", "a", "an", "is", "are", "was", "were", "for",
    "with", "about", "from", "into", "through", "during", "before", "after", "above", "below",
    "up", "down", "out", "off", "over", "under", "again", "further", "then", "once",
];

/// Industry terms that are too broad to carry a tag on their own.
pub const DOMAIN_TAG_STOPWORDS: &[&str] = &[
    "api", "database", "server", "client", "application", "software", "hardware", "network",
    "security", "backup", "maintenance", "employee", "staff", "personnel", "human resources",
    "hr", "benefits", "payroll", "performance", "evaluation", "compliance", "regulation",
    "legal", "contract", "agreement", "terms", "conditions", "privacy", "confidential",
];

/// Union of [`GENERIC_TAG_STOPWORDS`] and [`DOMAIN_TAG_STOPWORDS`].
pub static TAG_STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    GENERIC_TAG_STOPWORDS
        .iter()
        .chain(DOMAIN_TAG_STOPWORDS.iter())
        .copied()
        .collect()
});

/// Returns `true` if `tag` (already lowercased and trimmed) is a tag stopword.
#[inline]
pub fn is_tag_stopword(tag: &str) -> bool {
    TAG_STOPWORDS.contains(tag)
}
