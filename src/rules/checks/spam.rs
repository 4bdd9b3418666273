//! Spam and placeholder-content detection.
//!
//! Literal signatures are regexes. Repetition signatures need backreferences,
//! which `regex` does not support, so they are scanned by hand.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::{CheckContext, percent};
use crate::constants::{CHECK_SPAM, THRESHOLD_SPAM};
use crate::rules::error::RuleResult;
use crate::rules::types::{CheckResult, RuleCategory, Severity};

const CATEGORY: RuleCategory = RuleCategory::SpamDetection;

static SIGNATURES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"lorem ipsum",
        r"test\s*(document|content|text|data)",
        r"sample\s*(document|content|text|data)",
        r"placeholder\s*(text|content)",
        r"dummy\s*(text|content|data)",
        r"asdf|qwerty|123456|abcdef",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("spam signature is valid"))
    .collect()
});

/// Identical consecutive tokens needed to count as a repeated word.
const REPEATED_TOKEN_RUN: usize = 4;

/// Shortest phrase, in characters, considered for phrase repetition.
const MIN_REPEATED_PHRASE: usize = 10;

/// Longest phrase scanned for repetition.
const MAX_REPEATED_PHRASE: usize = 256;

/// Back-to-back copies needed to count as a repeated phrase.
const REPEATED_PHRASE_COPIES: usize = 3;

/// Identical leading characters needed to count as character spam.
const LEADING_CHAR_RUN: usize = 21;

/// Word count above which the repetition ratio is evaluated.
const MIN_WORDS_FOR_RATIO: usize = 10;

pub fn spam_patterns(ctx: &CheckContext<'_>) -> RuleResult<CheckResult> {
    let threshold = ctx.thresholds.get(THRESHOLD_SPAM)?;
    let text = ctx.content.to_lowercase();

    let matches = signature_matches(&text);
    if !matches.is_empty() {
        let count = matches.len();
        return Ok(CheckResult::fail(
            CHECK_SPAM,
            (1.0 - count as f64 * 0.3).max(0.1),
            format!(
                "Detected spam patterns: {count} matches - review content for test data or inappropriate content"
            ),
            Severity::High,
            CATEGORY,
        )
        .with_suggestion(format!(
            "Review content for {count} detected spam patterns and remove test data"
        ))
        .with_metadata("spam_patterns_found", count)
        .with_metadata(
            "examples",
            matches.into_iter().take(3).collect::<Vec<_>>(),
        ));
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() > MIN_WORDS_FOR_RATIO
        && let Some((word, ratio)) = most_repeated(&words)
        && ratio > threshold
    {
        return Ok(CheckResult::fail(
            CHECK_SPAM,
            (1.0 - ratio).max(0.3),
            format!(
                "Excessive word repetition: '{word}' appears {} - diversify content vocabulary",
                percent(ratio)
            ),
            Severity::Medium,
            CATEGORY,
        )
        .with_suggestion(format!(
            "Replace repetitive use of '{word}' with diverse vocabulary"
        ))
        .with_metadata("repetition_ratio", ratio)
        .with_metadata("repeated_word", word)
        .with_metadata("threshold", threshold));
    }

    Ok(CheckResult::pass(CHECK_SPAM, 1.0, Severity::Low, CATEGORY)
        .with_metadata("spam_patterns_found", 0))
}

/// Every signature hit in lowercased `text`, in signature order.
pub(crate) fn signature_matches(text: &str) -> Vec<String> {
    let mut found: Vec<String> = SIGNATURES
        .iter()
        .flat_map(|re| re.find_iter(text).map(|m| m.as_str().to_string()))
        .collect();

    found.extend(repeated_token_runs(text));
    found.extend(repeated_phrases(text));
    if let Some(run) = leading_char_run(text) {
        found.push(run);
    }
    found
}

/// Runs of the same whitespace-separated token appearing 4+ times in a row.
fn repeated_token_runs(text: &str) -> Vec<String> {
    let mut runs = Vec::new();
    let mut tokens = text.split_whitespace().peekable();

    while let Some(token) = tokens.next() {
        let mut length = 1;
        while tokens.peek() == Some(&token) {
            tokens.next();
            length += 1;
        }
        if length >= REPEATED_TOKEN_RUN {
            runs.push(vec![token; length].join(" "));
        }
    }
    runs
}

/// Non-overlapping spans where a phrase of 10+ characters repeats 3+ times back to back.
fn repeated_phrases(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let n = chars.len();
    let mut spans: Vec<(usize, usize, usize)> = Vec::new();

    let longest = MAX_REPEATED_PHRASE.min(n / REPEATED_PHRASE_COPIES);
    for period in MIN_REPEATED_PHRASE..=longest {
        let needed = period * (REPEATED_PHRASE_COPIES - 1);
        let mut run_start = 0;
        let mut run = 0;
        for i in 0..n - period {
            if chars[i] == chars[i + period] {
                if run == 0 {
                    run_start = i;
                }
                run += 1;
                if run == needed {
                    spans.push((run_start, run_start + needed + period, period));
                }
            } else {
                run = 0;
            }
        }
    }

    spans.sort_by_key(|&(start, end, _)| (start, std::cmp::Reverse(end)));
    let mut phrases = Vec::new();
    let mut covered_until = 0;
    for (start, end, period) in spans {
        if start < covered_until {
            continue;
        }
        phrases.push(chars[start..start + period].iter().collect());
        covered_until = end;
    }
    phrases
}

/// The text's first character when it opens with a run of 21+ copies of it.
fn leading_char_run(text: &str) -> Option<String> {
    let mut chars = text.chars();
    let first = chars.next()?;
    let run = 1 + chars.take_while(|&c| c == first).count();
    (run >= LEADING_CHAR_RUN).then(|| first.to_string().repeat(run))
}

/// The most frequent word and its share of all words. Ties go to the first seen.
fn most_repeated<'a>(words: &[&'a str]) -> Option<(&'a str, f64)> {
    let mut counts: HashMap<&'a str, (usize, usize)> = HashMap::new();
    for (position, &word) in words.iter().enumerate() {
        counts.entry(word).or_insert((0, position)).0 += 1;
    }

    counts
        .into_iter()
        .max_by(|a, b| a.1.0.cmp(&b.1.0).then_with(|| b.1.1.cmp(&a.1.1)))
        .map(|(word, (count, _))| (word, count as f64 / words.len() as f64))
}
