//! Tag-only checks: presence, count, generic terms and specificity.

use serde_json::{Map, Value, json};

use super::{CheckContext, mean, percent, preview};
use crate::constants::*;
use crate::rules::error::{RuleError, RuleResult};
use crate::rules::types::{CheckResult, RuleCategory, Severity};
use crate::text::{TAG_STOPWORDS, is_tag_stopword};

const CATEGORY: RuleCategory = RuleCategory::TagValidation;

/// Share of stopword tokens above which a multi-word tag counts as generic.
const MULTI_WORD_STOPWORD_RATIO: f64 = 0.6;

pub fn empty_tags(ctx: &CheckContext<'_>) -> RuleResult<CheckResult> {
    if ctx.tags.is_empty() {
        return Ok(CheckResult::fail(
            CHECK_EMPTY_TAGS,
            0.0,
            "No tags provided - content cannot be properly categorized without tags",
            Severity::Critical,
            CATEGORY,
        )
        .with_suggestion("Add specific, descriptive tags to categorize this content")
        .with_auto_fixable(true)
        .with_metadata("empty_tag_count", 0));
    }

    let blank = ctx.tags.iter().filter(|t| t.trim().is_empty()).count();
    if blank > 0 {
        return Ok(CheckResult::fail(
            CHECK_EMPTY_TAGS,
            0.2,
            format!("Found {blank} empty tags - remove empty tags or add meaningful content"),
            Severity::High,
            CATEGORY,
        )
        .with_suggestion(format!(
            "Remove {blank} empty tags and add meaningful content"
        ))
        .with_auto_fixable(true)
        .with_metadata("empty_tag_count", blank));
    }

    Ok(
        CheckResult::pass(CHECK_EMPTY_TAGS, 1.0, Severity::Low, CATEGORY)
            .with_metadata("tag_count", ctx.tags.len()),
    )
}

pub fn tag_count(ctx: &CheckContext<'_>) -> RuleResult<CheckResult> {
    let min = ctx.thresholds.get(THRESHOLD_MIN_TAG_COUNT)?;
    let max = ctx.thresholds.get(THRESHOLD_MAX_TAG_COUNT)?;
    if min > max {
        return Err(RuleError::InconsistentBounds {
            check: CHECK_TAG_COUNT,
            min_name: THRESHOLD_MIN_TAG_COUNT,
            min,
            max_name: THRESHOLD_MAX_TAG_COUNT,
            max,
        });
    }

    let count = ctx.tags.len();
    let count_f = count as f64;

    if count_f < min {
        return Ok(CheckResult::fail(
            CHECK_TAG_COUNT,
            0.3,
            format!(
                "Too few tags: {count} < {min} - add more specific tags to improve categorization"
            ),
            Severity::Medium,
            CATEGORY,
        )
        .with_suggestion(format!(
            "Add {} more specific tags to improve categorization",
            (min - count_f).ceil()
        ))
        .with_auto_fixable(true)
        .with_metadata("tag_count", count)
        .with_metadata("min_required", min));
    }

    if count_f > max {
        return Ok(CheckResult::fail(
            CHECK_TAG_COUNT,
            0.6,
            format!(
                "Too many tags: {count} > {max} - consolidate tags for better organization"
            ),
            Severity::Medium,
            CATEGORY,
        )
        .with_suggestion(format!(
            "Consolidate {} tags for better organization",
            (count_f - max).ceil()
        ))
        .with_auto_fixable(true)
        .with_metadata("tag_count", count)
        .with_metadata("max_allowed", max));
    }

    Ok(CheckResult::pass(CHECK_TAG_COUNT, 1.0, Severity::Low, CATEGORY)
        .with_metadata("tag_count", count))
}

pub fn stopwords(ctx: &CheckContext<'_>) -> RuleResult<CheckResult> {
    if ctx.tags.is_empty() {
        return Ok(CheckResult::pass(CHECK_STOPWORDS, 1.0, Severity::Low, CATEGORY)
            .with_metadata("stopword_ratio", 0.0)
            .with_metadata("reason", "no tags to evaluate"));
    }

    let threshold = ctx.thresholds.get(THRESHOLD_STOPWORD)?;

    let matches: Vec<String> = ctx
        .tags
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| is_generic_tag(t))
        .collect();

    let ratio = matches.len() as f64 / ctx.tags.len() as f64;

    if ratio > threshold {
        return Ok(CheckResult::fail(
            CHECK_STOPWORDS,
            (1.0 - ratio).max(0.2),
            format!(
                "Too many generic tags: {} are stopwords - replace generic terms with specific, descriptive tags",
                percent(ratio)
            ),
            Severity::Medium,
            CATEGORY,
        )
        .with_suggestion(format!(
            "Replace {} generic tags with specific, descriptive terms",
            matches.len()
        ))
        .with_auto_fixable(true)
        .with_metadata("stopword_ratio", ratio)
        .with_metadata("stopword_matches", matches)
        .with_metadata("threshold", threshold));
    }

    Ok(
        CheckResult::pass(CHECK_STOPWORDS, 1.0 - ratio, Severity::Low, CATEGORY)
            .with_metadata("stopword_ratio", ratio),
    )
}

/// Exact stopword, or a multi-word tag made mostly of stopwords.
fn is_generic_tag(tag: &str) -> bool {
    if is_tag_stopword(tag) {
        return true;
    }
    if !tag.contains(char::is_whitespace) {
        return false;
    }

    let words: Vec<&str> = tag.split_whitespace().collect();
    if words.is_empty() {
        return false;
    }
    let generic = words.iter().filter(|w| TAG_STOPWORDS.contains(*w)).count();
    generic as f64 / words.len() as f64 > MULTI_WORD_STOPWORD_RATIO
}

pub fn tag_specificity(ctx: &CheckContext<'_>) -> RuleResult<CheckResult> {
    if ctx.tags.is_empty() {
        return Ok(
            CheckResult::pass(CHECK_TAG_SPECIFICITY, 1.0, Severity::Low, CATEGORY)
                .with_metadata("specificity_score", 0.0)
                .with_metadata("reason", "no tags to evaluate"),
        );
    }

    let threshold = ctx.thresholds.get(THRESHOLD_TAG_SPECIFICITY)?;

    let mut generic = Vec::new();
    let mut individual = Map::new();
    let scores: Vec<f64> = ctx
        .tags
        .iter()
        .map(|tag| {
            let score = specificity_score(ctx, tag);
            if score == 0.0 {
                generic.push(tag.clone());
            }
            individual.insert(tag.clone(), json!(score));
            score
        })
        .collect();

    let average = mean(&scores);

    if average < threshold {
        return Ok(CheckResult::fail(
            CHECK_TAG_SPECIFICITY,
            average,
            format!("Low tag specificity: {average:.2} - too many generic tags"),
            Severity::Medium,
            CATEGORY,
        )
        .with_suggestion(format!(
            "Replace {} generic tags with more specific terms: {}",
            generic.len(),
            preview(&generic)
        ))
        .with_auto_fixable(true)
        .with_metadata("specificity_score", average)
        .with_metadata("generic_tags", generic)
        .with_metadata("individual_scores", Value::Object(individual)));
    }

    Ok(
        CheckResult::pass(CHECK_TAG_SPECIFICITY, average, Severity::Low, CATEGORY)
            .with_metadata("specificity_score", average)
            .with_metadata("individual_scores", Value::Object(individual)),
    )
}

fn specificity_score(ctx: &CheckContext<'_>, tag: &str) -> f64 {
    let tag = tag.trim().to_lowercase();

    if is_tag_stopword(&tag) {
        0.0
    } else if tag.split_whitespace().count() > 1 {
        0.8
    } else if ctx.lexicon.contains_term(&tag) {
        0.7
    } else {
        match tag.chars().count() {
            n if n > 8 => 0.6,
            n if n > 5 => 0.5,
            _ => 0.3,
        }
    }
}
