//! Content-only checks: length/wording and duplicate submissions.

use chrono::TimeDelta;

use super::CheckContext;
use crate::constants::*;
use crate::hashing::content_fingerprint;
use crate::rules::error::{RuleError, RuleResult};
use crate::rules::types::{CheckResult, RuleCategory, Severity};
use crate::text::tokenize;

pub fn text_quality(ctx: &CheckContext<'_>) -> RuleResult<CheckResult> {
    const CATEGORY: RuleCategory = RuleCategory::ContentQuality;

    let min_length = ctx.thresholds.get(THRESHOLD_MIN_TEXT_LENGTH)?;
    let max_length = ctx.thresholds.get(THRESHOLD_MAX_TEXT_LENGTH)?;
    let min_words = ctx.thresholds.get(THRESHOLD_MIN_MEANINGFUL_WORDS)?;
    if min_length > max_length {
        return Err(RuleError::InconsistentBounds {
            check: CHECK_TEXT_QUALITY,
            min_name: THRESHOLD_MIN_TEXT_LENGTH,
            min: min_length,
            max_name: THRESHOLD_MAX_TEXT_LENGTH,
            max: max_length,
        });
    }

    let text = ctx.content.trim();
    let length = text.chars().count();
    let length_f = length as f64;

    if length_f < min_length {
        return Ok(CheckResult::fail(
            CHECK_TEXT_QUALITY,
            0.1,
            format!(
                "Text too short: {length} characters - add more detailed content for better quality"
            ),
            Severity::High,
            CATEGORY,
        )
        .with_suggestion(format!(
            "Add at least {} more characters of detailed content",
            (min_length - length_f).ceil()
        ))
        .with_metadata("text_length", length)
        .with_metadata("min_required", min_length));
    }

    if length_f > max_length {
        return Ok(CheckResult::fail(
            CHECK_TEXT_QUALITY,
            0.7,
            format!(
                "Text too long: {length} characters - consider breaking into smaller, focused sections"
            ),
            Severity::Medium,
            CATEGORY,
        )
        .with_suggestion("Break content into smaller, focused sections for better readability")
        .with_metadata("text_length", length)
        .with_metadata("max_allowed", max_length));
    }

    let words = tokenize(text);
    let meaningful = words.iter().filter(|w| is_meaningful(w)).count();

    if (meaningful as f64) < min_words {
        return Ok(CheckResult::fail(
            CHECK_TEXT_QUALITY,
            0.4,
            format!(
                "Too few meaningful words: {meaningful} - add more substantive content with specific details"
            ),
            Severity::Medium,
            CATEGORY,
        )
        .with_suggestion(format!(
            "Add at least {} more meaningful words with specific details",
            (min_words - meaningful as f64).ceil()
        ))
        .with_metadata("meaningful_word_count", meaningful)
        .with_metadata("total_words", words.len()));
    }

    Ok(CheckResult::pass(CHECK_TEXT_QUALITY, 1.0, Severity::Low, CATEGORY)
        .with_metadata("text_length", length)
        .with_metadata("word_count", words.len())
        .with_metadata("meaningful_word_count", meaningful))
}

/// Longer than two characters and not purely numeric.
fn is_meaningful(word: &str) -> bool {
    word.chars().count() > 2 && !word.chars().all(char::is_numeric)
}

pub fn duplicate_content(ctx: &CheckContext<'_>) -> RuleResult<CheckResult> {
    const CATEGORY: RuleCategory = RuleCategory::DuplicateDetection;

    let max_occurrences = ctx.thresholds.get(THRESHOLD_MAX_DUPLICATES)?;
    let window_hours = ctx.thresholds.get(THRESHOLD_DUPLICATE_WINDOW_HOURS)?;
    let window = window_from_hours(window_hours)?;

    let fingerprint = content_fingerprint(ctx.content);
    let observation = ctx.duplicates.observe(
        fingerprint,
        ctx.now,
        window,
        max_occurrences.ceil().max(1.0) as usize,
    );
    let hash = format!("{fingerprint:016x}");

    if !observation.recorded {
        let count = observation.prior;
        return Ok(CheckResult::fail(
            CHECK_DUPLICATE,
            0.1,
            format!(
                "Content appears {count} times in last {window_hours}h - duplicate content detected, review for redundancy"
            ),
            Severity::High,
            CATEGORY,
        )
        .with_suggestion(format!(
            "Review and remove {count} duplicate content instances"
        ))
        .with_metadata("duplicate_count", count)
        .with_metadata("content_hash", hash)
        .with_metadata("window_hours", window_hours));
    }

    Ok(CheckResult::pass(CHECK_DUPLICATE, 1.0, Severity::Low, CATEGORY)
        .with_metadata("content_hash", hash)
        .with_metadata("prior_occurrences", observation.prior))
}

fn window_from_hours(hours: f64) -> RuleResult<TimeDelta> {
    if !hours.is_finite() || hours <= 0.0 {
        return Err(RuleError::InvalidWindow { hours });
    }
    TimeDelta::try_milliseconds((hours * 3_600_000.0).round() as i64)
        .ok_or(RuleError::InvalidWindow { hours })
}
