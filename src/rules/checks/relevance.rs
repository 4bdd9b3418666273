//! Checks that compare tags with the content, a domain lexicon or each other.

use std::collections::HashSet;

use serde_json::{Map, Value, json};

use super::{CheckContext, mean, percent, preview};
use crate::constants::*;
use crate::rules::error::RuleResult;
use crate::rules::types::{CheckResult, RuleCategory, Severity};
use crate::text::{normalize, tokenize};

const CATEGORY: RuleCategory = RuleCategory::SemanticAnalysis;

/// Tag tokens longer than this earn partial credit for a substring match.
const PARTIAL_MATCH_MIN_CHARS: usize = 3;

/// Per-tag content similarity below which a tag is listed as weakly related.
const LOW_TAG_SIMILARITY: f64 = 0.3;

/// Lexicon similarity at which a tag counts as belonging to a domain.
const DOMAIN_SIMILARITY_FLOOR: f64 = 0.25;

/// Pair similarity below which a tag pair is reported as incoherent.
const LOW_PAIR_COHERENCE: f64 = 0.2;

fn no_tags(name: &'static str, category: RuleCategory, score_key: &str) -> CheckResult {
    CheckResult::pass(name, 1.0, Severity::Low, category)
        .with_metadata(score_key, 0.0)
        .with_metadata("reason", "no tags to evaluate")
}

pub fn tag_text_relevance(ctx: &CheckContext<'_>) -> RuleResult<CheckResult> {
    if ctx.tags.is_empty() {
        return Ok(no_tags(CHECK_TAG_TEXT_RELEVANCE, CATEGORY, "relevance_score"));
    }

    let threshold = ctx.thresholds.get(THRESHOLD_TAG_TEXT_RELEVANCE)?;

    let content_lower = ctx.content.to_lowercase();
    let content_words: HashSet<String> = tokenize(&content_lower).into_iter().collect();

    let mut relevant = 0.0;
    let mut irrelevant = Vec::new();
    for tag in ctx.tags {
        let tag_words = tokenize(tag);
        if tag_words.iter().any(|w| content_words.contains(w)) {
            relevant += 1.0;
        } else if tag_words
            .iter()
            .any(|w| w.chars().count() > PARTIAL_MATCH_MIN_CHARS && content_lower.contains(w.as_str()))
        {
            relevant += 0.5;
        } else {
            irrelevant.push(tag.clone());
        }
    }

    let score = relevant / ctx.tags.len() as f64;

    if score < threshold {
        return Ok(CheckResult::fail(
            CHECK_TAG_TEXT_RELEVANCE,
            score,
            format!(
                "Low tag-text relevance: {} - tags don't match content well, review tag accuracy",
                percent(score)
            ),
            Severity::Medium,
            CATEGORY,
        )
        .with_suggestion(format!(
            "Review {} tags that don't match content: {}",
            irrelevant.len(),
            preview(&irrelevant)
        ))
        .with_auto_fixable(true)
        .with_metadata("relevance_score", score)
        .with_metadata("relevant_tags", relevant)
        .with_metadata("total_tags", ctx.tags.len())
        .with_metadata("irrelevant_tags", irrelevant));
    }

    Ok(
        CheckResult::pass(CHECK_TAG_TEXT_RELEVANCE, score, Severity::Low, CATEGORY)
            .with_metadata("relevance_score", score),
    )
}

pub fn semantic_relevance(ctx: &CheckContext<'_>) -> RuleResult<CheckResult> {
    if ctx.tags.is_empty() {
        return Ok(no_tags(CHECK_SEMANTIC_RELEVANCE, CATEGORY, "semantic_score"));
    }

    let threshold = ctx.thresholds.get(THRESHOLD_SEMANTIC_RELEVANCE)?;

    if normalize(ctx.content).is_empty() || ctx.tags.iter().all(|t| normalize(t).is_empty()) {
        return Ok(CheckResult::fail(
            CHECK_SEMANTIC_RELEVANCE,
            0.1,
            "Insufficient text or tag content for semantic analysis",
            Severity::Medium,
            CATEGORY,
        )
        .with_suggestion("Add more descriptive content and specific tags")
        .with_metadata("semantic_score", 0.0));
    }

    let similarities = ctx
        .similarity
        .content_tag_similarities(ctx.content, ctx.tags);
    let average = mean(&similarities);
    let best = similarities.iter().copied().fold(0.0, f64::max);
    let score = average * 0.6 + best * 0.4;

    if score < threshold {
        let weak: Vec<String> = ctx
            .tags
            .iter()
            .zip(&similarities)
            .filter(|&(_, &s)| s < LOW_TAG_SIMILARITY)
            .map(|(t, _)| t.clone())
            .collect();

        return Ok(CheckResult::fail(
            CHECK_SEMANTIC_RELEVANCE,
            score,
            format!("Low semantic relevance: {score:.2} - tags don't semantically match content"),
            Severity::High,
            CATEGORY,
        )
        .with_suggestion(format!(
            "Review {} tags with low semantic relevance: {}",
            weak.len(),
            preview(&weak)
        ))
        .with_auto_fixable(true)
        .with_metadata("semantic_score", score)
        .with_metadata("avg_similarity", average)
        .with_metadata("max_similarity", best)
        .with_metadata("low_relevance_tags", weak));
    }

    Ok(
        CheckResult::pass(CHECK_SEMANTIC_RELEVANCE, score, Severity::Low, CATEGORY)
            .with_metadata("semantic_score", score)
            .with_metadata("avg_similarity", average)
            .with_metadata("max_similarity", best),
    )
}

pub fn domain_relevance(ctx: &CheckContext<'_>) -> RuleResult<CheckResult> {
    if ctx.tags.is_empty() {
        return Ok(no_tags(CHECK_DOMAIN_RELEVANCE, CATEGORY, "domain_score"));
    }

    let threshold = ctx.thresholds.get(THRESHOLD_DOMAIN_RELEVANCE)?;

    let domain_scores: Map<String, Value> = ctx
        .lexicon
        .domains()
        .iter()
        .map(|d| (d.name.clone(), json!(d.coverage(ctx.content))))
        .collect();

    let references = ctx.lexicon.reference_documents();
    let mismatched: Vec<String> = ctx
        .tags
        .iter()
        .filter(|tag| {
            if ctx.lexicon.matching_domain(tag).is_some() {
                return false;
            }
            let best = ctx
                .similarity
                .probe_similarities(tag, &references)
                .into_iter()
                .fold(0.0, f64::max);
            best < DOMAIN_SIMILARITY_FLOOR
        })
        .cloned()
        .collect();

    let matched = ctx.tags.len() - mismatched.len();
    let score = matched as f64 / ctx.tags.len() as f64;

    if score < threshold {
        return Ok(CheckResult::fail(
            CHECK_DOMAIN_RELEVANCE,
            score,
            format!("Low domain relevance: {score:.2} - tags don't match content domain"),
            Severity::Medium,
            CATEGORY,
        )
        .with_suggestion(format!(
            "Review {} tags for domain consistency: {}",
            mismatched.len(),
            preview(&mismatched)
        ))
        .with_auto_fixable(true)
        .with_metadata("domain_score", score)
        .with_metadata("domain_scores", Value::Object(domain_scores))
        .with_metadata("domain_mismatched_tags", mismatched));
    }

    Ok(
        CheckResult::pass(CHECK_DOMAIN_RELEVANCE, score, Severity::Low, CATEGORY)
            .with_metadata("domain_score", score)
            .with_metadata("domain_scores", Value::Object(domain_scores)),
    )
}

pub fn context_coherence(ctx: &CheckContext<'_>) -> RuleResult<CheckResult> {
    const CATEGORY: RuleCategory = RuleCategory::ContentQuality;

    let usable: Vec<&String> = ctx
        .tags
        .iter()
        .filter(|t| !normalize(t).is_empty())
        .collect();

    if usable.len() < 2 {
        return Ok(
            CheckResult::pass(CHECK_CONTEXT_COHERENCE, 1.0, Severity::Low, CATEGORY)
                .with_metadata("coherence_score", 1.0)
                .with_metadata("reason", "fewer than two usable tags"),
        );
    }

    let threshold = ctx.thresholds.get(THRESHOLD_CONTEXT_COHERENCE)?;

    let pairs = ctx.similarity.pairwise_tag_similarities(&usable);
    let scores: Vec<f64> = pairs.iter().map(|&(_, _, s)| s).collect();
    let average = mean(&scores);

    if average < threshold {
        let incoherent: Vec<Value> = pairs
            .iter()
            .filter(|&&(_, _, s)| s < LOW_PAIR_COHERENCE)
            .map(|&(i, j, s)| json!([usable[i], usable[j], s]))
            .collect();
        let total_incoherent = incoherent.len();

        return Ok(CheckResult::fail(
            CHECK_CONTEXT_COHERENCE,
            average,
            format!("Low tag coherence: {average:.2} - tags lack contextual consistency"),
            Severity::Medium,
            CATEGORY,
        )
        .with_suggestion(format!(
            "Review {total_incoherent} tag pairs for better coherence"
        ))
        .with_auto_fixable(true)
        .with_metadata("coherence_score", average)
        .with_metadata(
            "incoherent_pairs",
            incoherent.into_iter().take(5).collect::<Vec<_>>(),
        ));
    }

    Ok(
        CheckResult::pass(CHECK_CONTEXT_COHERENCE, average, Severity::Low, CATEGORY)
            .with_metadata("coherence_score", average),
    )
}
