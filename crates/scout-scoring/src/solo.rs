//! Solo-dining safety scorer.
//!
//! Same neutral-base shape as the allergy scorer, keyed on the signals
//! that matter when eating alone: seating you can take without a party,
//! enough foot traffic that staff stay attentive, and an atmosphere that
//! is neither a nightlife crowd nor a dim room.

use scout_provider::ProviderProjection;

use crate::types::{clamp_score, finalize_reasons, ScoreResult};

const SEATING_KEYWORDS: &[&str] = &["bar seating", "counter", "communal"];

const FRIENDLY_KEYWORDS: &[&str] = &["friendly", "welcoming", "casual", "cozy", "neighborhood"];

const NIGHTLIFE_KEYWORDS: &[&str] = &["nightlife", "club", "lounge"];

const DIM_KEYWORDS: &[&str] = &["dim", "dark", "candlelit", "moody"];

/// Review volume above which a spot counts as well-trafficked.
const BUSY_REVIEW_THRESHOLD: u32 = 300;

/// Review volume below which there is too little signal to trust a place.
const SPARSE_REVIEW_THRESHOLD: u32 = 25;

/// Scores how comfortable a restaurant looks for a solo diner.
/// Labels: `high` ≥ 80, `medium` ≥ 60, else `low`.
#[must_use]
pub fn solo_safety_score(provider: &ProviderProjection) -> ScoreResult {
    let summary = provider
        .short_summary
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();
    let categories = provider.categories.join(" ").to_lowercase();

    let mut score: i64 = 70;
    let mut reasons: Vec<String> = Vec::new();

    if SEATING_KEYWORDS
        .iter()
        .any(|w| summary.contains(w) || categories.contains(w))
    {
        score += 10;
        reasons.push("Bar or counter seating".to_string());
    }

    if provider.review_count >= BUSY_REVIEW_THRESHOLD {
        score += 8;
        reasons.push("Well-trafficked by other diners".to_string());
    }

    if FRIENDLY_KEYWORDS.iter().any(|w| summary.contains(w)) {
        score += 8;
        reasons.push("Friendly, casual atmosphere".to_string());
    }

    if NIGHTLIFE_KEYWORDS.iter().any(|w| categories.contains(w)) {
        score -= 12;
        reasons.push("Nightlife-heavy crowd".to_string());
    }

    if DIM_KEYWORDS.iter().any(|w| summary.contains(w)) {
        score -= 8;
        reasons.push("Dim lighting mentioned".to_string());
    }

    if provider.review_count < SPARSE_REVIEW_THRESHOLD {
        score -= 10;
        reasons.push("Few reviews to judge by".to_string());
    }

    let score = clamp_score(score);
    let label = if score >= 80 {
        "high"
    } else if score >= 60 {
        "medium"
    } else {
        "low"
    };

    ScoreResult {
        score,
        label,
        reasons: finalize_reasons(reasons),
    }
}
