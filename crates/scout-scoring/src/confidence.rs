//! Confidence scorer for the general-search tool.
//!
//! Builds from zero: rating and review volume carry most of the weight,
//! with bounded bonuses for reservation support, vibe/urgency keyword
//! matches against the query and assistant text, and category alignment
//! with the active mode.

use scout_provider::ProviderProjection;

use crate::types::{clamp_score, finalize_reasons, BudgetTier, Mode, ScoreResult, ToolContext, Urgency, Vibe};

const DINING_CATEGORIES: &[&str] = &[
    "restaurant", "bar", "cafe", "bistro", "steak", "pizza", "sushi", "diner", "bakery", "dessert",
];

const HOME_SERVICE_CATEGORIES: &[&str] = &[
    "plumbing", "electric", "hvac", "appliance", "handyman", "roof", "clean", "locksmith", "pest",
    "moving",
];

const ROMANTIC_KEYWORDS: &[&str] = &[
    "romantic", "date", "candle", "intimate", "cozy", "wine", "fine",
];

const QUIET_KEYWORDS: &[&str] = &["quiet", "calm", "low noise", "intimate", "cozy"];

const URGENCY_KEYWORDS: &[&str] = &["same-day", "24/7", "emergency"];

/// True when the projection's categories look like a dining establishment.
#[must_use]
pub fn is_dining(provider: &ProviderProjection) -> bool {
    let cats = provider.categories.join(" ").to_lowercase();
    DINING_CATEGORIES.iter().any(|k| cats.contains(k))
}

/// True when the projection's categories look like a home-service trade.
#[must_use]
pub fn is_home_service(provider: &ProviderProjection) -> bool {
    let cats = provider.categories.join(" ").to_lowercase();
    HOME_SERVICE_CATEGORIES.iter().any(|k| cats.contains(k))
}

/// Scores how confident the tool is that this provider matches the user's
/// request. Labels: `HIGH` ≥ 80, `MEDIUM` ≥ 60, else `LOW`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn confidence_score(
    provider: &ProviderProjection,
    user_text: &str,
    ai_text: &str,
    ctx: &ToolContext,
) -> ScoreResult {
    let mut score: i64 = 0;
    let mut reasons: Vec<String> = Vec::new();

    score += (provider.rating * 12.0).round() as i64;
    if provider.rating >= 4.7 {
        reasons.push("High average rating".to_string());
    }

    score += (f64::from(provider.review_count) / 20.0).round().min(30.0) as i64;
    if provider.review_count >= 200 {
        reasons.push("Strong review volume".to_string());
    }

    if provider.accepts_reservations {
        score += 10;
        reasons.push("Supports online reservations".to_string());
    }

    let text = format!("{user_text} {ai_text}").to_lowercase();
    let summary = provider
        .short_summary
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();

    if ctx.vibe == Vibe::Romantic && is_dining(provider) {
        let hit = ROMANTIC_KEYWORDS
            .iter()
            .any(|w| text.contains(w) || summary.contains(w));
        if hit {
            score += 12;
            reasons.push("Matches romantic/date-night intent".to_string());
        }
    }

    if ctx.vibe == Vibe::Quiet {
        let hit = QUIET_KEYWORDS
            .iter()
            .any(|w| text.contains(w) || summary.contains(w));
        if hit {
            score += 8;
            reasons.push("Likely a quieter option".to_string());
        }
    }

    if ctx.urgency == Urgency::SameDay && is_home_service(provider) {
        let hit = URGENCY_KEYWORDS.iter().any(|w| summary.contains(w));
        if hit {
            score += 10;
            reasons.push("Mentions same-day / emergency availability".to_string());
        }
    }

    if ctx.mode == Mode::Dining && is_dining(provider) {
        score += 8;
        reasons.push("Category aligns with dining".to_string());
    }
    if ctx.mode == Mode::Home && is_home_service(provider) {
        score += 8;
        reasons.push("Category aligns with home service".to_string());
    }

    if ctx.budget_tier != BudgetTier::Any {
        reasons.push("Budget preference noted (verify pricing)".to_string());
    }

    let score = clamp_score(score);
    let label = if score >= 80 {
        "HIGH"
    } else if score >= 60 {
        "MEDIUM"
    } else {
        "LOW"
    };

    ScoreResult {
        score,
        label,
        reasons: finalize_reasons(reasons),
    }
}
