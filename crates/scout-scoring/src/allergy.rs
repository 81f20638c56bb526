//! Allergy-safety scorer.
//!
//! Works from a neutral base of 70 and moves on textual evidence: explicit
//! "X-free" wording helps, bare allergen mentions hurt, and a few category
//! heuristics capture cross-contamination risk that summaries rarely spell
//! out (seafood kitchens and shellfish, pizza ovens and gluten, peanut oil
//! in many Asian kitchens).

use scout_provider::ProviderProjection;

use crate::types::{clamp_score, finalize_reasons, ScoreResult};

/// The allergen labels the tools offer for selection. Free-text labels are
/// also accepted; these are the canonical spellings the category
/// heuristics key on.
pub const COMMON_ALLERGENS: &[&str] = &[
    "Peanuts",
    "Tree Nuts",
    "Dairy",
    "Eggs",
    "Soy",
    "Wheat/Gluten",
    "Shellfish",
    "Fish",
];

fn selected(allergens: &[String], label: &str) -> bool {
    allergens.iter().any(|a| a.eq_ignore_ascii_case(label))
}

/// Scores how safe a restaurant looks for the selected allergens.
/// Labels: `safe` ≥ 80, `caution` ≥ 60, else `risky`.
#[must_use]
pub fn allergy_safety_score(provider: &ProviderProjection, allergens: &[String]) -> ScoreResult {
    let summary = provider
        .short_summary
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();
    let categories = provider.categories.join(" ").to_lowercase();

    let mut score: i64 = 70;
    let mut reasons: Vec<String> = Vec::new();

    for allergen in allergens {
        let lower = allergen.to_lowercase();

        if summary.contains(&format!("{lower}-free")) || summary.contains(&format!("no {lower}")) {
            score += 10;
            reasons.push(format!("{allergen}-free mentioned"));
        }

        if (summary.contains(&lower) || categories.contains(&lower)) && !summary.contains("free") {
            score -= 5;
            reasons.push(format!("{allergen} present in menu"));
        }
    }

    if selected(allergens, "Shellfish") && categories.contains("seafood") {
        score -= 15;
        reasons.push("Seafood restaurant - high cross-contamination risk".to_string());
    }

    if selected(allergens, "Wheat/Gluten") && categories.contains("pizza") {
        score -= 10;
        reasons.push("Pizza place - gluten everywhere".to_string());
    }

    if selected(allergens, "Peanuts")
        && (categories.contains("thai") || categories.contains("asian"))
    {
        score -= 10;
        reasons.push("Asian cuisine often uses peanuts".to_string());
    }

    if categories.contains("vegan")
        && (selected(allergens, "Dairy") || selected(allergens, "Eggs"))
    {
        score += 20;
        reasons.push("Vegan menu available".to_string());
    }

    if categories.contains("gluten-free") && selected(allergens, "Wheat/Gluten") {
        score += 20;
        reasons.push("Gluten-free options".to_string());
    }

    if provider.rating >= 4.5 {
        score += 5;
    }

    let score = clamp_score(score);
    let label = if score >= 80 {
        "safe"
    } else if score >= 60 {
        "caution"
    } else {
        "risky"
    };

    ScoreResult {
        score,
        label,
        reasons: finalize_reasons(reasons),
    }
}
