//! Shared scoring types: the uniform score/label/rationale result and the
//! explicit per-request context record.

use serde::{Deserialize, Serialize};

/// Maximum rationale strings kept on any score result.
pub const MAX_REASONS: usize = 4;

/// The structurally uniform output of every scoring engine: a score
/// clamped to `[0, 100]`, a threshold-derived label, and a deduplicated,
/// length-capped list of human-readable rationale strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    pub score: u8,
    pub label: &'static str,
    pub reasons: Vec<String>,
}

/// Which tool family a query belongs to; drives category-alignment bonuses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Auto,
    Home,
    Dining,
}

/// Requested dining atmosphere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vibe {
    #[default]
    Any,
    Romantic,
    Quiet,
    Family,
    Trendy,
}

/// How soon the user needs the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    #[default]
    Auto,
    SameDay,
    Soon,
    CanWait,
}

/// Coarse price preference, using the provider's dollar-sign tiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum BudgetTier {
    #[default]
    #[serde(rename = "any")]
    Any,
    #[serde(rename = "$")]
    Budget,
    #[serde(rename = "$$")]
    Moderate,
    #[serde(rename = "$$$")]
    Upscale,
}

/// The explicit configuration record passed into every engine call.
///
/// This replaces what the tools previously read from mutable UI state:
/// which heuristics apply is decided by the caller per request, never by
/// anything ambient inside a scoring function.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolContext {
    pub mode: Mode,
    pub vibe: Vibe,
    pub urgency: Urgency,
    pub budget_tier: BudgetTier,
    pub party_size: u32,
    /// Selected allergen labels, e.g. `"Peanuts"`, `"Wheat/Gluten"`.
    pub allergens: Vec<String>,
    /// Per-meal total ceiling in dollars for the true-price tool.
    pub budget_ceiling: Option<f64>,
}

impl Default for ToolContext {
    fn default() -> Self {
        Self {
            mode: Mode::Auto,
            vibe: Vibe::Any,
            urgency: Urgency::Auto,
            budget_tier: BudgetTier::Any,
            party_size: 2,
            allergens: Vec::new(),
            budget_ceiling: None,
        }
    }
}

/// Clamps an accumulated raw score into the `[0, 100]` band.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn clamp_score(raw: i64) -> u8 {
    raw.clamp(0, 100) as u8
}

/// Deduplicates rationale strings (first occurrence wins) and caps the
/// list at [`MAX_REASONS`].
pub(crate) fn finalize_reasons(reasons: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out: Vec<String> = reasons
        .into_iter()
        .filter(|r| seen.insert(r.clone()))
        .collect();
    out.truncate(MAX_REASONS);
    out
}
