//! The tool layer: search plus the tool-specific scoring pass the browser
//! pages used to run client-side, now applied server-side with an explicit
//! context record.

use axum::{extract::State, Extension, Json};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use scout_provider::ProviderProjection;
use scout_scoring::{
    allergy_safety_score, confidence_score, estimate_price, evaluate_open_status, open_rank,
    predict_wait, solo_safety_score, OpenStatus, PriceBreakdown, ScoreResult, ToolContext,
    WaitEstimate,
};

use crate::api::{ApiError, AppState};
use crate::api::search::{run_search, validate_search_fields};
use crate::middleware::RequestId;

/// Queries that belong in the general-search tool, not the dining ones.
const SERVICE_KEYWORDS: [&str; 8] = [
    "plumber",
    "electrician",
    "mover",
    "handyman",
    "repair",
    "hvac",
    "locksmith",
    "contractor",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(super) enum Tool {
    Quickfind,
    Safeeats,
    Solosafe,
    Waitwise,
    Trueprice,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AnalyzeRequest {
    #[serde(default)]
    pub tool: Option<Tool>,
    #[serde(default)]
    pub user_text: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub chat_id: Option<String>,
    #[serde(default)]
    pub context: ToolContext,
    /// Seeds the true-price variance for reproducible estimates.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
pub(super) struct AnalyzeResponse {
    pub chat_id: Option<String>,
    pub ai_text: String,
    pub results: Vec<AnalyzedProvider>,
}

/// A projection annotated with whichever derivations the tool produces.
#[derive(Debug, Serialize)]
pub(super) struct AnalyzedProvider {
    #[serde(flatten)]
    pub provider: ProviderProjection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<ScoreResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety: Option<ScoreResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait: Option<WaitEstimate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_status: Option<OpenStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceBreakdown>,
}

impl AnalyzedProvider {
    fn plain(provider: ProviderProjection) -> Self {
        Self {
            provider,
            confidence: None,
            safety: None,
            wait: None,
            open_status: None,
            price: None,
        }
    }
}

pub(super) async fn analyze(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Some(tool) = request.tool else {
        return Err(ApiError::new(
            &req_id.0,
            "validation_error",
            "tool is required",
        ));
    };

    let (user_text, latitude, longitude) = validate_search_fields(
        &req_id.0,
        request.user_text.as_deref(),
        request.latitude,
        request.longitude,
    )?;

    let ctx = request.context;

    if tool == Tool::Safeeats && ctx.allergens.is_empty() {
        return Err(ApiError::new(
            &req_id.0,
            "validation_error",
            "context.allergens is required for safeeats",
        ));
    }

    if tool == Tool::Trueprice {
        let lower = user_text.to_lowercase();
        if SERVICE_KEYWORDS.iter().any(|k| lower.contains(k)) {
            return Err(ApiError::new(
                &req_id.0,
                "validation_error",
                "trueprice supports dining searches only; use quickfind for services",
            ));
        }
    }

    let outcome = run_search(
        &state,
        &req_id.0,
        &user_text,
        latitude,
        longitude,
        request.chat_id.as_deref(),
    )
    .await?;

    let now = chrono::Local::now().naive_local();
    let mut rng = request
        .seed
        .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

    let mut results: Vec<AnalyzedProvider> = outcome
        .providers
        .into_iter()
        .map(|provider| {
            let mut result = AnalyzedProvider::plain(provider);
            match tool {
                Tool::Quickfind => {
                    result.confidence = Some(confidence_score(
                        &result.provider,
                        &user_text,
                        &outcome.ai_text,
                        &ctx,
                    ));
                }
                Tool::Safeeats => {
                    result.safety = Some(allergy_safety_score(&result.provider, &ctx.allergens));
                }
                Tool::Solosafe => {
                    result.safety = Some(solo_safety_score(&result.provider));
                }
                Tool::Waitwise => {
                    result.wait = Some(predict_wait(
                        result.provider.review_count,
                        result.provider.rating,
                        now,
                        ctx.party_size,
                    ));
                    result.open_status = Some(evaluate_open_status(
                        result.provider.business_hours.as_deref(),
                        now,
                    ));
                }
                Tool::Trueprice => {
                    result.price = Some(estimate_price(&result.provider, &mut rng));
                }
            }
            result
        })
        .collect();

    match tool {
        Tool::Safeeats | Tool::Solosafe => {
            results.sort_by(|a, b| {
                let a_score = a.safety.as_ref().map_or(0, |s| s.score);
                let b_score = b.safety.as_ref().map_or(0, |s| s.score);
                b_score.cmp(&a_score)
            });
        }
        Tool::Waitwise => {
            results.sort_by_key(|r| {
                (
                    r.open_status
                        .as_ref()
                        .map_or(u8::MAX, |s| open_rank(s.state)),
                    r.wait.as_ref().map_or(u32::MAX, |w| w.min_minutes),
                )
            });
        }
        Tool::Trueprice => {
            if let Some(ceiling) = ctx.budget_ceiling {
                results.retain(|r| r.price.is_some_and(|p| p.total <= ceiling));
            }
        }
        Tool::Quickfind => {} // upstream relevance order is kept
    }

    Ok(Json(AnalyzeResponse {
        chat_id: outcome.chat_id,
        ai_text: outcome.ai_text,
        results,
    }))
}
