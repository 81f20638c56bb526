//! The search contract: one conversational query, optional hours
//! enrichment, projection, and the result cap.

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use scout_provider::{enrich_missing_hours, extract_businesses, project, ProviderProjection};

use crate::api::{map_provider_error, require_provider, ApiError, AppState};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SearchRequest {
    #[serde(default)]
    pub user_text: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub chat_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct SearchResponse {
    pub chat_id: Option<String>,
    pub ai_text: String,
    pub providers: Vec<ProviderProjection>,
}

/// Everything the search pipeline produces, shared with the analyze layer.
pub(super) struct SearchOutcome {
    pub chat_id: Option<String>,
    pub ai_text: String,
    pub providers: Vec<ProviderProjection>,
}

/// Validates the common search fields, returning the trimmed query text
/// and coordinates.
pub(super) fn validate_search_fields(
    request_id: &str,
    user_text: Option<&str>,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<(String, f64, f64), ApiError> {
    let user_text = user_text.unwrap_or_default().trim().to_string();
    if user_text.is_empty() {
        return Err(ApiError::new(
            request_id,
            "validation_error",
            "userText is required",
        ));
    }
    match (latitude, longitude) {
        (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => Ok((user_text, lat, lon)),
        _ => Err(ApiError::new(
            request_id,
            "validation_error",
            "latitude and longitude are required",
        )),
    }
}

/// Runs the full pipeline: first conversational call (with the fixed
/// hours-requesting preamble), extraction, at most one enrichment call on
/// the same session, projection, and the configured result cap.
pub(super) async fn run_search(
    state: &AppState,
    request_id: &str,
    user_text: &str,
    latitude: f64,
    longitude: f64,
    incoming_chat_id: Option<&str>,
) -> Result<SearchOutcome, ApiError> {
    let client = require_provider(state, request_id)?;
    let cap = state.config.result_cap;
    let coords = Some((latitude, longitude));

    let query = format!(
        "{user_text}\n\n\
         Return exactly {cap} restaurants near my location.\n\
         For EACH restaurant, include weekly hours in contextual_info.business_hours \
         (7 days, each day has business_hours slots with open_time and close_time).\n"
    );

    tracing::debug!(latitude, longitude, "dispatching provider search");
    let reply = client
        .chat(&query, incoming_chat_id, coords)
        .await
        .map_err(|e| map_provider_error(request_id.to_string(), &e))?;

    let businesses = extract_businesses(&reply.body);
    tracing::debug!(count = businesses.len(), "extracted businesses");

    // Prefer the session id minted by this response; fall back to the one
    // the caller sent.
    let chat_id = reply
        .chat_id
        .clone()
        .or_else(|| incoming_chat_id.map(str::to_string));

    let businesses = enrich_missing_hours(&client, businesses, chat_id.as_deref(), coords).await;

    let providers = businesses.iter().map(project).take(cap).collect();

    Ok(SearchOutcome {
        chat_id,
        ai_text: reply.ai_text,
        providers,
    })
}

pub(super) async fn search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let (user_text, latitude, longitude) = validate_search_fields(
        &req_id.0,
        request.user_text.as_deref(),
        request.latitude,
        request.longitude,
    )?;

    let outcome = run_search(
        &state,
        &req_id.0,
        &user_text,
        latitude,
        longitude,
        request.chat_id.as_deref(),
    )
    .await?;

    Ok(Json(SearchResponse {
        chat_id: outcome.chat_id,
        ai_text: outcome.ai_text,
        providers: outcome.providers,
    }))
}
