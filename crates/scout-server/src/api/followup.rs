//! Follow-up message generation for a chosen provider.
//!
//! The one endpoint where an upstream failure is NOT surfaced as an error:
//! the caller always receives a usable message, falling back to a
//! deterministic template with the upstream diagnostic attached as a side
//! channel.

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::{require_provider, ApiError, AppState};
use crate::middleware::RequestId;

const FALLBACK_QUESTIONS: [&str; 3] = [
    "How many guests?",
    "Any dietary preferences (veg/vegan/allergies)?",
    "Is a different time (±2 hours) acceptable?",
];

const FALLBACK_NEXT_STEPS: [&str; 3] = [
    "Try a nearby time window (±2 hours).",
    "Call the restaurant if it's for tonight or a large party.",
    "If you want, I can suggest 3 similar alternatives nearby.",
];

const SUCCESS_NEXT_STEPS: [&str; 3] = [
    "If the time is unavailable, try ±2 hours.",
    "If it's a party of 6+, call directly for best results.",
    "Confirm dietary needs and seating preference (quiet/booth/outdoor).",
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct FollowupRequest {
    #[serde(default)]
    pub chat_id: Option<String>,
    #[serde(default)]
    pub provider_name: Option<String>,
    #[serde(default)]
    pub provider_url: Option<String>,
    #[serde(default)]
    pub preferred_time: Option<String>,
    #[serde(default)]
    pub user_notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct FollowupResponse {
    pub chat_id: String,
    pub provider_name: String,
    pub provider_url: String,
    pub quote_message: String,
    pub questions: Vec<String>,
    pub next_steps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_error: Option<UpstreamErrorDetail>,
}

#[derive(Debug, Serialize)]
pub(super) struct UpstreamErrorDetail {
    pub detail: String,
}

fn build_message_template(
    provider_name: &str,
    provider_url: &str,
    preferred_time: Option<&str>,
    user_notes: Option<&str>,
) -> String {
    let time = preferred_time
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or("flexible");
    let notes = user_notes
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or("No extra details");
    format!(
        "Hi {provider_name} team,\n\n\
         I'd like to reserve a table / confirm availability.\n\
         Preferred time: {time}\n\
         Notes: {notes}\n\n\
         Listing link: {provider_url}\n\n\
         Thanks!"
    )
}

pub(super) async fn followup(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<FollowupRequest>,
) -> Result<Json<FollowupResponse>, ApiError> {
    let chat_id = request
        .chat_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::new(&req_id.0, "validation_error", "chatId is required"))?
        .to_string();

    let (provider_name, provider_url) = match (
        request
            .provider_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty()),
        request
            .provider_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty()),
    ) {
        (Some(name), Some(url)) => (name.to_string(), url.to_string()),
        _ => {
            return Err(ApiError::new(
                &req_id.0,
                "validation_error",
                "providerName and providerUrl are required",
            ));
        }
    };

    let client = require_provider(&state, &req_id.0)?;

    let preferred_time = request.preferred_time.as_deref();
    let user_notes = request.user_notes.as_deref();
    let template =
        build_message_template(&provider_name, &provider_url, preferred_time, user_notes);

    // Kept short: the upstream service validates query length.
    let time = preferred_time
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or("flexible");
    let notes = user_notes
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or("none");
    let query = format!(
        "Help the user take the next action for this business.\n\
         Business: {provider_name}\n\
         Link: {provider_url}\n\
         Preferred time: {time}\n\
         Notes: {notes}\n\n\
         Return:\n\
         1) a short message the user can copy/paste\n\
         2) up to 3 quick questions if needed\n\
         3) 3 next steps"
    );

    match client.chat(&query, Some(&chat_id), None).await {
        Ok(reply) => {
            let ai_text = reply.ai_text.clone();
            let quote_message = if ai_text.is_empty() {
                template
            } else {
                ai_text.clone()
            };
            Ok(Json(FollowupResponse {
                chat_id: reply.chat_id.unwrap_or(chat_id),
                provider_name,
                provider_url,
                quote_message,
                questions: Vec::new(),
                next_steps: SUCCESS_NEXT_STEPS.iter().map(|s| (*s).to_string()).collect(),
                ai_text: Some(ai_text),
                upstream_error: None,
            }))
        }
        Err(e) => {
            tracing::warn!(error = %e, "follow-up generation failed; using template fallback");
            Ok(Json(FollowupResponse {
                chat_id,
                provider_name,
                provider_url,
                quote_message: template,
                questions: FALLBACK_QUESTIONS.iter().map(|s| (*s).to_string()).collect(),
                next_steps: FALLBACK_NEXT_STEPS.iter().map(|s| (*s).to_string()).collect(),
                ai_text: None,
                upstream_error: Some(UpstreamErrorDetail {
                    detail: e.to_string(),
                }),
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_interpolates_all_fields() {
        let message = build_message_template(
            "Cafe Mona",
            "https://listing.example/cafe-mona",
            Some("7pm Friday"),
            Some("window seat"),
        );
        assert!(message.contains("Hi Cafe Mona team"));
        assert!(message.contains("Preferred time: 7pm Friday"));
        assert!(message.contains("Notes: window seat"));
        assert!(message.contains("https://listing.example/cafe-mona"));
    }

    #[test]
    fn template_defaults_blank_time_and_notes() {
        let message = build_message_template("Cafe Mona", "https://x", Some("   "), None);
        assert!(message.contains("Preferred time: flexible"));
        assert!(message.contains("Notes: No extra details"));
    }
}
