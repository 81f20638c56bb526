//! Standalone hours lookup against the business-detail endpoint.

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use scout_provider::{normalize_slot_hours, DaySchedule};

use crate::api::{map_provider_error, require_provider, ApiError, AppState};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct HoursRequest {
    #[serde(default)]
    pub business_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct HoursResponse {
    pub contextual_info: ContextualHours,
}

#[derive(Debug, Serialize)]
pub(super) struct ContextualHours {
    pub business_hours: Vec<DaySchedule>,
}

pub(super) async fn business_hours(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<HoursRequest>,
) -> Result<Json<HoursResponse>, ApiError> {
    let business_id = request.business_id.unwrap_or_default();
    if business_id.trim().is_empty() {
        return Err(ApiError::new(
            &req_id.0,
            "validation_error",
            "businessId is required",
        ));
    }

    let client = require_provider(&state, &req_id.0)?;
    let detail = client
        .business_detail(&business_id)
        .await
        .map_err(|e| map_provider_error(req_id.0.clone(), &e))?;

    let today = chrono::Local::now().date_naive();
    let business_hours = normalize_slot_hours(&detail, today);

    Ok(Json(HoursResponse {
        contextual_info: ContextualHours { business_hours },
    }))
}
