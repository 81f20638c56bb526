//! Raw provider response types.
//!
//! The conversational endpoint has no contractually stable schema, so these
//! types are deliberately lenient: every field except `id` is defaulted, and
//! callers parse each business element individually, skipping ones that fail.

use serde::Deserialize;

/// A single business as returned by the conversational search endpoint.
///
/// `id` is the only required field; records without one cannot be
/// deduplicated or enriched and are discarded during extraction.
#[derive(Debug, Clone, Deserialize)]
pub struct BusinessRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<i64>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub categories: Vec<CategoryLabel>,
    #[serde(default)]
    pub location: Option<BusinessLocation>,
    #[serde(default)]
    pub contextual_info: Option<ContextualInfo>,
    #[serde(default)]
    pub summaries: Option<Summaries>,
    /// Price tier indicator (`"$"` through `"$$$$"`), rarely populated.
    #[serde(default)]
    pub price: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryLabel {
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BusinessLocation {
    #[serde(default)]
    pub formatted_address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContextualInfo {
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub accepts_reservations: bool,
    /// Weekly hours in the conversational endpoint's day/slot string form.
    /// Normalized into canonical [`crate::schedule::DaySchedule`]s at
    /// projection time.
    #[serde(default)]
    pub business_hours: Option<Vec<RawDayHours>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Photo {
    #[serde(default)]
    pub original_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Summaries {
    #[serde(default)]
    pub short: Option<String>,
}

/// One day of hours as sent by the conversational endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDayHours {
    #[serde(default)]
    pub day_of_week: Option<String>,
    #[serde(default)]
    pub business_hours: Vec<RawTimeSlot>,
    #[serde(default)]
    pub special_hours_applied: bool,
}

/// One open/close interval with `"YYYY-MM-DD HH:MM:SS"` string instants.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTimeSlot {
    #[serde(default)]
    pub open_time: Option<String>,
    #[serde(default)]
    pub close_time: Option<String>,
}
