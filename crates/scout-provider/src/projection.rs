//! The stable, tool-agnostic business shape derived from raw records.

use serde::{Deserialize, Serialize};

use crate::schedule::{sanitize_raw_days, DaySchedule};
use crate::types::BusinessRecord;

/// The only business shape downstream tools are allowed to depend on.
///
/// Every optional upstream field is given an explicit default so consumers
/// never branch on presence; the two genuinely optional data points
/// (`photo`, `short_summary`) stay nullable because "no photo" and "empty
/// photo URL" are different facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderProjection {
    pub id: String,
    pub name: String,
    pub url: String,
    pub rating: f64,
    pub review_count: u32,
    pub phone: String,
    pub address: String,
    pub categories: Vec<String>,
    pub photo: Option<String>,
    pub short_summary: Option<String>,
    pub accepts_reservations: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_hours: Option<Vec<DaySchedule>>,
}

/// Maps a raw record into its projection. Total over any record: missing
/// fields default, categories are empty-filtered, negative review counts
/// clamp to zero, and hours survive only when at least one day parses.
#[must_use]
pub fn project(record: &BusinessRecord) -> ProviderProjection {
    let categories = record
        .categories
        .iter()
        .filter_map(|c| c.title.as_deref())
        .map(str::to_string)
        .filter(|title| !title.is_empty())
        .collect();

    let info = record.contextual_info.as_ref();

    let business_hours = info
        .and_then(|i| i.business_hours.as_deref())
        .map(sanitize_raw_days)
        .filter(|days| !days.is_empty());

    ProviderProjection {
        id: record.id.clone(),
        name: record.name.clone(),
        url: record.url.clone().unwrap_or_default(),
        rating: record.rating.unwrap_or(0.0),
        review_count: u32::try_from(record.review_count.unwrap_or(0).max(0)).unwrap_or(u32::MAX),
        phone: record.phone.clone().unwrap_or_default(),
        address: record
            .location
            .as_ref()
            .and_then(|loc| loc.formatted_address.clone())
            .unwrap_or_default(),
        categories,
        photo: info
            .and_then(|i| i.photos.first())
            .and_then(|p| p.original_url.clone()),
        short_summary: record.summaries.as_ref().and_then(|s| s.short.clone()),
        accepts_reservations: info.is_some_and(|i| i.accepts_reservations),
        price: record.price.clone(),
        business_hours,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_record_projects_to_explicit_defaults() {
        let record: BusinessRecord = serde_json::from_value(json!({"id": "b1"})).unwrap();
        let p = project(&record);
        assert_eq!(p.id, "b1");
        assert_eq!(p.name, "");
        assert_eq!(p.url, "");
        assert!((p.rating - 0.0).abs() < f64::EPSILON);
        assert_eq!(p.review_count, 0);
        assert_eq!(p.phone, "");
        assert_eq!(p.address, "");
        assert!(p.categories.is_empty());
        assert!(p.photo.is_none());
        assert!(p.short_summary.is_none());
        assert!(!p.accepts_reservations);
        assert!(p.price.is_none());
        assert!(p.business_hours.is_none());
    }

    #[test]
    fn categories_drop_empty_labels() {
        let record: BusinessRecord = serde_json::from_value(json!({
            "id": "b2",
            "categories": [
                {"title": "Italian"},
                {"title": ""},
                {},
                {"title": "Wine Bar"}
            ]
        }))
        .unwrap();
        let p = project(&record);
        assert_eq!(p.categories, vec!["Italian", "Wine Bar"]);
    }

    #[test]
    fn negative_review_count_clamps_to_zero() {
        let record: BusinessRecord =
            serde_json::from_value(json!({"id": "b3", "review_count": -12})).unwrap();
        assert_eq!(project(&record).review_count, 0);
    }

    #[test]
    fn first_photo_and_reservation_flag_come_from_contextual_info() {
        let record: BusinessRecord = serde_json::from_value(json!({
            "id": "b4",
            "contextual_info": {
                "photos": [
                    {"original_url": "https://img.example/1.jpg"},
                    {"original_url": "https://img.example/2.jpg"}
                ],
                "accepts_reservations": true
            }
        }))
        .unwrap();
        let p = project(&record);
        assert_eq!(p.photo.as_deref(), Some("https://img.example/1.jpg"));
        assert!(p.accepts_reservations);
    }

    #[test]
    fn hours_survive_only_when_a_day_parses() {
        let with_hours: BusinessRecord = serde_json::from_value(json!({
            "id": "b5",
            "contextual_info": {"business_hours": [{
                "day_of_week": "Tuesday",
                "business_hours": [
                    {"open_time": "2025-06-03 11:00:00", "close_time": "2025-06-03 22:00:00"}
                ]
            }]}
        }))
        .unwrap();
        let days = project(&with_hours).business_hours.expect("hours kept");
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].day_of_week, "Tuesday");

        let unlabeled: BusinessRecord = serde_json::from_value(json!({
            "id": "b6",
            "contextual_info": {"business_hours": [{"business_hours": []}]}
        }))
        .unwrap();
        assert!(
            project(&unlabeled).business_hours.is_none(),
            "all-dropped day list collapses to None"
        );
    }

    #[test]
    fn projection_round_trips_through_json() {
        let record: BusinessRecord = serde_json::from_value(json!({
            "id": "b7",
            "name": "Cafe Mona",
            "rating": 4.4,
            "review_count": 210,
            "price": "$$"
        }))
        .unwrap();
        let p = project(&record);
        let json = serde_json::to_string(&p).unwrap();
        let back: ProviderProjection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
