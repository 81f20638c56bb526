//! Upstream provider integration: HTTP client, business extraction,
//! hours normalization, enrichment, and the stable projection consumed
//! by every scoring tool.

pub mod client;
pub mod enrich;
pub mod error;
pub mod extract;
pub mod projection;
pub mod schedule;
pub mod types;

pub use client::{ChatReply, ProviderClient};
pub use enrich::enrich_missing_hours;
pub use error::ProviderError;
pub use extract::{extract_businesses, has_hours, match_key};
pub use projection::{project, ProviderProjection};
pub use schedule::{day_label, normalize_slot_hours, sanitize_raw_days, DaySchedule, TimeSlot};
pub use types::BusinessRecord;
