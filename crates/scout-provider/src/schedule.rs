//! Normalization of provider hours payloads into a canonical weekly schedule.
//!
//! Two upstream shapes feed this module: the business-detail endpoint's slot
//! format (`hours[0].open[]` with day index, `HHMM` clock strings, and an
//! overnight flag) and the conversational endpoint's day/slot string form.
//! Both normalize into [`DaySchedule`] entries whose instants are full
//! date-times, so overnight slots stay comparable against "now".

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::types::RawDayHours;

/// Day labels in schedule order, Monday first, matching the detail
/// endpoint's day indexing (0=Monday .. 6=Sunday).
pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// One canonical day of the weekly schedule.
///
/// An empty `business_hours` list means "no published hours that day",
/// deliberately ambiguous between closed-all-day and unknown; the
/// open/closed evaluator decides how to present it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub day_of_week: String,
    pub business_hours: Vec<TimeSlot>,
    /// Always false from the slot normalizer; the source data has no
    /// special-hours signal. Carried for future use.
    pub special_hours_applied: bool,
}

/// A contiguous open interval. Invariant post-normalization: `open_time <
/// close_time` (overnight closes are advanced one calendar day).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    #[serde(with = "slot_time")]
    pub open_time: NaiveDateTime,
    #[serde(with = "slot_time")]
    pub close_time: NaiveDateTime,
}

/// Serde adapter for the wire format's literal `"YYYY-MM-DD HH:MM:SS"`
/// instants. Not time-zone aware; only same-day clock comparison is
/// required downstream.
pub(crate) mod slot_time {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Maps a `chrono` weekday onto the schedule's day label.
#[must_use]
pub fn day_label(weekday: Weekday) -> &'static str {
    DAY_NAMES[weekday.num_days_from_monday() as usize]
}

fn empty_week() -> Vec<DaySchedule> {
    DAY_NAMES
        .iter()
        .map(|name| DaySchedule {
            day_of_week: (*name).to_string(),
            business_hours: Vec::new(),
            special_hours_applied: false,
        })
        .collect()
}

/// Parses an `"HHMM"` clock string from the detail endpoint.
fn parse_hhmm(raw: &str) -> Option<NaiveTime> {
    if raw.len() < 4 {
        return None;
    }
    let hour: u32 = raw.get(0..2)?.parse().ok()?;
    let minute: u32 = raw.get(2..4)?.parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Normalizes a business-detail hours payload into a 7-day schedule.
///
/// The payload's only trusted substructure is `hours[0].open[]`, a list of
/// slots each carrying a day index, start/end `HHMM` strings, and an
/// overnight flag. Slots missing any of those are silently dropped. A
/// payload without the expected structure yields 7 empty days, never an
/// error. Open/close instants are anchored to `today`; overnight closes
/// are advanced one calendar day so `open < close` holds.
#[must_use]
pub fn normalize_slot_hours(payload: &serde_json::Value, today: NaiveDate) -> Vec<DaySchedule> {
    let Some(slots) = payload
        .get("hours")
        .and_then(serde_json::Value::as_array)
        .and_then(|hours| hours.first())
        .and_then(|first| first.get("open"))
        .and_then(serde_json::Value::as_array)
    else {
        return empty_week();
    };

    let mut week = empty_week();
    for slot in slots {
        let Some(day) = slot.get("day").and_then(serde_json::Value::as_u64) else {
            continue;
        };
        let Some(day_entry) = usize::try_from(day).ok().and_then(|i| week.get_mut(i)) else {
            continue;
        };
        let Some(start) = slot
            .get("start")
            .and_then(serde_json::Value::as_str)
            .and_then(parse_hhmm)
        else {
            continue;
        };
        let Some(end) = slot
            .get("end")
            .and_then(serde_json::Value::as_str)
            .and_then(parse_hhmm)
        else {
            continue;
        };
        let overnight = slot
            .get("is_overnight")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false);

        let close_date = if overnight {
            today.checked_add_days(Days::new(1)).unwrap_or(today)
        } else {
            today
        };

        day_entry.business_hours.push(TimeSlot {
            open_time: today.and_time(start),
            close_time: close_date.and_time(end),
        });
    }

    week
}

/// Converts the conversational endpoint's raw day list into canonical
/// [`DaySchedule`]s.
///
/// Day entries without a label are dropped, as are slots whose instants
/// fail to parse. Source order is preserved and no 7-day padding is
/// applied; the conversational payload is taken as given.
#[must_use]
pub fn sanitize_raw_days(raw: &[RawDayHours]) -> Vec<DaySchedule> {
    raw.iter()
        .filter_map(|day| {
            let label = day.day_of_week.as_deref()?.trim();
            if label.is_empty() {
                return None;
            }
            let business_hours = day
                .business_hours
                .iter()
                .filter_map(|slot| {
                    let open = NaiveDateTime::parse_from_str(
                        slot.open_time.as_deref()?,
                        slot_time::FORMAT,
                    )
                    .ok()?;
                    let close = NaiveDateTime::parse_from_str(
                        slot.close_time.as_deref()?,
                        slot_time::FORMAT,
                    )
                    .ok()?;
                    Some(TimeSlot {
                        open_time: open,
                        close_time: close,
                    })
                })
                .collect();
            Some(DaySchedule {
                day_of_week: label.to_string(),
                business_hours,
                special_hours_applied: day.special_hours_applied,
            })
        })
        .collect()
}
