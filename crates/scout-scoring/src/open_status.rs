//! Open/closed evaluation against the canonical weekly schedule.
//!
//! Only the first slot of a day is consulted; split-hours businesses
//! (closed mid-afternoon, reopening for dinner) are evaluated on their
//! first interval only.

use chrono::{Datelike, NaiveDateTime};
use scout_provider::schedule::{day_label, DaySchedule};
use serde::Serialize;

/// Whether a business is currently open. `Unknown` means no hours data;
/// absence never crashes and is never silently presented as closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenState {
    Open,
    Closed,
    Unknown,
}

/// The evaluated state plus a display-ready status line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenStatus {
    pub state: OpenState,
    pub message: String,
}

/// Sort rank for result ordering: open before closed before unknown.
#[must_use]
pub fn open_rank(state: OpenState) -> u8 {
    match state {
        OpenState::Open => 0,
        OpenState::Closed => 1,
        OpenState::Unknown => 2,
    }
}

/// Evaluates a business's status at `now`.
///
/// No hours → unknown. No slots today → "Closed today". Otherwise the
/// first slot decides: inside `[open, close)` → open until close; before
/// open → opens at; after close → look ahead to tomorrow's first slot.
#[must_use]
pub fn evaluate_open_status(hours: Option<&[DaySchedule]>, now: NaiveDateTime) -> OpenStatus {
    let Some(days) = hours.filter(|d| !d.is_empty()) else {
        return OpenStatus {
            state: OpenState::Unknown,
            message: "Hours unknown".to_string(),
        };
    };

    let today_label = day_label(now.weekday());
    let today = days.iter().find(|d| d.day_of_week == today_label);

    let Some(slot) = today.and_then(|d| d.business_hours.first()) else {
        return OpenStatus {
            state: OpenState::Closed,
            message: "Closed today".to_string(),
        };
    };

    if now >= slot.open_time && now < slot.close_time {
        return OpenStatus {
            state: OpenState::Open,
            message: format!("Open until {}", format_clock(slot.close_time)),
        };
    }

    if now < slot.open_time {
        return OpenStatus {
            state: OpenState::Closed,
            message: format!("Opens at {}", format_clock(slot.open_time)),
        };
    }

    // Past today's close: point at tomorrow's first slot when there is one.
    let tomorrow_label = day_label(now.weekday().succ());
    let next_open = days
        .iter()
        .find(|d| d.day_of_week == tomorrow_label)
        .and_then(|d| d.business_hours.first());

    match next_open {
        Some(next) => OpenStatus {
            state: OpenState::Closed,
            message: format!("Closed • Opens {}", format_clock(next.open_time)),
        },
        None => OpenStatus {
            state: OpenState::Closed,
            message: "Closed".to_string(),
        },
    }
}

/// 12-hour clock without a leading zero, e.g. `"9:00 PM"`.
fn format_clock(at: NaiveDateTime) -> String {
    at.format("%-I:%M %p").to_string()
}
