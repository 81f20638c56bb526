//! Wait-time predictor.
//!
//! Uses `review_count × rating` as a popularity proxy, shaped by
//! time-of-day, weekend, and party-size multipliers, then mapped onto
//! fixed minute bands. Fully deterministic: identical inputs always
//! produce identical estimates.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::Serialize;

/// A predicted wait window plus a coarse busy flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WaitEstimate {
    pub min_minutes: u32,
    pub max_minutes: u32,
    pub busy: bool,
}

/// Predicts the wait window for a party arriving at `at`.
///
/// Peak meal hours (12–14 and 18–20) multiply the popularity proxy by
/// 1.8, the shoulders (11 and 17) by 1.3, and late/early hours (≥ 21 or
/// ≤ 10) by 0.5. Weekends add ×1.3, parties of 6+ ×1.5 (4–5 ×1.2). The
/// adjusted popularity maps onto four bands: > 2000 → 60–120 min (busy),
/// > 1000 → 30–60 (busy), > 500 → 15–30, else 5–15.
#[must_use]
pub fn predict_wait(
    review_count: u32,
    rating: f64,
    at: NaiveDateTime,
    party_size: u32,
) -> WaitEstimate {
    let hour = at.hour();

    let mut time_multiplier = if (12..=14).contains(&hour) || (18..=20).contains(&hour) {
        1.8
    } else if hour == 11 || hour == 17 {
        1.3
    } else if hour >= 21 || hour <= 10 {
        0.5
    } else {
        1.0
    };

    if matches!(at.weekday(), Weekday::Sat | Weekday::Sun) {
        time_multiplier *= 1.3;
    }

    let party_multiplier = if party_size >= 6 {
        1.5
    } else if party_size >= 4 {
        1.2
    } else {
        1.0
    };

    let popularity = f64::from(review_count) * rating;
    let adjusted = popularity * time_multiplier * party_multiplier;

    if adjusted > 2000.0 {
        WaitEstimate {
            min_minutes: 60,
            max_minutes: 120,
            busy: true,
        }
    } else if adjusted > 1000.0 {
        WaitEstimate {
            min_minutes: 30,
            max_minutes: 60,
            busy: true,
        }
    } else if adjusted > 500.0 {
        WaitEstimate {
            min_minutes: 15,
            max_minutes: 30,
            busy: false,
        }
    } else {
        WaitEstimate {
            min_minutes: 5,
            max_minutes: 15,
            busy: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    // 2025-06-03 is a Tuesday, 2025-06-07 a Saturday.
    fn weekday_at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 3)
            .unwrap()
            .and_hms_opt(hour, 30, 0)
            .unwrap()
    }

    fn saturday_at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 7)
            .unwrap()
            .and_hms_opt(hour, 30, 0)
            .unwrap()
    }

    #[test]
    fn quiet_spot_off_peak_has_minimal_wait() {
        let estimate = predict_wait(40, 4.0, weekday_at(15), 2);
        assert_eq!(
            estimate,
            WaitEstimate {
                min_minutes: 5,
                max_minutes: 15,
                busy: false
            }
        );
    }

    #[test]
    fn dinner_peak_pushes_popular_spot_to_top_band() {
        // 400 reviews × 4.5 = 1800; ×1.8 dinner peak = 3240
        let estimate = predict_wait(400, 4.5, weekday_at(19), 2);
        assert_eq!(estimate.min_minutes, 60);
        assert_eq!(estimate.max_minutes, 120);
        assert!(estimate.busy);
    }

    #[test]
    fn late_night_halves_the_popularity_proxy() {
        // 400 × 4.5 = 1800 would be band two; ×0.5 at 23:30 → 900 → band three
        let estimate = predict_wait(400, 4.5, weekday_at(23), 2);
        assert_eq!(estimate.min_minutes, 15);
        assert!(!estimate.busy);
    }

    #[test]
    fn weekend_multiplier_stacks_with_time_of_day() {
        // 300 × 4.0 = 1200; weekday 15:30 → 1200 (band 30–60);
        // Saturday 15:30 → 1560 (still 30–60); Saturday 19:30 → ×1.8×1.3 = 2808
        let weekday = predict_wait(300, 4.0, weekday_at(15), 2);
        let saturday_dinner = predict_wait(300, 4.0, saturday_at(19), 2);
        assert_eq!(weekday.min_minutes, 30);
        assert_eq!(saturday_dinner.min_minutes, 60);
    }

    #[test]
    fn large_party_waits_longer() {
        // 300 × 4.0 = 1200 at a neutral hour: pair → 30–60, party of six ×1.5 → 1800 stays
        // 30–60, but 500-review spot: 2000 → exactly at the band edge, ×1.5 → 3000
        let pair = predict_wait(500, 4.0, weekday_at(15), 2);
        let six = predict_wait(500, 4.0, weekday_at(15), 6);
        assert_eq!(pair.min_minutes, 30);
        assert_eq!(six.min_minutes, 60);
    }

    #[test]
    fn shoulder_hour_uses_intermediate_multiplier() {
        // 500 × 4.0 = 2000; 11:30 ×1.3 = 2600 → top band; 15:30 ×1.0 = 2000 → second band
        let shoulder = predict_wait(500, 4.0, weekday_at(11), 2);
        let neutral = predict_wait(500, 4.0, weekday_at(15), 2);
        assert_eq!(shoulder.min_minutes, 60);
        assert_eq!(neutral.min_minutes, 30);
    }

    #[test]
    fn prediction_is_deterministic() {
        let at = weekday_at(19);
        let a = predict_wait(250, 4.2, at, 4);
        let b = predict_wait(250, 4.2, at, 4);
        assert_eq!(a, b);
    }

    #[test]
    fn zero_reviews_always_bottom_band() {
        for hour in [9, 12, 19, 23] {
            let estimate = predict_wait(0, 5.0, weekday_at(hour), 8);
            assert_eq!(estimate.min_minutes, 5);
            assert!(!estimate.busy);
        }
    }
}
