// SPDX-License-Identifier: MIT

//! Finish-time estimator.
//!
//! Naive linear projection from the most recent valid pace over the
//! remaining race distance. No smoothing or averaging across recent
//! splits; that simplification is the documented behavior, not a defect.

use crate::time_utils::format_duration;

/// Project the finish time in elapsed seconds.
///
/// `None` when no pace is known yet or the runner has no recorded
/// distance. A runner at or past the finish projects their own elapsed
/// time.
pub fn estimate_finish_seconds(
    latest_pace_seconds_per_km: Option<f64>,
    latest_distance_km: f64,
    latest_elapsed_seconds: f64,
    race_distance_km: f64,
) -> Option<f64> {
    let pace = latest_pace_seconds_per_km?;
    if latest_distance_km <= 0.0 {
        return None;
    }

    let remaining_km = (race_distance_km - latest_distance_km).max(0.0);
    Some(latest_elapsed_seconds + remaining_km * pace)
}

/// Project the finish time as a `HH:MM:SS` string.
pub fn estimate_finish(
    latest_pace_seconds_per_km: Option<f64>,
    latest_distance_km: f64,
    latest_elapsed_seconds: f64,
    race_distance_km: f64,
) -> Option<String> {
    estimate_finish_seconds(
        latest_pace_seconds_per_km,
        latest_distance_km,
        latest_elapsed_seconds,
        race_distance_km,
    )
    .map(format_duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARATHON_KM: f64 = 42.195;

    #[test]
    fn test_projection_scenario() {
        // 10 km in 3030s at 306 s/km: 32.195 km remain, ~9851.7s to go
        let seconds = estimate_finish_seconds(Some(306.0), 10.0, 3030.0, MARATHON_KM).unwrap();
        assert!((seconds - 12881.7).abs() < 0.2);
        assert_eq!(
            estimate_finish(Some(306.0), 10.0, 3030.0, MARATHON_KM).as_deref(),
            Some("03:34:41")
        );
    }

    #[test]
    fn test_no_pace_no_estimate() {
        assert_eq!(estimate_finish(None, 10.0, 3030.0, MARATHON_KM), None);
    }

    #[test]
    fn test_zero_distance_no_estimate() {
        assert_eq!(estimate_finish(Some(300.0), 0.0, 0.0, MARATHON_KM), None);
    }

    #[test]
    fn test_past_finish_projects_elapsed() {
        let seconds =
            estimate_finish_seconds(Some(300.0), MARATHON_KM, 12000.0, MARATHON_KM).unwrap();
        assert_eq!(seconds, 12000.0);
    }
}
