// SPDX-License-Identifier: MIT

//! Clock-duration codec shared by the split pipeline.
//!
//! Timing providers emit durations as `HH:MM:SS` or `HH:MM:SS.fff` strings;
//! every derived quantity (split, cumulative, pace, estimate) works in
//! seconds-since-start and converts back through here.

/// Parse a `HH:MM:SS[.fff]` clock string into seconds.
///
/// Returns `None` when fewer than three colon-separated parts are present or
/// any part is non-numeric. Never panics on malformed input; unmeasured
/// checkpoints routinely carry `"-"` or an empty string.
pub fn parse_duration(s: &str) -> Option<f64> {
    let parts: Vec<&str> = s.trim().split(':').collect();
    if parts.len() < 3 {
        return None;
    }

    let hours: f64 = parts[0].trim().parse().ok()?;
    let minutes: f64 = parts[1].trim().parse().ok()?;
    let seconds: f64 = parts[2].trim().parse().ok()?;

    Some(hours * 3600.0 + minutes * 60.0 + seconds)
}

/// Format seconds as a zero-padded `HH:MM:SS` string, floor-truncating any
/// fractional component.
///
/// Negative input is a caller error (the derivation engine clamps negative
/// durations before they get here); guard to zero rather than emit a
/// negative clock string.
pub fn format_duration(seconds: f64) -> String {
    debug_assert!(seconds >= 0.0, "negative duration passed to format_duration");
    let total = seconds.max(0.0).floor() as u64;

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}
