// SPDX-License-Identifier: MIT

//! Split derivation engine.
//!
//! Walks an ordered checkpoint sequence and computes, per checkpoint, the
//! split time (delta from the previous checkpoint), cumulative time (delta
//! from the start), and pace (seconds per kilometre over the segment).
//! Fractional seconds are truncated to whole seconds here; that is the
//! pipeline's documented rounding rule.

use crate::models::{Checkpoint, Split};

/// Derived split sequence plus a data-quality flag.
#[derive(Debug, Default)]
pub struct Derivation {
    pub splits: Vec<Split>,
    /// Set when upstream produced a negative duration (clock rollback);
    /// the offending value is clamped to zero rather than propagated.
    pub suspect: bool,
}

/// Derive enriched splits from an ordered checkpoint sequence.
///
/// Empty input yields an empty derivation ("no data yet"); the caller
/// keeps the runner's previous state in that case.
pub fn derive_splits(checkpoints: &[Checkpoint]) -> Derivation {
    let mut derivation = Derivation::default();

    let Some(start) = checkpoints.first() else {
        return derivation;
    };

    for (i, checkpoint) in checkpoints.iter().enumerate() {
        let (split_seconds, pace_seconds_per_km) = if i == 0 {
            (0.0, None)
        } else {
            let prev = &checkpoints[i - 1];
            let split = clamp_duration(
                checkpoint.time_seconds - prev.time_seconds,
                &mut derivation.suspect,
            );
            let segment_km = checkpoint.distance_km - prev.distance_km;
            let pace = (segment_km > 0.0).then(|| split / segment_km);
            (split, pace)
        };

        let cumulative_seconds = clamp_duration(
            checkpoint.time_seconds - start.time_seconds,
            &mut derivation.suspect,
        );

        derivation.splits.push(Split {
            checkpoint: checkpoint.clone(),
            split_seconds,
            cumulative_seconds,
            pace_seconds_per_km,
        });
    }

    derivation
}

/// Floor-truncate a duration to whole seconds, clamping clock rollbacks
/// to zero and flagging them.
fn clamp_duration(seconds: f64, suspect: &mut bool) -> f64 {
    if seconds < 0.0 {
        *suspect = true;
        return 0.0;
    }
    seconds.floor()
}

/// The runner's current snapshot: the split at the greatest distance, ties
/// broken by greatest cumulative time.
pub fn latest_split(splits: &[Split]) -> Option<&Split> {
    splits.iter().max_by(|a, b| {
        a.checkpoint
            .distance_km
            .partial_cmp(&b.checkpoint.distance_km)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(
                a.cumulative_seconds
                    .partial_cmp(&b.cumulative_seconds)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
    })
}
