// SPDX-License-Identifier: MIT

//! Checkpoint and split models for the timing pipeline.

use serde::{Deserialize, Serialize};

/// Raw checkpoint record as supplied by a timing provider, before
/// normalization. Created fresh on every fetch and discarded afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckpointRecord {
    /// Opaque provider identifier; may embed an ordinal ("CP5", "5K")
    pub code: String,
    /// Human-readable timing-point name
    pub label: String,
    /// Clock-duration or time-of-day string; possibly empty or "-" when
    /// the runner has not passed this point yet
    pub raw_time: String,
}

/// Normalized checkpoint: distance in kilometres, time in elapsed seconds.
///
/// Within an ordered sequence for one runner, `distance_km` is
/// monotonically non-decreasing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    pub code: String,
    pub label: String,
    pub distance_km: f64,
    pub time_seconds: f64,
}

/// Enriched split derived from consecutive checkpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Split {
    pub checkpoint: Checkpoint,
    /// Seconds since the previous checkpoint (zero for the first)
    pub split_seconds: f64,
    /// Seconds since the first checkpoint
    pub cumulative_seconds: f64,
    /// Seconds per kilometre over this segment; `None` when the segment
    /// distance is not positive
    pub pace_seconds_per_km: Option<f64>,
}
