// SPDX-License-Identifier: MIT

//! Runner model for storage and API.

use crate::models::checkpoint::Split;
use serde::{Deserialize, Serialize};

/// Tracked runner stored in the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Runner {
    /// Race-assigned bib number, the lookup key against the timing provider
    pub bib_number: String,
    /// Display name
    pub name: String,
    /// 4-digit delete secret; persisted with the roster but never exposed
    /// through API responses (those use a separate view type)
    pub password: String,
    /// Optional tracking-group membership
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    /// Accumulated splits, ordered by distance, deduplicated by distance
    pub splits: Vec<Split>,
    /// Distance of the furthest checkpoint observed so far
    pub current_distance_km: f64,
    /// Pace at the furthest checkpoint, seconds per kilometre
    pub current_pace: Option<f64>,
    /// Projected finish time as `HH:MM:SS`, blank until a pace is known
    pub estimated_finish_time: Option<String>,
    /// Set when upstream data produced a negative duration (clock rollback)
    pub suspect: bool,
    /// When the runner was registered (RFC 3339)
    pub created_at: String,
    /// When the runner's splits were last refreshed (RFC 3339)
    pub updated_at: String,
}

impl Runner {
    /// Whether this runner has reached or passed the finish distance.
    ///
    /// Derived, never stored: a finished runner is terminal and is skipped
    /// by the refresh scheduler.
    pub fn is_finished(&self, race_distance_km: f64) -> bool {
        self.current_distance_km >= race_distance_km
    }
}

/// Result of one provider fetch for one runner, after the full
/// parse → normalize → derive → estimate pipeline.
///
/// A snapshot wholesale-replaces the previous one for display purposes;
/// merging into the persistent roster deduplicates splits by distance.
#[derive(Debug, Clone, Default)]
pub struct RunnerSnapshot {
    /// Display name scraped from the provider page, when present
    pub name: Option<String>,
    pub splits: Vec<Split>,
    pub current_distance_km: f64,
    pub current_pace: Option<f64>,
    pub estimated_finish_time: Option<String>,
    pub suspect: bool,
}

impl RunnerSnapshot {
    /// True when the fetch yielded no usable checkpoints. The runner keeps
    /// its previous state in that case.
    pub fn is_empty(&self) -> bool {
        self.splits.is_empty()
    }
}
