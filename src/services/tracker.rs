// SPDX-License-Identifier: MIT

//! Runner tracking service.
//!
//! Handles the core workflow for one runner:
//! 1. Fetch the raw feed from the timing provider
//! 2. Parse it with the configured adapter
//! 3. Normalize records into ordered checkpoints
//! 4. Derive splits, cumulative times, and paces
//! 5. Project a finish estimate

use crate::error::Result;
use crate::models::RunnerSnapshot;
use crate::services::{derive_splits, estimate_finish, latest_split, Normalizer};
use crate::services::{FeedSource, ProviderAdapter};
use std::sync::Arc;

/// Runs the fetch → parse → normalize → derive → estimate pipeline.
pub struct RunnerTracker {
    feed: Arc<dyn FeedSource>,
    adapter: Arc<dyn ProviderAdapter>,
    normalizer: Normalizer,
    race_distance_km: f64,
}

impl RunnerTracker {
    pub fn new(
        feed: Arc<dyn FeedSource>,
        adapter: Arc<dyn ProviderAdapter>,
        race_distance_km: f64,
    ) -> Self {
        Self {
            feed,
            adapter,
            normalizer: Normalizer::new(),
            race_distance_km,
        }
    }

    /// Fetch and process one runner's checkpoint feed.
    ///
    /// An upstream "no data" response or a feed with no usable records
    /// yields an empty snapshot; the caller keeps the runner's previous
    /// state. Only transport failures surface as errors.
    pub async fn fetch_snapshot(&self, bib_number: &str) -> Result<RunnerSnapshot> {
        let Some(body) = self.feed.fetch(bib_number).await? else {
            return Ok(RunnerSnapshot::default());
        };

        let feed = self.adapter.parse(&body);
        let checkpoints = self.normalizer.normalize(&feed.records);
        let derivation = derive_splits(&checkpoints);

        let mut snapshot = RunnerSnapshot {
            name: feed.runner_name,
            suspect: derivation.suspect,
            ..Default::default()
        };

        if let Some(latest) = latest_split(&derivation.splits) {
            snapshot.current_distance_km = latest.checkpoint.distance_km;
            snapshot.current_pace = latest.pace_seconds_per_km;
            // The projection runs from the checkpoint's raw clock time, not
            // the cumulative delta: the feed may omit a start record, and
            // cumulative time only counts from the first reported checkpoint
            snapshot.estimated_finish_time = estimate_finish(
                latest.pace_seconds_per_km,
                latest.checkpoint.distance_km,
                latest.checkpoint.time_seconds,
                self.race_distance_km,
            );
        }
        snapshot.splits = derivation.splits;

        tracing::debug!(
            bib = bib_number,
            splits = snapshot.splits.len(),
            distance_km = snapshot.current_distance_km,
            suspect = snapshot.suspect,
            "Processed runner feed"
        );

        Ok(snapshot)
    }
}
