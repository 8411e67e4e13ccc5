// SPDX-License-Identifier: MIT

//! Refresh scheduler.
//!
//! Single logical timer that re-runs the tracking pipeline for every
//! unfinished runner on a fixed period. Finished runners are terminal and
//! never fetched again. Per-runner failures are logged and isolated; one
//! bad fetch never aborts the tick for other runners.

use crate::models::Runner;
use crate::services::RunnerTracker;
use crate::store::RosterStore;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Cheap-clone handle around the shared scheduler state.
#[derive(Clone)]
pub struct RefreshScheduler {
    inner: Arc<Inner>,
}

struct Inner {
    tracker: Arc<RunnerTracker>,
    store: Arc<RosterStore>,
    interval: Duration,
    race_distance_km: f64,
    cancel: CancellationToken,
    /// Bibs with a fetch still in flight; their tick is skipped, not queued
    in_flight: DashMap<String, ()>,
}

impl RefreshScheduler {
    pub fn new(
        tracker: Arc<RunnerTracker>,
        store: Arc<RosterStore>,
        interval: Duration,
        race_distance_km: f64,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                tracker,
                store,
                interval,
                race_distance_km,
                cancel: CancellationToken::new(),
                in_flight: DashMap::new(),
            }),
        }
    }

    /// Spawn the periodic refresh task. Runs until [`stop`](Self::stop).
    pub fn start(&self) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(inner.interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            tracing::info!(
                period_ms = inner.interval.as_millis() as u64,
                "Refresh scheduler started"
            );

            loop {
                tokio::select! {
                    _ = inner.cancel.cancelled() => break,
                    _ = ticker.tick() => Inner::run_tick(&inner),
                }
            }
            tracing::info!("Refresh scheduler stopped");
        })
    }

    /// Stop the scheduler. In-flight fetches complete but their results
    /// are discarded rather than merged.
    pub fn stop(&self) {
        self.inner.cancel.cancel();
    }

    /// Run one scheduling pass without waiting for the fetches it spawns.
    pub fn tick(&self) {
        Inner::run_tick(&self.inner);
    }

    /// Refresh every unfinished runner and wait for completion. Backs the
    /// manual refresh endpoint; the periodic tick uses the fire-and-forget
    /// path instead. Returns how many runners received new data.
    pub async fn refresh_all(&self) -> usize {
        let eligible: Vec<Runner> = self
            .inner
            .store
            .list()
            .into_iter()
            .filter(|r| !r.is_finished(self.inner.race_distance_km))
            .collect();

        let refreshed = futures_util::future::join_all(
            eligible
                .iter()
                .map(|r| self.inner.refresh_one(&r.bib_number)),
        )
        .await;

        refreshed.into_iter().filter(|ok| *ok).count()
    }
}

impl Inner {
    /// One scheduling pass: spawn an isolated refresh task per eligible
    /// runner. Fetches for different runners proceed concurrently; a
    /// runner whose previous fetch is still running is skipped this tick.
    fn run_tick(inner: &Arc<Inner>) {
        for runner in inner.store.list() {
            if runner.is_finished(inner.race_distance_km) {
                tracing::debug!(bib = %runner.bib_number, "Runner finished, skipping poll");
                continue;
            }

            let bib = runner.bib_number.clone();
            if inner.in_flight.insert(bib.clone(), ()).is_some() {
                tracing::debug!(bib = %bib, "Previous fetch still in flight, skipping tick");
                continue;
            }

            let inner = Arc::clone(inner);
            tokio::spawn(async move {
                inner.refresh_one(&bib).await;
                inner.in_flight.remove(&bib);
            });
        }
    }

    /// Fetch and merge one runner; returns whether new data was merged.
    async fn refresh_one(&self, bib_number: &str) -> bool {
        match self.tracker.fetch_snapshot(bib_number).await {
            Ok(snapshot) if snapshot.is_empty() => {
                tracing::debug!(bib = bib_number, "No new data this tick");
                false
            }
            Ok(snapshot) => {
                // Results arriving after shutdown are discarded, not merged
                if self.cancel.is_cancelled() {
                    return false;
                }
                match self.store.merge_snapshot(bib_number, &snapshot) {
                    Ok(()) => true,
                    Err(e) => {
                        tracing::warn!(bib = bib_number, error = %e, "Failed to merge snapshot");
                        false
                    }
                }
            }
            Err(e) => {
                tracing::warn!(bib = bib_number, error = %e, "Runner refresh failed");
                false
            }
        }
    }
}
