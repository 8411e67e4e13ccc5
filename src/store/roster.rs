// SPDX-License-Identifier: MIT

//! Flat-file roster store keyed by bib number.
//!
//! The roster is small (one entry per tracked runner) so the whole map is
//! serialized to a JSON file after every mutation; last write wins.
//! Refresh tasks for different runners mutate the map concurrently, so
//! saves take a lock and go through a write-then-rename.

use crate::error::AppError;
use crate::models::{Runner, RunnerSnapshot, Split};
use dashmap::DashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// Two splits closer than this are the same timing mat.
const DISTANCE_EPSILON_KM: f64 = 1e-6;

pub struct RosterStore {
    path: Option<PathBuf>,
    runners: DashMap<String, Runner>,
    save_lock: Mutex<()>,
}

impl RosterStore {
    /// Open a roster file, loading any existing entries.
    ///
    /// A missing file is a fresh roster; an unreadable or unparseable file
    /// is fatal since it indicates a startup-ordering or deployment bug.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();
        let runners = DashMap::new();

        if path.exists() {
            let data = fs::read_to_string(&path)
                .map_err(|e| AppError::Store(format!("Failed to read roster file: {}", e)))?;
            let loaded: Vec<Runner> = serde_json::from_str(&data)
                .map_err(|e| AppError::Store(format!("Failed to parse roster file: {}", e)))?;
            for runner in loaded {
                runners.insert(runner.bib_number.clone(), runner);
            }
            tracing::info!(count = runners.len(), path = %path.display(), "Roster loaded");
        }

        Ok(Self {
            path: Some(path),
            runners,
            save_lock: Mutex::new(()),
        })
    }

    /// Ephemeral store for tests.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            runners: DashMap::new(),
            save_lock: Mutex::new(()),
        }
    }

    /// All runners, unordered.
    pub fn list(&self) -> Vec<Runner> {
        self.runners.iter().map(|r| r.value().clone()).collect()
    }

    pub fn get(&self, bib_number: &str) -> Option<Runner> {
        self.runners.get(bib_number).map(|r| r.value().clone())
    }

    /// Register a new runner. Duplicate bib numbers are rejected.
    pub fn insert(&self, runner: Runner) -> Result<(), AppError> {
        if self.runners.contains_key(&runner.bib_number) {
            return Err(AppError::Conflict(runner.bib_number));
        }
        self.runners.insert(runner.bib_number.clone(), runner);
        self.save()
    }

    /// Remove a runner. Credential checks happen in the caller; the store
    /// never validates secrets.
    pub fn delete(&self, bib_number: &str) -> Result<Runner, AppError> {
        let (_, runner) = self
            .runners
            .remove(bib_number)
            .ok_or_else(|| AppError::NotFound(format!("Runner {}", bib_number)))?;
        self.save()?;
        Ok(runner)
    }

    /// Merge a fresh snapshot into a runner's stored state.
    ///
    /// Summary fields are replaced wholesale; splits are accumulated
    /// append-only with duplicate suppression keyed by distance, first
    /// write wins. An empty snapshot leaves the runner untouched.
    pub fn merge_snapshot(
        &self,
        bib_number: &str,
        snapshot: &RunnerSnapshot,
    ) -> Result<(), AppError> {
        if snapshot.is_empty() {
            return Ok(());
        }

        {
            let mut entry = self
                .runners
                .get_mut(bib_number)
                .ok_or_else(|| AppError::NotFound(format!("Runner {}", bib_number)))?;
            let runner = entry.value_mut();

            merge_splits(&mut runner.splits, &snapshot.splits);
            runner.current_distance_km = snapshot.current_distance_km;
            runner.current_pace = snapshot.current_pace;
            runner.estimated_finish_time = snapshot.estimated_finish_time.clone();
            runner.suspect = runner.suspect || snapshot.suspect;
            runner.updated_at = chrono::Utc::now().to_rfc3339();
        }

        self.save()
    }

    /// Persist the roster. No-op for in-memory stores.
    ///
    /// One writer at a time; the map is snapshotted under the lock so the
    /// last save holds the newest state, and the rename keeps readers from
    /// ever seeing a partially written file.
    fn save(&self) -> Result<(), AppError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let _guard = self.save_lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut runners = self.list();
        runners.sort_by(|a, b| a.bib_number.cmp(&b.bib_number));

        let data = serde_json::to_string_pretty(&runners)
            .map_err(|e| AppError::Store(format!("Failed to serialize roster: {}", e)))?;

        let tmp = path.with_extension("tmp");
        fs::write(&tmp, data)
            .map_err(|e| AppError::Store(format!("Failed to write roster file: {}", e)))?;
        fs::rename(&tmp, path)
            .map_err(|e| AppError::Store(format!("Failed to replace roster file: {}", e)))
    }
}

/// Append new splits, suppressing duplicates by distance (first write
/// wins), and keep the sequence ordered by distance.
fn merge_splits(existing: &mut Vec<Split>, incoming: &[Split]) {
    for split in incoming {
        let already_recorded = existing.iter().any(|s| {
            (s.checkpoint.distance_km - split.checkpoint.distance_km).abs() < DISTANCE_EPSILON_KM
        });
        if !already_recorded {
            existing.push(split.clone());
        }
    }

    existing.sort_by(|a, b| {
        a.checkpoint
            .distance_km
            .partial_cmp(&b.checkpoint.distance_km)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
