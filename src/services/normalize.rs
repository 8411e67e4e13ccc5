// SPDX-License-Identifier: MIT

//! Checkpoint normalizer.
//!
//! Turns the raw provider record list into a cleaned, distance-ordered
//! checkpoint sequence. Records with an unparseable distance or no usable
//! time are dropped silently: absent checkpoints are expected for runners
//! who have not passed them yet.

use crate::models::{Checkpoint, CheckpointRecord};
use crate::time_utils::parse_duration;
use regex::Regex;

pub struct Normalizer {
    distance_re: Regex,
    time_re: Regex,
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            // Numeric distance with optional unit token, e.g. "5km", "5000m", "10K"
            distance_re: Regex::new(r"(?i)(\d+\.?\d*)\s*(km|m|k)?").expect("valid regex"),
            time_re: Regex::new(r"\d+:\d+").expect("valid regex"),
        }
    }

    /// Normalize raw records into an ordered checkpoint sequence.
    ///
    /// Empty or fully-rejected input yields an empty sequence, not an
    /// error. The sort is stable; duplicate distances both survive, in
    /// input order, for the derivation engine to process.
    pub fn normalize(&self, records: &[CheckpointRecord]) -> Vec<Checkpoint> {
        let mut checkpoints: Vec<Checkpoint> = records
            .iter()
            .filter_map(|record| self.normalize_one(record))
            .collect();

        checkpoints.sort_by(|a, b| {
            a.distance_km
                .partial_cmp(&b.distance_km)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        checkpoints
    }

    fn normalize_one(&self, record: &CheckpointRecord) -> Option<Checkpoint> {
        let distance_km = self
            .extract_distance_km(&record.label)
            .or_else(|| self.extract_distance_km(&record.code))?;

        // A record is usable only if its time looks like a clock value and
        // parses as a full HH:MM:SS duration.
        if !self.time_re.is_match(&record.raw_time) {
            return None;
        }
        let time_seconds = parse_duration(&record.raw_time)?;

        Some(Checkpoint {
            code: record.code.clone(),
            label: record.label.clone(),
            distance_km,
            time_seconds,
        })
    }

    /// Pull a numeric distance out of a label or code, converting meters
    /// to kilometres. Values of 100 m or more tagged `m` are divided by
    /// 1000; `km`/`K`-suffixed and unit-less values are taken as km per
    /// provider convention.
    fn extract_distance_km(&self, text: &str) -> Option<f64> {
        let captures = self.distance_re.captures(text)?;
        let mut distance: f64 = captures[1].parse().ok()?;
        let unit = captures
            .get(2)
            .map(|m| m.as_str().to_ascii_lowercase())
            .unwrap_or_default();

        if unit == "m" && distance >= 100.0 {
            distance /= 1000.0;
        }

        Some(distance)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}
