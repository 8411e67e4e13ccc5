// SPDX-License-Identifier: MIT

//! JSON provider adapter.
//!
//! Other timing providers answer with a JSON object whose `records` array
//! holds one entry per checkpoint: `point_cd` (code), a nested
//! `point.name` (label), and `time_point` (elapsed or time-of-day string).
//! A mis-shaped document yields "no data", never an error.

use crate::models::CheckpointRecord;
use crate::services::provider::{ProviderAdapter, ProviderFeed};
use serde_json::Value;

pub struct JsonRecordsAdapter;

impl JsonRecordsAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonRecordsAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderAdapter for JsonRecordsAdapter {
    fn parse(&self, body: &str) -> ProviderFeed {
        let value: Value = match serde_json::from_str(body) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!(error = %e, "Provider response is not valid JSON");
                return ProviderFeed::empty();
            }
        };

        let Some(entries) = value.get("records").and_then(Value::as_array) else {
            tracing::debug!("Provider response has no records array");
            return ProviderFeed::empty();
        };

        let records = entries
            .iter()
            .map(|entry| {
                let field = |v: &Value| v.as_str().unwrap_or("").trim().to_string();
                CheckpointRecord {
                    code: field(&entry["point_cd"]),
                    label: field(&entry["point"]["name"]),
                    raw_time: field(&entry["time_point"]),
                }
            })
            .collect();

        ProviderFeed {
            runner_name: None,
            records,
        }
    }
}
