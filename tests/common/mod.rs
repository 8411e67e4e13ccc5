// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use split_tracker::config::{Config, ProviderMode};
use split_tracker::error::AppError;
use split_tracker::routes::create_router;
use split_tracker::services::provider::adapter_for;
use split_tracker::services::{FeedSource, RefreshScheduler, RunnerTracker};
use split_tracker::store::RosterStore;
use split_tracker::AppState;
use std::sync::Arc;
use std::time::Duration;

/// Provider feed for a mid-race runner: 5 km at 25:00, 10 km at 50:30.
#[allow(dead_code)]
pub const MID_RACE_FEED: &str = r#"{"records": [
    {"point_cd": "CP1", "time_point": "00:25:00", "point": {"name": "5km"}},
    {"point_cd": "CP2", "time_point": "00:50:30", "point": {"name": "10km"}}
]}"#;

/// Feed source serving one canned body to every fetch.
pub struct StaticFeed {
    body: Option<String>,
}

#[async_trait]
impl FeedSource for StaticFeed {
    async fn fetch(&self, _bib_number: &str) -> Result<Option<String>, AppError> {
        Ok(self.body.clone())
    }
}

/// Create a test app over an in-memory roster and a canned provider feed.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(feed_body: Option<&str>) -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let store = Arc::new(RosterStore::in_memory());
    let feed = Arc::new(StaticFeed {
        body: feed_body.map(str::to_string),
    });
    let tracker = Arc::new(RunnerTracker::new(
        feed,
        adapter_for(ProviderMode::Json),
        config.race_distance_km,
    ));
    let scheduler = RefreshScheduler::new(
        Arc::clone(&tracker),
        Arc::clone(&store),
        Duration::from_millis(config.poll_interval_ms),
        config.race_distance_km,
    );

    let state = Arc::new(AppState {
        config,
        store,
        tracker,
        scheduler,
        http: reqwest::Client::new(),
    });

    (create_router(Arc::clone(&state)), state)
}
