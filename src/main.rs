// SPDX-License-Identifier: MIT

//! Split-Tracker API Server
//!
//! Tracks runners through a race by polling a third-party timing provider
//! per bib number and serving reconciled splits, paces, and finish
//! estimates over HTTP.

use split_tracker::{
    config::Config,
    services::{provider::adapter_for, HttpFeedSource, RefreshScheduler, RunnerTracker},
    store::RosterStore,
    AppState,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Split-Tracker API");

    // Open the roster store; an unreadable roster is a startup bug
    let store = Arc::new(RosterStore::open(&config.roster_path).expect("Failed to open roster"));
    tracing::info!(path = %config.roster_path, "Roster store ready");

    // Provider pipeline: feed source + format adapter for this deployment
    let feed = Arc::new(HttpFeedSource::new(&config).expect("Failed to build provider client"));
    let adapter = adapter_for(config.provider_mode);
    let tracker = Arc::new(RunnerTracker::new(feed, adapter, config.race_distance_km));

    // Periodic refresh of every tracked, unfinished runner
    let scheduler = RefreshScheduler::new(
        Arc::clone(&tracker),
        Arc::clone(&store),
        Duration::from_millis(config.poll_interval_ms),
        config.race_distance_km,
    );
    let scheduler_handle = scheduler.start();

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.fetch_timeout_secs))
        .build()
        .expect("Failed to build HTTP client");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        store,
        tracker,
        scheduler: scheduler.clone(),
        http,
    });

    // Build router
    let app = split_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Stop polling; in-flight fetches finish and are discarded
    scheduler.stop();
    let _ = scheduler_handle.await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("split_tracker=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
