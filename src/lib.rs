// SPDX-License-Identifier: MIT

//! Split-Tracker: live race split tracking by bib number
//!
//! This crate provides the backend for following runners through a race:
//! it polls a third-party timing provider per tracked bib, reconciles the
//! raw checkpoint feed into ordered splits with derived pace and finish
//! estimates, and serves the roster over HTTP.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod time_utils;

use config::Config;
use services::{RefreshScheduler, RunnerTracker};
use std::sync::Arc;
use store::RosterStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: Arc<RosterStore>,
    pub tracker: Arc<RunnerTracker>,
    pub scheduler: RefreshScheduler,
    /// Client used by the provider proxy endpoint
    pub http: reqwest::Client,
}
