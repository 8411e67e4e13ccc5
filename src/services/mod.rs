// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod derive;
pub mod estimate;
pub mod normalize;
pub mod provider;
pub mod provider_html;
pub mod provider_json;
pub mod scheduler;
pub mod tracker;

pub use derive::{derive_splits, latest_split, Derivation};
pub use estimate::estimate_finish;
pub use normalize::Normalizer;
pub use provider::{FeedSource, HttpFeedSource, ProviderAdapter, ProviderFeed};
pub use provider_html::HtmlTableAdapter;
pub use provider_json::JsonRecordsAdapter;
pub use scheduler::RefreshScheduler;
pub use tracker::RunnerTracker;
