// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod checkpoint;
pub mod runner;

pub use checkpoint::{Checkpoint, CheckpointRecord, Split};
pub use runner::{Runner, RunnerSnapshot};
