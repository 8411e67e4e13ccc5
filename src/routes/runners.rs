// SPDX-License-Identifier: MIT

//! Roster routes: list, add, inspect, refresh, and delete runners.

use crate::error::{AppError, Result};
use crate::models::{Runner, Split};
use crate::time_utils::format_duration;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::{Validate, ValidationError};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/runners", get(list_runners).post(add_runner))
        .route("/api/runners/refresh", post(refresh_all))
        .route("/api/runners/{bib}", get(get_runner).delete(delete_runner))
}

// ─── Responses ───────────────────────────────────────────────

/// Runner summary for the roster listing. The delete secret never leaves
/// the store.
#[derive(Serialize)]
pub struct RunnerResponse {
    pub bib_number: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    pub current_distance_km: f64,
    pub current_pace: Option<f64>,
    pub estimated_finish_time: Option<String>,
    pub finished: bool,
    pub suspect: bool,
    pub updated_at: String,
}

/// Per-checkpoint split with clock-formatted times.
#[derive(Serialize)]
pub struct SplitResponse {
    pub code: String,
    pub label: String,
    pub distance_km: f64,
    pub time: String,
    pub split_time: String,
    pub cumulative_time: String,
    pub pace_seconds_per_km: Option<f64>,
}

#[derive(Serialize)]
pub struct RunnerDetailResponse {
    #[serde(flatten)]
    pub runner: RunnerResponse,
    pub splits: Vec<SplitResponse>,
}

fn runner_response(runner: &Runner, race_distance_km: f64) -> RunnerResponse {
    RunnerResponse {
        bib_number: runner.bib_number.clone(),
        name: runner.name.clone(),
        group_id: runner.group_id.clone(),
        current_distance_km: runner.current_distance_km,
        current_pace: runner.current_pace,
        estimated_finish_time: runner.estimated_finish_time.clone(),
        finished: runner.is_finished(race_distance_km),
        suspect: runner.suspect,
        updated_at: runner.updated_at.clone(),
    }
}

fn split_response(split: &Split) -> SplitResponse {
    SplitResponse {
        code: split.checkpoint.code.clone(),
        label: split.checkpoint.label.clone(),
        distance_km: split.checkpoint.distance_km,
        time: format_duration(split.checkpoint.time_seconds),
        split_time: format_duration(split.split_seconds),
        cumulative_time: format_duration(split.cumulative_seconds),
        pace_seconds_per_km: split.pace_seconds_per_km,
    }
}

// ─── Listing ─────────────────────────────────────────────────

/// List all tracked runners.
async fn list_runners(State(state): State<Arc<AppState>>) -> Result<Json<Vec<RunnerResponse>>> {
    let mut runners = state.store.list();
    runners.sort_by(|a, b| a.bib_number.cmp(&b.bib_number));

    let race_distance_km = state.config.race_distance_km;
    Ok(Json(
        runners
            .iter()
            .map(|r| runner_response(r, race_distance_km))
            .collect(),
    ))
}

/// Get a single runner with their full split sequence.
async fn get_runner(
    State(state): State<Arc<AppState>>,
    Path(bib): Path<String>,
) -> Result<Json<RunnerDetailResponse>> {
    let runner = state
        .store
        .get(&bib)
        .ok_or_else(|| AppError::NotFound(format!("Runner {}", bib)))?;

    Ok(Json(RunnerDetailResponse {
        runner: runner_response(&runner, state.config.race_distance_km),
        splits: runner.splits.iter().map(split_response).collect(),
    }))
}

// ─── Registration ────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct AddRunnerRequest {
    #[validate(length(min = 1, message = "bib number is required"))]
    pub bib_number: String,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(custom(function = validate_pin))]
    pub password: String,
    pub group_id: Option<String>,
}

fn validate_pin(pin: &str) -> std::result::Result<(), ValidationError> {
    if pin.len() == 4 && pin.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("pin").with_message("password must be 4 digits".into()))
    }
}

/// Register a runner after a successful first fetch against the provider.
async fn add_runner(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AddRunnerRequest>,
) -> Result<(StatusCode, Json<RunnerResponse>)> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let bib = payload.bib_number.trim().to_string();
    if state.store.get(&bib).is_some() {
        return Err(AppError::Conflict(bib));
    }

    // The initial fetch doubles as bib validation: no data means the bib
    // is unknown to the provider.
    let snapshot = state.tracker.fetch_snapshot(&bib).await?;
    if snapshot.is_empty() {
        return Err(AppError::NotFound(format!(
            "No records for bib {}, check the bib number",
            bib
        )));
    }

    let now = chrono::Utc::now().to_rfc3339();
    let runner = Runner {
        bib_number: bib.clone(),
        name: payload.name.trim().to_string(),
        password: payload.password,
        group_id: payload.group_id,
        splits: snapshot.splits.clone(),
        current_distance_km: snapshot.current_distance_km,
        current_pace: snapshot.current_pace,
        estimated_finish_time: snapshot.estimated_finish_time.clone(),
        suspect: snapshot.suspect,
        created_at: now.clone(),
        updated_at: now,
    };

    state.store.insert(runner.clone())?;
    tracing::info!(bib = %bib, "Runner registered");

    Ok((
        StatusCode::CREATED,
        Json(runner_response(&runner, state.config.race_distance_km)),
    ))
}

// ─── Refresh ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RefreshResponse {
    pub refreshed: usize,
}

/// Manually refresh every unfinished runner (pull-to-refresh).
async fn refresh_all(State(state): State<Arc<AppState>>) -> Result<Json<RefreshResponse>> {
    let refreshed = state.scheduler.refresh_all().await;
    Ok(Json(RefreshResponse { refreshed }))
}

// ─── Deletion ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct DeleteRunnerRequest {
    pub password: String,
}

#[derive(Serialize)]
pub struct DeleteRunnerResponse {
    pub success: bool,
}

/// Delete a runner. Requires the runner's own secret or the
/// administrative secret; a mismatch is a rejected action, not a system
/// error.
async fn delete_runner(
    State(state): State<Arc<AppState>>,
    Path(bib): Path<String>,
    Json(payload): Json<DeleteRunnerRequest>,
) -> Result<Json<DeleteRunnerResponse>> {
    let runner = state
        .store
        .get(&bib)
        .ok_or_else(|| AppError::NotFound(format!("Runner {}", bib)))?;

    if payload.password != state.config.admin_password && payload.password != runner.password {
        tracing::info!(bib = %bib, "Delete rejected: credential mismatch");
        return Err(AppError::Forbidden);
    }

    state.store.delete(&bib)?;
    tracing::info!(bib = %bib, "Runner deleted");
    Ok(Json(DeleteRunnerResponse { success: true }))
}
