// SPDX-License-Identifier: MIT

//! Thin proxy to the timing provider.
//!
//! Browser clients cannot call the provider directly because of
//! cross-origin restrictions; this endpoint forwards the request
//! server-side and passes the raw body back unchanged.

use crate::error::{AppError, Result};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/event/{event_id}/player/{bib}", get(proxy_player))
}

/// Forward a player lookup to the provider and relay status, content type,
/// and body as-is. Transport failures become a 502-class error.
async fn proxy_player(
    State(state): State<Arc<AppState>>,
    Path((event_id, bib)): Path<(String, String)>,
) -> Result<Response> {
    let url = format!(
        "{}/api/event/{}/player/{}",
        state.config.provider_base_url, event_id, bib
    );

    let upstream = state
        .http
        .get(&url)
        .send()
        .await
        .map_err(|e| AppError::Provider(format!("Provider request failed: {}", e)))?;

    let status =
        StatusCode::from_u16(upstream.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = upstream
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("text/plain; charset=utf-8")
        .to_string();
    let body = upstream
        .bytes()
        .await
        .map_err(|e| AppError::Provider(format!("Failed to read provider body: {}", e)))?;

    Ok((status, [(header::CONTENT_TYPE, content_type)], body).into_response())
}
