// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Read-only activity routes used by the web UI.
//!
//! Activities are addressed by their zero-based position in the store's
//! insertion order, not by row id. An index can go stale: after a replace
//! the same index may name a different activity.

use crate::error::{AppError, Result};
use crate::models::Activity;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

/// Content type of raw GPX responses.
pub const GPX_CONTENT_TYPE: &str = "application/gpx+xml";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/gpx/{id}", get(get_gpx))
        .route("/gpx/{id}/detail", get(get_activity_detail))
        .route("/token", get(get_token))
}

fn parse_index(raw: &str) -> Result<usize> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid activity index: {:?}", raw)))
}

/// Load every activity and pick the one at `index`.
async fn activity_at(state: &AppState, index: usize) -> Result<Activity> {
    let mut activities = state.store.get().await?;
    if index >= activities.len() {
        return Err(AppError::NotFound(format!(
            "Activity {} (have {})",
            index,
            activities.len()
        )));
    }
    Ok(activities.swap_remove(index))
}

/// Serve the original GPX file.
async fn get_gpx(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Result<Response> {
    let index = parse_index(&id)?;
    let activity = activity_at(&state, index).await?;

    tracing::debug!(index, digest = %activity.gpx_hash, "Serving GPX");

    Ok(([(header::CONTENT_TYPE, GPX_CONTENT_TYPE)], activity.gpx).into_response())
}

/// Serve the reconstructed activity including its splits.
async fn get_activity_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Activity>> {
    let index = parse_index(&id)?;
    let activity = activity_at(&state, index).await?;
    Ok(Json(activity))
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Hand the map token to the web UI.
async fn get_token(State(state): State<Arc<AppState>>) -> Result<Json<TokenResponse>> {
    let token = state
        .config
        .mapbox_token
        .clone()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("MAPBOX_TOKEN not set")))?;
    Ok(Json(TokenResponse { token }))
}
