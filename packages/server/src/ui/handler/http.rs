//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{infrastructure::dto::http::StatusDto, ui::state::AppState};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Online users, stored message count and uptime
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusDto> {
    let snapshot = state.get_status_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(StatusDto {
        status: "online".to_string(),
        users: snapshot
            .users
            .into_iter()
            .map(|username| username.into_string())
            .collect(),
        total_messages: snapshot.total_messages,
        uptime: snapshot.uptime.as_secs_f64(),
    })
}
