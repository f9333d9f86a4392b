use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::api::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub pipelines: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// Ready only when both inference pipelines were initialized at startup.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<ReadinessResponse>, StatusCode> {
    if state.chat.pipelines_ready() {
        Ok(Json(ReadinessResponse {
            status: "ready".into(),
            pipelines: "initialized".into(),
        }))
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}
