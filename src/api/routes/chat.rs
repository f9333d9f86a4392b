use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::{
    error::ApiError,
    extract::{ApiJson, ApiPath},
    state::AppState,
};
use crate::application::AnswerOutcome;
use crate::domain::Turn;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub turns: Vec<Turn>,
}

/// Runs one question turn. The session lock is held for the whole turn, so a session
/// answers questions strictly one at a time.
pub async fn ask_question(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<AskRequest>,
) -> Result<Json<AnswerOutcome>, ApiError> {
    let handle = state.session(id).await?;
    let mut session = handle.lock().await;
    let outcome = state.chat.ask(&mut session, &request.question).await?;
    Ok(Json(outcome))
}

pub async fn get_history(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let handle = state.session(id).await?;
    let session = handle.lock().await;
    Ok(Json(HistoryResponse {
        turns: session.history().all().to_vec(),
    }))
}
