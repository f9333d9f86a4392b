use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::api::{error::ApiError, extract::ApiPath, state::AppState};
use crate::domain::{Session, SessionState};

#[derive(Debug, Serialize)]
pub struct DocumentInfo {
    pub id: Uuid,
    pub name: String,
    pub page_count: usize,
    pub char_count: usize,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: Uuid,
    pub state: SessionState,
    pub document: Option<DocumentInfo>,
    pub turns: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id,
            state: session.state(),
            document: session.document().map(|doc| DocumentInfo {
                id: doc.id,
                name: doc.name.clone(),
                page_count: doc.page_count,
                char_count: doc.char_count(),
            }),
            turns: session.history().len(),
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

pub async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let (_id, handle) = state.sessions.create().await?;
    let session = handle.lock().await;
    Ok((StatusCode::CREATED, Json(SessionResponse::from(&*session))))
}

pub async fn get_session(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<SessionResponse>, ApiError> {
    let handle = state.session(id).await?;
    let session = handle.lock().await;
    Ok(Json(SessionResponse::from(&*session)))
}
