use std::sync::Arc;
use uuid::Uuid;

use crate::application::ChatService;
use crate::domain::{
    ports::{SessionHandle, SessionStore},
    DomainError,
};
use crate::infrastructure::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionStore>,
    pub chat: Arc<ChatService>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(sessions: Arc<dyn SessionStore>, chat: Arc<ChatService>, config: AppConfig) -> Self {
        Self {
            sessions,
            chat,
            config: Arc::new(config),
        }
    }

    pub async fn session(&self, id: Uuid) -> Result<SessionHandle, DomainError> {
        self.sessions
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("session {id}")))
    }
}
