use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::{errors::DomainError, Session};

/// Exclusive access to one session for the duration of an interaction.
pub type SessionHandle = Arc<Mutex<Session>>;

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create(&self) -> Result<(Uuid, SessionHandle), DomainError>;
    async fn get(&self, id: Uuid) -> Result<Option<SessionHandle>, DomainError>;
}
