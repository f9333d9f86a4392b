use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::{
    ports::{SessionHandle, SessionStore},
    DomainError, Session,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
    pub max_sessions: usize,
    /// Sessions untouched for this long are dropped by the next sweep.
    pub idle_ttl: Duration,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            max_sessions: 1000,
            idle_ttl: Duration::from_secs(60 * 60),
        }
    }
}

pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<Uuid, SessionHandle>>,
    limits: SessionLimits,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::with_limits(SessionLimits::default())
    }

    pub fn with_limits(limits: SessionLimits) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            limits,
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every idle session and returns how many were removed.
    pub fn evict_idle(&self) -> Result<usize, DomainError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;
        Ok(self.retain_active(&mut sessions))
    }

    fn retain_active(&self, sessions: &mut HashMap<Uuid, SessionHandle>) -> usize {
        let now = Utc::now();
        let before = sessions.len();
        sessions.retain(|_, handle| !self.is_idle(handle, now));

        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::debug!(evicted, remaining = sessions.len(), "idle sessions evicted");
        }
        evicted
    }

    fn is_idle(&self, handle: &SessionHandle, now: DateTime<Utc>) -> bool {
        // Held or locked handles belong to a request in flight.
        if Arc::strong_count(handle) > 1 {
            return false;
        }
        match handle.try_lock() {
            Ok(session) => {
                let idle = now
                    .signed_duration_since(session.updated_at)
                    .to_std()
                    .unwrap_or_default();
                idle >= self.limits.idle_ttl
            }
            Err(_) => false,
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self) -> Result<(Uuid, SessionHandle), DomainError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        if sessions.len() >= self.limits.max_sessions {
            self.retain_active(&mut sessions);
        }
        if sessions.len() >= self.limits.max_sessions {
            tracing::warn!(max = self.limits.max_sessions, "session limit reached");
            return Err(DomainError::capacity(format!(
                "session limit of {} reached, try again later",
                self.limits.max_sessions
            )));
        }

        let session = Session::new();
        let id = session.id;
        let handle = Arc::new(Mutex::new(session));
        sessions.insert(id, handle.clone());

        tracing::debug!(session_id = %id, "session created");
        Ok((id, handle))
    }

    async fn get(&self, id: Uuid) -> Result<Option<SessionHandle>, DomainError> {
        let sessions = self
            .sessions
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        Ok(sessions.get(&id).cloned())
    }
}
