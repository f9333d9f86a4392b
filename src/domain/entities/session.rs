use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{ConversationHistory, Document, Summary, Turn};
use crate::domain::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    NoDocument,
    DocumentLoaded,
    Ready,
}

/// Per-user state: the current document, its cached summary and the conversation log.
///
/// The history is never cleared; uploading a new file only replaces the document and drops
/// its summary.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    state: SessionState,
    document: Option<Document>,
    summary: Option<Summary>,
    history: ConversationHistory,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            state: SessionState::NoDocument,
            document: None,
            summary: None,
            history: ConversationHistory::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn load_document(&mut self, document: Document) {
        self.document = Some(document);
        self.summary = None;
        self.state = SessionState::DocumentLoaded;
        self.touch();
    }

    pub fn clear_document(&mut self) {
        self.document = None;
        self.summary = None;
        self.state = SessionState::NoDocument;
        self.touch();
    }

    pub fn mark_ready(&mut self) -> Result<(), DomainError> {
        if self.document.is_none() {
            return Err(DomainError::invalid_state("no document loaded"));
        }
        self.state = SessionState::Ready;
        self.touch();
        Ok(())
    }

    pub fn cache_summary(&mut self, summary: Summary) {
        self.summary = Some(summary);
    }

    /// Records a question together with its answer, so the history only ever grows by
    /// complete user/assistant pairs.
    pub fn record_exchange(&mut self, question: Turn, answer: Turn) {
        self.history.append(question);
        self.history.append(answer);
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
