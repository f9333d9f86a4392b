use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::application::prompt::PromptTemplate;
use crate::application::services::DocumentService;
use crate::domain::{
    ports::{GenerationParams, GenerationService, SummarizationService, SummaryParams},
    DomainError, Session, SessionState, Summary, Turn,
};

pub const PIPELINE_NOT_INITIALIZED: &str =
    "Summarization pipeline not initialized. Check configuration.";

pub const DEFAULT_APOLOGY: &str = "I encountered an error processing your question.";

/// The two inference capabilities a session needs once a document is loaded.
#[derive(Clone)]
pub struct Pipelines {
    pub summarizer: Arc<dyn SummarizationService>,
    pub generator: Arc<dyn GenerationService>,
}

impl Pipelines {
    pub fn new(
        summarizer: Arc<dyn SummarizationService>,
        generator: Arc<dyn GenerationService>,
    ) -> Self {
        Self {
            summarizer,
            generator,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub summary: SummaryParams,
    pub generation: GenerationParams,
    pub prompt: PromptTemplate,
    pub apology: String,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            summary: SummaryParams::default(),
            generation: GenerationParams::default(),
            prompt: PromptTemplate::default(),
            apology: DEFAULT_APOLOGY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadOutcome {
    pub document_id: Uuid,
    pub name: String,
    pub page_count: usize,
    pub char_count: usize,
    pub state: SessionState,
    pub notices: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerOutcome {
    pub answer: String,
    pub summary_degraded: bool,
    pub answer_degraded: bool,
    pub notices: Vec<String>,
    pub history: Vec<Turn>,
}

/// Drives a session through upload and question turns.
///
/// Inference failures never abort a turn: a failed summary falls back to the full document
/// text and a failed generation is replaced by the configured apology.
pub struct ChatService {
    documents: DocumentService,
    pipelines: Option<Pipelines>,
    settings: ChatSettings,
}

impl ChatService {
    pub fn new(
        documents: DocumentService,
        pipelines: Option<Pipelines>,
        settings: ChatSettings,
    ) -> Self {
        Self {
            documents,
            pipelines,
            settings,
        }
    }

    pub fn pipelines_ready(&self) -> bool {
        self.pipelines.is_some()
    }

    #[instrument(skip(self, session, bytes), fields(session_id = %session.id, size = bytes.len()))]
    pub async fn upload(
        &self,
        session: &mut Session,
        name: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadOutcome, DomainError> {
        let document = match self.documents.extract(name, bytes).await {
            Ok(document) => document,
            Err(e) => {
                warn!(error = %e, "extraction failed");
                session.clear_document();
                return Err(e);
            }
        };

        info!(
            document_id = %document.id,
            pages = document.page_count,
            chars = document.char_count(),
            "document loaded"
        );

        let mut outcome = UploadOutcome {
            document_id: document.id,
            name: document.name.clone(),
            page_count: document.page_count,
            char_count: document.char_count(),
            state: SessionState::DocumentLoaded,
            notices: Vec::new(),
        };

        session.load_document(document);
        if self.pipelines.is_some() {
            session.mark_ready()?;
        } else {
            outcome.notices.push(PIPELINE_NOT_INITIALIZED.to_string());
        }
        outcome.state = session.state();

        Ok(outcome)
    }

    #[instrument(skip(self, session, question), fields(session_id = %session.id))]
    pub async fn ask(
        &self,
        session: &mut Session,
        question: &str,
    ) -> Result<AnswerOutcome, DomainError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(DomainError::validation("question must not be empty"));
        }

        let pipelines = match (session.state(), &self.pipelines) {
            (SessionState::Ready, Some(pipelines)) => pipelines,
            (SessionState::NoDocument, _) => {
                return Err(DomainError::invalid_state(
                    "upload a PDF document before asking questions",
                ))
            }
            _ => return Err(DomainError::invalid_state(PIPELINE_NOT_INITIALIZED)),
        };

        let mut notices = Vec::new();
        let summary = self.summary_for(session, pipelines, &mut notices).await?;

        // Nothing is recorded until generation returns; an abandoned turn leaves no trace.
        let user_turn = Turn::user(question);
        let mut pending = session.history().clone();
        pending.append(user_turn.clone());
        let prompt = self
            .settings
            .prompt
            .render(&summary.text, &pending, question);

        let (answer, answer_degraded) = match pipelines
            .generator
            .generate(&prompt, &self.settings.generation)
            .await
        {
            Ok(answer) => (answer, false),
            Err(e) => {
                warn!(error = %e, "generation failed, answering with apology");
                notices.push(format!("Error during question answering: {e}"));
                (self.settings.apology.clone(), true)
            }
        };

        session.record_exchange(user_turn, Turn::assistant(answer.clone()));
        info!(turns = session.history().len(), "turn completed");

        Ok(AnswerOutcome {
            answer,
            summary_degraded: summary.is_degraded(),
            answer_degraded,
            notices,
            history: session.history().all().to_vec(),
        })
    }

    async fn summary_for(
        &self,
        session: &mut Session,
        pipelines: &Pipelines,
        notices: &mut Vec<String>,
    ) -> Result<Summary, DomainError> {
        if let Some(summary) = session.summary() {
            return Ok(summary.clone());
        }

        let document = session
            .document()
            .ok_or_else(|| DomainError::invalid_state("no document loaded"))?;

        let summary = match pipelines
            .summarizer
            .summarize(&document.text, &self.settings.summary)
            .await
        {
            Ok(text) => Summary::generated(text),
            Err(e) => {
                warn!(error = %e, "summarization failed, using full text");
                notices.push(format!("Error during summarization: {e}"));
                Summary::full_text(document)
            }
        };

        session.cache_summary(summary.clone());
        Ok(summary)
    }
}
