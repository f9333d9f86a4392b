mod chat;
mod document;

pub use chat::{
    AnswerOutcome, ChatService, ChatSettings, Pipelines, UploadOutcome, DEFAULT_APOLOGY,
    PIPELINE_NOT_INITIALIZED,
};
pub use document::DocumentService;
