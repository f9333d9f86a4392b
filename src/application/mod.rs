//! Application layer - Use cases and orchestration.
//!
//! This module contains application services that orchestrate domain logic
//! and infrastructure. Services depend on domain ports (traits) rather than
//! concrete implementations.

pub mod prompt;
pub mod services;

pub use prompt::PromptTemplate;
pub use services::{
    AnswerOutcome, ChatService, ChatSettings, DocumentService, Pipelines, UploadOutcome,
};
