use crate::domain::errors::DomainError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryParams {
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for SummaryParams {
    fn default() -> Self {
        Self {
            min_length: 30,
            max_length: 130,
        }
    }
}

/// Deterministic summarization; implementations must not sample.
#[async_trait]
pub trait SummarizationService: Send + Sync {
    async fn summarize(&self, text: &str, params: &SummaryParams) -> Result<String, DomainError>;
}
