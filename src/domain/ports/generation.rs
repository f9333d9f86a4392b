use crate::domain::errors::DomainError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub max_length: usize,
    pub sample: bool,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_length: 200,
            sample: true,
        }
    }
}

#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate(&self, prompt: &str, params: &GenerationParams)
        -> Result<String, DomainError>;
}
