use std::sync::Arc;

use crate::application::Pipelines;
use crate::domain::{
    ports::{GenerationService, SummarizationService},
    DomainError,
};
use crate::infrastructure::config::{AppConfig, ProviderKind};
use crate::infrastructure::llm::{ChatModel, HuggingFaceInference};

/// Builds both inference adapters once; they are shared by every session.
pub fn build_pipelines(app: &AppConfig) -> Result<Pipelines, DomainError> {
    let config = &app.config;

    let summarization = &config.summarization;
    require_model("summarization", &summarization.model)?;
    let summarizer: Arc<dyn SummarizationService> = match summarization.provider {
        ProviderKind::HuggingFace => Arc::new(HuggingFaceInference::new(
            &summarization.base_url,
            &summarization.model,
            config.hf_api_token.clone(),
        )?),
        ProviderKind::Anthropic => Arc::new(
            ChatModel::anthropic(&summarization.model)?
                .with_summarize_preamble(&app.prompts.chat.summarize),
        ),
        ProviderKind::Gemini => Arc::new(
            ChatModel::gemini(&summarization.model)?
                .with_summarize_preamble(&app.prompts.chat.summarize),
        ),
    };

    let generation = &config.generation;
    require_model("generation", &generation.model)?;
    let generator: Arc<dyn GenerationService> = match generation.provider {
        ProviderKind::HuggingFace => Arc::new(HuggingFaceInference::new(
            &generation.base_url,
            &generation.model,
            config.hf_api_token.clone(),
        )?),
        ProviderKind::Anthropic => Arc::new(ChatModel::anthropic(&generation.model)?),
        ProviderKind::Gemini => Arc::new(ChatModel::gemini(&generation.model)?),
    };

    tracing::info!(
        summarization_provider = ?summarization.provider,
        summarization_model = %summarization.model,
        generation_provider = ?generation.provider,
        generation_model = %generation.model,
        "inference pipelines initialized"
    );

    Ok(Pipelines::new(summarizer, generator))
}

fn require_model(stage: &str, model: &str) -> Result<(), DomainError> {
    if model.trim().is_empty() {
        return Err(DomainError::validation(format!(
            "{stage} model is not configured"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_builds_hugging_face_pipelines() {
        assert!(build_pipelines(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_blank_model_fails_initialization() {
        let mut app = AppConfig::default();
        app.config.generation.model = "  ".to_string();

        let err = build_pipelines(&app).err().expect("blank model");
        assert!(matches!(err, DomainError::Validation(ref msg) if msg.contains("generation")));
    }
}
