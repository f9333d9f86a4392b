use async_trait::async_trait;
use rig::client::{CompletionClient, ProviderClient};
use rig::completion::Prompt;
use rig::providers::{anthropic, gemini};

use crate::domain::{
    ports::{GenerationParams, GenerationService, SummarizationService, SummaryParams},
    DomainError,
};

enum Provider {
    Anthropic(anthropic::Client),
    Gemini(gemini::Client),
}

/// Hosted chat model, usable for both summarization and answering.
pub struct ChatModel {
    provider: Provider,
    model: String,
    summarize_preamble: String,
}

impl ChatModel {
    pub fn anthropic(model: impl Into<String>) -> Result<Self, DomainError> {
        require_env("ANTHROPIC_API_KEY")?;
        Ok(Self::with_provider(
            Provider::Anthropic(anthropic::Client::from_env()),
            model,
        ))
    }

    pub fn gemini(model: impl Into<String>) -> Result<Self, DomainError> {
        require_env("GEMINI_API_KEY")?;
        Ok(Self::with_provider(
            Provider::Gemini(gemini::Client::from_env()),
            model,
        ))
    }

    fn with_provider(provider: Provider, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            summarize_preamble: "Summarize the document you are given.".to_string(),
        }
    }

    pub fn with_summarize_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.summarize_preamble = preamble.into();
        self
    }

    async fn prompt(
        &self,
        preamble: Option<&str>,
        prompt: &str,
        max_tokens: u64,
        temperature: Option<f64>,
    ) -> Result<String, DomainError> {
        match &self.provider {
            Provider::Anthropic(client) => {
                let mut builder = client.agent(&self.model).max_tokens(max_tokens);
                if let Some(preamble) = preamble {
                    builder = builder.preamble(preamble);
                }
                if let Some(temperature) = temperature {
                    builder = builder.temperature(temperature);
                }
                let agent = builder.build();
                agent
                    .prompt(prompt.to_string())
                    .await
                    .map_err(|e| DomainError::external(e.to_string()))
            }
            Provider::Gemini(client) => {
                let mut builder = client.agent(&self.model).max_tokens(max_tokens);
                if let Some(preamble) = preamble {
                    builder = builder.preamble(preamble);
                }
                if let Some(temperature) = temperature {
                    builder = builder.temperature(temperature);
                }
                let agent = builder.build();
                agent
                    .prompt(prompt.to_string())
                    .await
                    .map_err(|e| DomainError::external(e.to_string()))
            }
        }
    }
}

#[async_trait]
impl SummarizationService for ChatModel {
    async fn summarize(&self, text: &str, params: &SummaryParams) -> Result<String, DomainError> {
        let preamble = render_summarize_preamble(&self.summarize_preamble, params);
        let summary = self
            .prompt(Some(&preamble), text, params.max_length as u64, Some(0.0))
            .await?;
        Ok(summary.trim().to_string())
    }
}

#[async_trait]
impl GenerationService for ChatModel {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, DomainError> {
        // Sampling keeps the provider's default temperature.
        let temperature = (!params.sample).then_some(0.0);
        let answer = self
            .prompt(None, prompt, params.max_length as u64, temperature)
            .await?;
        Ok(answer.trim().to_string())
    }
}

fn render_summarize_preamble(template: &str, params: &SummaryParams) -> String {
    template
        .replace("{min_length}", &params.min_length.to_string())
        .replace("{max_length}", &params.max_length.to_string())
}

fn require_env(key: &str) -> Result<(), DomainError> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(()),
        _ => Err(DomainError::validation(format!("{key} is not set"))),
    }
}
