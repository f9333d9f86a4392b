//! Hugging Face Inference API adapter.
//!
//! One instance is bound to one hosted model. Summarization and text generation share the
//! same endpoint shape (`POST {base_url}/models/{model}`) and differ only in parameters and
//! the field carrying the output.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use crate::domain::{
    ports::{GenerationParams, GenerationService, SummarizationService, SummaryParams},
    DomainError,
};

pub const DEFAULT_HF_URL: &str = "https://router.huggingface.co/hf-inference";

pub struct HuggingFaceInference {
    http: Client,
    base_url: String,
    model: String,
    api_token: Option<String>,
}

impl HuggingFaceInference {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_token: Option<String>,
    ) -> Result<Self, DomainError> {
        let http = Client::builder()
            .user_agent(concat!("pdf-chat/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DomainError::internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            model: model.into(),
            api_token,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}", self.base_url.trim_end_matches('/'), self.model)
    }

    async fn infer<T: DeserializeOwned>(
        &self,
        payload: serde_json::Value,
    ) -> Result<Vec<T>, DomainError> {
        let mut request = self.http.post(self.endpoint()).json(&payload);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            DomainError::external(format!("failed to reach {}: {e}", self.base_url))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::external(format!(
                "{} returned {status}: {body}",
                self.model
            )));
        }

        response
            .json()
            .await
            .map_err(|e| {
                DomainError::external(format!("malformed response from {}: {e}", self.model))
            })
    }
}

#[derive(Debug, Deserialize)]
struct SummaryOutput {
    summary_text: String,
}

#[derive(Debug, Deserialize)]
struct GeneratedOutput {
    generated_text: String,
}

#[async_trait]
impl SummarizationService for HuggingFaceInference {
    async fn summarize(&self, text: &str, params: &SummaryParams) -> Result<String, DomainError> {
        let outputs: Vec<SummaryOutput> = self
            .infer(json!({
                "inputs": text,
                "parameters": {
                    "min_length": params.min_length,
                    "max_length": params.max_length,
                    "do_sample": false,
                }
            }))
            .await?;

        outputs
            .into_iter()
            .next()
            .map(|o| o.summary_text.trim().to_string())
            .ok_or_else(|| DomainError::external(format!("{} returned no summary", self.model)))
    }
}

#[async_trait]
impl GenerationService for HuggingFaceInference {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, DomainError> {
        let outputs: Vec<GeneratedOutput> = self
            .infer(json!({
                "inputs": prompt,
                "parameters": {
                    "max_new_tokens": params.max_length,
                    "do_sample": params.sample,
                    "return_full_text": false,
                }
            }))
            .await?;

        outputs
            .into_iter()
            .next()
            .map(|o| o.generated_text.trim().to_string())
            .ok_or_else(|| DomainError::external(format!("{} returned no text", self.model)))
    }
}
