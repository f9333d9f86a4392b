use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::application::prompt::DEFAULT_TEMPLATE;
use crate::application::services::DEFAULT_APOLOGY;
use crate::application::{ChatSettings, PromptTemplate};
use crate::domain::ports::{GenerationParams, SummaryParams};
use crate::infrastructure::llm::DEFAULT_HF_URL;
use crate::infrastructure::session_store::SessionLimits;

const DEFAULT_CONFIG_PATH: &str = "config/app.yaml";
const DEFAULT_PROMPTS_PATH: &str = "config/prompts.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },

    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

/// Service settings plus prompt texts, each loaded from its own YAML file.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub config: Config,
    pub prompts: PromptsConfig,
}

impl AppConfig {
    /// Reads `config/app.yaml` and `config/prompts.yaml` (or the paths in `APP_CONFIG_PATH`
    /// and `PROMPTS_CONFIG_PATH`), then applies environment overrides. Missing files mean
    /// built-in defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("APP_CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        let prompts_path =
            std::env::var("PROMPTS_CONFIG_PATH").unwrap_or_else(|_| DEFAULT_PROMPTS_PATH.into());

        let mut config: Config = read_yaml_or_default(&config_path)?;
        let prompts: PromptsConfig = read_yaml_or_default(&prompts_path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;

        Ok(Self { config, prompts })
    }

    pub fn from_yaml(config: &str, prompts: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            config: parse_yaml(config, "<inline config>")?,
            prompts: parse_yaml(prompts, "<inline prompts>")?,
        })
    }

    pub fn chat_settings(&self) -> ChatSettings {
        ChatSettings {
            summary: SummaryParams {
                min_length: self.config.summarization.min_length,
                max_length: self.config.summarization.max_length,
            },
            generation: GenerationParams {
                max_length: self.config.generation.max_length,
                sample: self.config.generation.sample,
            },
            prompt: PromptTemplate::new(&self.prompts.chat.template),
            apology: self.prompts.chat.apology.clone(),
        }
    }
}

fn read_yaml_or_default<T>(path: &str) -> Result<T, ConfigError>
where
    T: for<'de> Deserialize<'de> + Default,
{
    if !Path::new(path).exists() {
        return Ok(T::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_string(),
        source,
    })?;
    parse_yaml(&contents, path)
}

fn parse_yaml<T>(contents: &str, path: &str) -> Result<T, ConfigError>
where
    T: for<'de> Deserialize<'de> + Default,
{
    if contents.trim().is_empty() {
        return Ok(T::default());
    }

    serde_yaml::from_str(contents).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub sessions: SessionsConfig,
    pub logging: LoggingConfig,
    pub summarization: SummarizationConfig,
    pub generation: GenerationConfig,
    /// Bearer token for the Hugging Face Inference API. Only read from `HF_API_TOKEN`.
    #[serde(skip)]
    pub hf_api_token: Option<String>,
}

impl Config {
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".into()))?;
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            self.logging.format = match format.to_lowercase().as_str() {
                "json" => LogFormat::Json,
                "pretty" => LogFormat::Pretty,
                _ => return Err(ConfigError::InvalidValue("LOG_FORMAT".into())),
            };
        }
        if let Some(token) = lookup("HF_API_TOKEN") {
            self.hf_api_token = Some(token);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_upload_bytes: 20 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
        }
    }
}

/// Bounds on the in-memory session store.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionsConfig {
    pub max_sessions: usize,
    pub idle_ttl_secs: u64,
    pub sweep_interval_secs: u64,
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            max_sessions: 1000,
            idle_ttl_secs: 60 * 60,
            sweep_interval_secs: 60,
        }
    }
}

impl SessionsConfig {
    pub fn limits(&self) -> SessionLimits {
        SessionLimits {
            max_sessions: self.max_sessions,
            idle_ttl: Duration::from_secs(self.idle_ttl_secs),
        }
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    HuggingFace,
    Anthropic,
    Gemini,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SummarizationConfig {
    pub provider: ProviderKind,
    pub model: String,
    pub base_url: String,
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for SummarizationConfig {
    fn default() -> Self {
        let params = SummaryParams::default();
        Self {
            provider: ProviderKind::HuggingFace,
            model: "facebook/bart-large-cnn".to_string(),
            base_url: DEFAULT_HF_URL.to_string(),
            min_length: params.min_length,
            max_length: params.max_length,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub provider: ProviderKind,
    pub model: String,
    pub base_url: String,
    pub max_length: usize,
    pub sample: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        let params = GenerationParams::default();
        Self {
            provider: ProviderKind::HuggingFace,
            model: "google/flan-t5-base".to_string(),
            base_url: DEFAULT_HF_URL.to_string(),
            max_length: params.max_length,
            sample: params.sample,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PromptsConfig {
    pub chat: ChatPromptsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChatPromptsConfig {
    pub template: String,
    pub apology: String,
    /// Preamble for chat models used as summarizers; `{min_length}` and `{max_length}`
    /// are filled from the summarization settings.
    pub summarize: String,
}

impl Default for ChatPromptsConfig {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            apology: DEFAULT_APOLOGY.to_string(),
            summarize: "Summarize the document you are given in {min_length} to {max_length} \
                        words. Reply with the summary only."
                .to_string(),
        }
    }
}
