pub mod config;
pub mod llm;
pub mod logging;
pub mod pdf;
pub mod pipeline;
pub mod session_store;

pub use config::{AppConfig, Config, ConfigError, PromptsConfig, ProviderKind, SessionsConfig};
pub use llm::{ChatModel, HuggingFaceInference};
pub use pdf::LopdfExtractor;
pub use pipeline::build_pipelines;
pub use session_store::{InMemorySessionStore, SessionLimits};
