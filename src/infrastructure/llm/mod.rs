mod chat_model;
mod huggingface;

pub use chat_model::ChatModel;
pub use huggingface::{HuggingFaceInference, DEFAULT_HF_URL};
