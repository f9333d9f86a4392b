mod extractor;
mod generation;
mod session_store;
mod summarization;

pub use extractor::TextExtractor;
pub use generation::{GenerationParams, GenerationService};
pub use session_store::{SessionHandle, SessionStore};
pub use summarization::{SummarizationService, SummaryParams};
