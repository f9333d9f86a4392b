mod conversation;
mod document;
mod session;

pub use conversation::{ConversationHistory, Role, Turn};
pub use document::{Document, Summary, SummarySource};
pub use session::{Session, SessionState};
