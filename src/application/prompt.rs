use crate::domain::ConversationHistory;

pub const DEFAULT_TEMPLATE: &str = "You are a chatbot assisting users with questions about a document.
Here is the document summary: {summary}
Here is the conversation history: {history}
Answer the user's question concisely, using the information from the document and conversation history only. If the answer is not in the document, respond with \"I am sorry, I cannot answer the question based on the document.\".
User question: {question}
";

/// Prompt with `{summary}`, `{history}` and `{question}` placeholders.
///
/// Substitution is single-pass, so placeholder-like text inside a summary or question is
/// left untouched.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }

    pub fn render(&self, summary: &str, history: &ConversationHistory, question: &str) -> String {
        let history = history.render();
        let mut out = String::with_capacity(
            self.template.len() + summary.len() + history.len() + question.len(),
        );
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];
            let (value, len) = if tail.starts_with("{summary}") {
                (summary, "{summary}".len())
            } else if tail.starts_with("{history}") {
                (history.as_str(), "{history}".len())
            } else if tail.starts_with("{question}") {
                (question, "{question}".len())
            } else {
                ("{", 1)
            };
            out.push_str(value);
            rest = &tail[len..];
        }
        out.push_str(rest);
        out
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}
