use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Plain text extracted from one uploaded PDF.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub name: String,
    pub text: String,
    pub page_count: usize,
    pub created_at: DateTime<Utc>,
}

impl Document {
    pub fn new(name: impl Into<String>, text: impl Into<String>, page_count: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            text: text.into(),
            page_count,
            created_at: Utc::now(),
        }
    }

    /// Joins per-page text in page order, without separators.
    pub fn from_pages(name: impl Into<String>, pages: &[String]) -> Self {
        Self::new(name, pages.concat(), pages.len())
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummarySource {
    Model,
    FullText,
}

/// Summary cached once per document. Falls back to the full text when the model fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub text: String,
    pub source: SummarySource,
}

impl Summary {
    pub fn generated(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: SummarySource::Model,
        }
    }

    pub fn full_text(document: &Document) -> Self {
        Self {
            text: document.text.clone(),
            source: SummarySource::FullText,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.source == SummarySource::FullText
    }
}
