use lopdf::Document;

use crate::domain::{ports::TextExtractor, DomainError};

/// Page-by-page text extraction backed by lopdf.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfExtractor;

impl LopdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for LopdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<Vec<String>, DomainError> {
        let document =
            Document::load_mem(bytes).map_err(|e| DomainError::extraction(e.to_string()))?;

        let pages = document.get_pages();
        if pages.is_empty() {
            return Err(DomainError::extraction("document has no pages"));
        }

        // lopdf ends every text object with a line break; drop the one closing the page.
        pages
            .keys()
            .map(|&number| {
                document
                    .extract_text(&[number])
                    .map(|text| {
                        text.trim_end_matches(|c: char| c == '\n' || c == '\r')
                            .to_string()
                    })
                    .map_err(|e| DomainError::extraction(format!("page {number}: {e}")))
            })
            .collect()
    }
}
