use std::sync::Arc;
use tracing::instrument;

use crate::domain::{ports::TextExtractor, Document, DomainError};

const PDF_CONTENT_TYPE: &str = "application/pdf";

pub struct DocumentService {
    extractor: Arc<dyn TextExtractor>,
}

impl DocumentService {
    pub fn new(extractor: Arc<dyn TextExtractor>) -> Self {
        Self { extractor }
    }

    /// Rejects uploads that are neither labelled as PDF nor named `*.pdf`.
    pub fn ensure_pdf(
        content_type: Option<&str>,
        file_name: Option<&str>,
    ) -> Result<(), DomainError> {
        let typed_pdf = content_type
            .map(|ct| ct.eq_ignore_ascii_case(PDF_CONTENT_TYPE))
            .unwrap_or(false);
        let named_pdf = file_name
            .map(|name| name.to_ascii_lowercase().ends_with(".pdf"))
            .unwrap_or(false);

        if typed_pdf || named_pdf {
            Ok(())
        } else {
            Err(DomainError::validation("only PDF documents are supported"))
        }
    }

    /// Extracts text on the blocking pool. A parser panic is reported as an extraction
    /// failure rather than propagated.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn extract(&self, name: &str, bytes: Vec<u8>) -> Result<Document, DomainError> {
        if bytes.is_empty() {
            return Err(DomainError::extraction("uploaded file is empty"));
        }

        let extractor = self.extractor.clone();
        let pages = tokio::task::spawn_blocking(move || extractor.extract(&bytes))
            .await
            .map_err(|e| DomainError::extraction(format!("PDF parser aborted: {e}")))??;

        let document = Document::from_pages(name, &pages);
        if !document.has_text() {
            return Err(DomainError::extraction("no extractable text found"));
        }

        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PagesExtractor(Vec<&'static str>);

    impl TextExtractor for PagesExtractor {
        fn extract(&self, _bytes: &[u8]) -> Result<Vec<String>, DomainError> {
            Ok(self.0.iter().map(|p| p.to_string()).collect())
        }
    }

    struct PanickingExtractor;

    impl TextExtractor for PanickingExtractor {
        fn extract(&self, _bytes: &[u8]) -> Result<Vec<String>, DomainError> {
            panic!("malformed xref");
        }
    }

    #[tokio::test]
    async fn test_extract_concatenates_pages() {
        let service = DocumentService::new(Arc::new(PagesExtractor(vec!["A", "B"])));
        let doc = service.extract("two.pdf", b"%PDF".to_vec()).await.unwrap();

        assert_eq!(doc.text, "AB");
        assert_eq!(doc.page_count, 2);
        assert_eq!(doc.name, "two.pdf");
    }

    #[tokio::test]
    async fn test_extract_rejects_empty_upload() {
        let service = DocumentService::new(Arc::new(PagesExtractor(vec!["A"])));
        let err = service.extract("empty.pdf", Vec::new()).await.unwrap_err();

        assert!(matches!(err, DomainError::Extraction(_)));
    }

    #[tokio::test]
    async fn test_extract_rejects_blank_text() {
        let service = DocumentService::new(Arc::new(PagesExtractor(vec!["", " "])));
        let err = service.extract("scan.pdf", b"%PDF".to_vec()).await.unwrap_err();

        assert!(matches!(err, DomainError::Extraction(_)));
    }

    #[tokio::test]
    async fn test_extract_contains_parser_panic() {
        let service = DocumentService::new(Arc::new(PanickingExtractor));
        let err = service.extract("bad.pdf", b"junk".to_vec()).await.unwrap_err();

        assert!(matches!(err, DomainError::Extraction(_)));
    }

    #[test]
    fn test_ensure_pdf() {
        assert!(DocumentService::ensure_pdf(Some("application/pdf"), None).is_ok());
        assert!(DocumentService::ensure_pdf(None, Some("Report.PDF")).is_ok());
        assert!(DocumentService::ensure_pdf(Some("text/plain"), Some("notes.txt")).is_err());
        assert!(DocumentService::ensure_pdf(None, None).is_err());
    }
}
