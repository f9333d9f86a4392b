use crate::domain::errors::DomainError;

/// Turns raw upload bytes into per-page text, in page order.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<Vec<String>, DomainError>;
}
