mod epub;
mod pdf;
mod plain;
mod registry;


pub use epub::EpubExtractor;
pub use pdf::PdfExtractor;
pub use plain::PlainTextExtractor;
pub use registry::ExtractorRegistry;

use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Unsupported file type: {0:?}")]
    UnsupportedType(String),

    #[error("Failed to read file: {0}")]
    Read(String),

    #[error("Failed to extract PDF text: {0}")]
    Pdf(String),

    #[error("Failed to extract EPUB text: {0}")]
    Epub(String),
}

/// Core trait that all file-type extractors must implement
pub trait TextExtractor: Send + Sync {
    /// Extract the full text content of the file at `path`
    ///
    /// # Returns
    /// The raw extracted text; whitespace and page/chapter joins are the
    /// extractor's choice, cleanup belongs to the pipeline
    fn extract(&self, path: &Path) -> Result<String, ExtractError>;
}
