use super::{ExtractError, TextExtractor};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Extracts the text layer of PDF files
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let bytes = fs::read(path)
            .map_err(|e| ExtractError::Read(format!("{}: {}", path.display(), e)))?;

        let text = pdf_extract::extract_text_from_mem(&bytes)
            .map_err(|e| ExtractError::Pdf(format!("{}: {}", path.display(), e)))?;

        debug!("Extracted {} characters from {}", text.len(), path.display());
        Ok(text)
    }
}
