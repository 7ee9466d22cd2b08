use super::{ExtractError, TextExtractor};
use std::fs;
use std::path::Path;

/// Reads plain-text files as UTF-8
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        fs::read_to_string(path)
            .map_err(|e| ExtractError::Read(format!("{}: {}", path.display(), e)))
    }
}
