use super::{ExtractError, TextExtractor};
use epub::doc::EpubDoc;
use std::path::Path;
use tracing::debug;

const RENDER_WIDTH: usize = 80;

/// Extracts text from EPUB files by walking the spine and flattening each
/// HTML document to plain text
pub struct EpubExtractor;

impl TextExtractor for EpubExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let mut doc = EpubDoc::new(path)
            .map_err(|e| ExtractError::Epub(format!("{}: {}", path.display(), e)))?;

        let mut chapters: Vec<String> = Vec::new();
        loop {
            if let Some((content, _mime)) = doc.get_current_str() {
                let text = html2text::from_read(content.as_bytes(), RENDER_WIDTH);
                let text = text.trim();
                if !text.is_empty() {
                    chapters.push(text.to_string());
                }
            }
            if !doc.go_next() {
                break;
            }
        }

        debug!(
            "Flattened {} spine documents from {}",
            chapters.len(),
            path.display()
        );
        Ok(chapters.join("\n\n"))
    }
}
