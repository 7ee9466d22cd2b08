use super::{EpubExtractor, ExtractError, PdfExtractor, PlainTextExtractor, TextExtractor};
use std::collections::HashMap;
use std::path::Path;

/// Dynamic dispatch table for file type extractors
pub struct ExtractorRegistry {
    /// Extension -> extractor mapping
    map: HashMap<String, Box<dyn TextExtractor>>,
}

impl ExtractorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Create a registry with the built-in extractors: txt, pdf, epub
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("txt", PlainTextExtractor);
        registry.register("pdf", PdfExtractor);
        registry.register("epub", EpubExtractor);
        registry
    }

    /// Register an extractor for a specific file extension
    ///
    /// # Arguments
    /// * `extension` - File extension without dot (e.g., "txt", "pdf")
    /// * `extractor` - Extractor implementation
    pub fn register(
        &mut self,
        extension: impl Into<String>,
        extractor: impl TextExtractor + 'static,
    ) {
        self.map
            .insert(extension.into().to_lowercase(), Box::new(extractor));
    }

    /// Select the extractor responsible for `path`.
    ///
    /// The file must exist and its extension must be registered; an unknown
    /// extension is an error, not a fallback.
    pub fn select(&self, path: &Path) -> Result<&dyn TextExtractor, ExtractError> {
        if !path.exists() {
            return Err(ExtractError::NotFound(path.display().to_string()));
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        self.map
            .get(&ext)
            .map(|e| &**e)
            .ok_or(ExtractError::UnsupportedType(ext))
    }

    /// Extract text from `path` using the registered extractor
    pub fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        self.select(path)?.extract(path)
    }

    /// List all registered extensions
    pub fn registered_extensions(&self) -> Vec<&str> {
        self.map.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
