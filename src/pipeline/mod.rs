mod cleanup;

pub use cleanup::strip_gutenberg_trailer;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};

use crate::chunker::{chunk_text, DEFAULT_WORD_LIMIT};
use crate::extract::ExtractorRegistry;
use crate::storage;
use crate::summarizer::{SummaryClient, CHUNK_SUMMARY_PROMPT, FINAL_SUMMARY_PROMPT};

pub const DEFAULT_OUTPUT_ROOT: &str = "output";
pub const DEFAULT_CHUNK_MODEL: &str = "gpt-4.1-mini";
pub const DEFAULT_FINAL_MODEL: &str = "gpt-4.1-mini";
pub const DEFAULT_CHUNK_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_FINAL_MAX_TOKENS: u32 = 4000;

pub struct PipelineConfig {
    pub output_root: PathBuf,
    pub word_limit: usize,
    pub chunk_model: String,
    pub final_model: String,
    pub chunk_max_tokens: u32,
    pub final_max_tokens: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            word_limit: DEFAULT_WORD_LIMIT,
            chunk_model: DEFAULT_CHUNK_MODEL.to_string(),
            final_model: DEFAULT_FINAL_MODEL.to_string(),
            chunk_max_tokens: DEFAULT_CHUNK_MAX_TOKENS,
            final_max_tokens: DEFAULT_FINAL_MAX_TOKENS,
        }
    }
}

/// Paths of everything the pipeline wrote, in stage order. Stages that
/// were skipped leave their slot empty.
#[derive(Debug, Default)]
pub struct PipelineReport {
    pub extracted_path: Option<PathBuf>,
    pub chunk_paths: Vec<PathBuf>,
    pub summary_paths: Vec<PathBuf>,
    pub aggregate_path: Option<PathBuf>,
    pub final_summary_path: Option<PathBuf>,
}

/// Runs the full pipeline: extract, clean, chunk, summarize each chunk,
/// aggregate, and synthesize a final summary.
///
/// Without a client the pipeline stops after writing the chunk files. A
/// fatal summarization error stops submitting chunks but still
/// aggregates whatever summaries were produced.
pub fn run(
    input: &Path,
    client: Option<&SummaryClient>,
    config: &PipelineConfig,
) -> Result<PipelineReport> {
    let mut report = PipelineReport::default();

    let registry = ExtractorRegistry::with_defaults();
    info!(input = %input.display(), "Extracting text");
    let raw_text = registry
        .extract(input)
        .context(format!("Failed to extract text from {}", input.display()))?;

    if raw_text.trim().is_empty() {
        warn!(input = %input.display(), "No text extracted; nothing to process");
        return Ok(report);
    }

    let text = strip_gutenberg_trailer(&raw_text);
    if text.len() < raw_text.len() {
        info!(
            removed_chars = raw_text.len() - text.len(),
            "Removed Project Gutenberg trailer"
        );
    }
    if text.trim().is_empty() {
        warn!(input = %input.display(), "Text became empty after cleanup; nothing to process");
        return Ok(report);
    }
    info!(chars = text.len(), "Text ready for chunking");

    report.extracted_path = Some(storage::save_extracted_text(
        text,
        &config.output_root,
        input,
    )?);

    let chunks = chunk_text(text, config.word_limit);
    info!(
        chunks = chunks.len(),
        word_limit = config.word_limit,
        "Chunked text"
    );

    report.chunk_paths = storage::save_chunks(&chunks, &config.output_root, input)?;

    let Some(client) = client else {
        warn!("No API key configured; skipping summarization");
        return Ok(report);
    };

    report.summary_paths = summarize_chunks(client, &report.chunk_paths, input, config);

    report.aggregate_path =
        match storage::aggregate_summaries(&report.summary_paths, &config.output_root, input) {
            Ok(path) => path,
            Err(e) => {
                error!(error = %e, "Failed to aggregate chunk summaries");
                None
            }
        };

    if let Some(aggregate_path) = report.aggregate_path.clone() {
        report.final_summary_path = final_summary(client, &aggregate_path, input, config);
    }

    Ok(report)
}

/// Extraction-only entry point. Returns `Ok(None)` when the document
/// yields no text, matching how `run` treats an empty extraction.
pub fn extract_to_file(input: &Path, output_root: &Path) -> Result<Option<PathBuf>> {
    let registry = ExtractorRegistry::with_defaults();
    let raw_text = registry
        .extract(input)
        .context(format!("Failed to extract text from {}", input.display()))?;

    let text = strip_gutenberg_trailer(&raw_text);
    if text.trim().is_empty() {
        warn!(input = %input.display(), "No text extracted; nothing to save");
        return Ok(None);
    }

    storage::save_extracted_text(text, output_root, input).map(Some)
}

fn summarize_chunks(
    client: &SummaryClient,
    chunk_paths: &[PathBuf],
    input: &Path,
    config: &PipelineConfig,
) -> Vec<PathBuf> {
    if chunk_paths.is_empty() {
        return Vec::new();
    }
    info!(
        chunks = chunk_paths.len(),
        model = %config.chunk_model,
        "Summarizing chunks; this may take a while"
    );

    let mut summary_paths = Vec::new();
    for (index, chunk_path) in chunk_paths.iter().enumerate() {
        let number = index + 1;
        let chunk = match fs::read_to_string(chunk_path) {
            Ok(chunk) => chunk,
            Err(e) => {
                warn!(path = %chunk_path.display(), error = %e, "Skipping unreadable chunk");
                continue;
            }
        };
        if chunk.trim().is_empty() {
            warn!(chunk = number, "Skipping empty chunk");
            continue;
        }

        debug!(chunk = number, total = chunk_paths.len(), "Submitting chunk");
        let summary = match client.summarize(
            &chunk,
            CHUNK_SUMMARY_PROMPT,
            &config.chunk_model,
            config.chunk_max_tokens,
        ) {
            Ok(summary) => summary,
            Err(e) if e.is_fatal() => {
                error!(chunk = number, error = %e, "Stopping chunk summarization");
                break;
            }
            Err(e) => {
                warn!(chunk = number, error = %e, "Skipping chunk after API error");
                continue;
            }
        };

        if summary.is_empty() {
            warn!(chunk = number, "Model returned an empty summary; skipping");
            continue;
        }

        match storage::save_chunk_summary(&summary, &config.output_root, input, number) {
            Ok(path) => summary_paths.push(path),
            Err(e) => warn!(chunk = number, error = %e, "Failed to save chunk summary"),
        }
    }

    info!(saved = summary_paths.len(), "Chunk summarization finished");
    summary_paths
}

fn final_summary(
    client: &SummaryClient,
    aggregate_path: &Path,
    input: &Path,
    config: &PipelineConfig,
) -> Option<PathBuf> {
    let aggregated = match fs::read_to_string(aggregate_path) {
        Ok(aggregated) => aggregated,
        Err(e) => {
            error!(path = %aggregate_path.display(), error = %e, "Failed to read aggregated summaries");
            return None;
        }
    };
    if aggregated.trim().is_empty() {
        warn!("Aggregated summaries are empty; skipping final synthesis");
        return None;
    }

    info!(model = %config.final_model, "Synthesizing the final summary");
    let summary = match client.summarize(
        &aggregated,
        FINAL_SUMMARY_PROMPT,
        &config.final_model,
        config.final_max_tokens,
    ) {
        Ok(summary) => summary,
        Err(e) => {
            error!(error = %e, "Final synthesis failed");
            return None;
        }
    };

    if summary.is_empty() {
        warn!("Model returned an empty final summary; nothing to save");
        return None;
    }

    match storage::save_final_summary(&summary, &config.output_root, input) {
        Ok(path) => Some(path),
        Err(e) => {
            error!(error = %e, "Failed to save final summary");
            None
        }
    }
}
