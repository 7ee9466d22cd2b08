use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

pub const SUMMARIES_SUBDIR: &str = "summaries";

/// The input's file name without its extension; every artifact name
/// starts with it.
pub fn document_stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}

/// `<output_root>/<stem>/`, the directory collecting every artifact
/// derived from one input document.
pub fn document_dir(output_root: &Path, input: &Path) -> PathBuf {
    output_root.join(document_stem(input))
}

pub fn save_extracted_text(text: &str, output_root: &Path, input: &Path) -> Result<PathBuf> {
    let dir = document_dir(output_root, input);
    fs::create_dir_all(&dir)
        .context(format!("Failed to create output directory: {}", dir.display()))?;

    let path = dir.join(format!("{}_extracted.txt", document_stem(input)));
    fs::write(&path, text)
        .context(format!("Failed to write extracted text: {}", path.display()))?;
    info!(path = %path.display(), "Saved extracted text");
    Ok(path)
}

/// Writes each chunk to `<stem>_chunk_NNN.txt` (1-based, zero-padded)
/// and returns the paths in chunk order.
pub fn save_chunks(chunks: &[String], output_root: &Path, input: &Path) -> Result<Vec<PathBuf>> {
    if chunks.is_empty() {
        info!("No chunks to save");
        return Ok(Vec::new());
    }

    let stem = document_stem(input);
    let dir = document_dir(output_root, input);
    fs::create_dir_all(&dir)
        .context(format!("Failed to create output directory: {}", dir.display()))?;

    let mut saved = Vec::with_capacity(chunks.len());
    for (index, chunk) in chunks.iter().enumerate() {
        let path = dir.join(format!("{}_chunk_{:03}.txt", stem, index + 1));
        fs::write(&path, chunk)
            .context(format!("Failed to write chunk file: {}", path.display()))?;
        saved.push(path);
    }

    info!(count = saved.len(), dir = %dir.display(), "Saved chunk files");
    Ok(saved)
}

pub fn save_chunk_summary(
    summary: &str,
    output_root: &Path,
    input: &Path,
    chunk_number: usize,
) -> Result<PathBuf> {
    let stem = document_stem(input);
    let dir = document_dir(output_root, input).join(SUMMARIES_SUBDIR);
    fs::create_dir_all(&dir)
        .context(format!("Failed to create summaries directory: {}", dir.display()))?;

    let path = dir.join(format!("{}_chunk_{:03}_summary.txt", stem, chunk_number));
    fs::write(&path, summary)
        .context(format!("Failed to write chunk summary: {}", path.display()))?;
    Ok(path)
}

/// Concatenates chunk summaries into one banner-delimited file.
///
/// Banner numbers follow each summary's position in `summary_paths`, so
/// a skipped chunk leaves a visible gap instead of renumbering the rest.
/// Returns `Ok(None)` when no summary had readable content.
pub fn aggregate_summaries(
    summary_paths: &[PathBuf],
    output_root: &Path,
    input: &Path,
) -> Result<Option<PathBuf>> {
    if summary_paths.is_empty() {
        info!("No chunk summaries to aggregate");
        return Ok(None);
    }

    let mut sections = Vec::with_capacity(summary_paths.len());
    for (index, path) in summary_paths.iter().enumerate() {
        let number = index + 1;
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable chunk summary");
                continue;
            }
        };
        let content = content.trim();
        if content.is_empty() {
            warn!(path = %path.display(), "Skipping empty chunk summary");
            continue;
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        sections.push(format!(
            "--- BEGIN CHUNK {number} SUMMARY ({file_name}) ---\n{content}\n--- END CHUNK {number} SUMMARY ---"
        ));
    }

    if sections.is_empty() {
        warn!("No usable chunk summaries found; skipping aggregation");
        return Ok(None);
    }

    let stem = document_stem(input);
    let dir = document_dir(output_root, input);
    fs::create_dir_all(&dir)
        .context(format!("Failed to create output directory: {}", dir.display()))?;

    let path = dir.join(format!("{stem}_aggregated_summaries.txt"));
    fs::write(&path, sections.join("\n\n"))
        .context(format!("Failed to write aggregated summaries: {}", path.display()))?;
    info!(path = %path.display(), sections = sections.len(), "Aggregated chunk summaries");
    Ok(Some(path))
}

pub fn save_final_summary(summary: &str, output_root: &Path, input: &Path) -> Result<PathBuf> {
    let stem = document_stem(input);
    let dir = document_dir(output_root, input);
    fs::create_dir_all(&dir)
        .context(format!("Failed to create output directory: {}", dir.display()))?;

    let path = dir.join(format!("{stem}_final_summary.md"));
    fs::write(&path, summary)
        .context(format!("Failed to write final summary: {}", path.display()))?;
    info!(path = %path.display(), "Saved final summary");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stems_drop_the_extension_and_directories() {
        assert_eq!(document_stem(Path::new("books/my_book.pdf")), "my_book");
        assert_eq!(document_stem(Path::new("archive.tar.epub")), "archive.tar");
    }

    #[test]
    fn extracted_text_lands_in_the_document_directory() {
        let root = tempfile::tempdir().unwrap();
        let input = Path::new("books/my_book.epub");

        let path = save_extracted_text("hello world", root.path(), input).unwrap();

        assert!(path.ends_with("my_book/my_book_extracted.txt"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello world");
    }

    #[test]
    fn chunk_files_are_numbered_from_one_and_zero_padded() {
        let root = tempfile::tempdir().unwrap();
        let input = Path::new("my_book.pdf");
        let chunks = vec!["first chunk".to_string(), "second chunk".to_string()];

        let paths = save_chunks(&chunks, root.path(), input).unwrap();

        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("my_book/my_book_chunk_001.txt"));
        assert!(paths[1].ends_with("my_book/my_book_chunk_002.txt"));
        assert_eq!(fs::read_to_string(&paths[0]).unwrap(), "first chunk");
        assert_eq!(fs::read_to_string(&paths[1]).unwrap(), "second chunk");
    }

    #[test]
    fn no_chunks_means_no_files() {
        let root = tempfile::tempdir().unwrap();
        let paths = save_chunks(&[], root.path(), Path::new("my_book.txt")).unwrap();
        assert!(paths.is_empty());
        assert!(!root.path().join("my_book").exists());
    }

    #[test]
    fn chunk_summaries_land_in_the_summaries_subdirectory() {
        let root = tempfile::tempdir().unwrap();
        let input = Path::new("my_book.txt");

        let path = save_chunk_summary("a summary", root.path(), input, 3).unwrap();

        assert!(path.ends_with("my_book/summaries/my_book_chunk_003_summary.txt"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "a summary");
    }

    #[test]
    fn aggregation_wraps_each_summary_in_banners() {
        let root = tempfile::tempdir().unwrap();
        let input = Path::new("my_book.txt");

        let first = save_chunk_summary("summary one", root.path(), input, 1).unwrap();
        let second = save_chunk_summary("summary two", root.path(), input, 2).unwrap();

        let path = aggregate_summaries(&[first, second], root.path(), input)
            .unwrap()
            .unwrap();

        assert!(path.ends_with("my_book/my_book_aggregated_summaries.txt"));
        let aggregated = fs::read_to_string(&path).unwrap();
        assert_eq!(
            aggregated,
            "--- BEGIN CHUNK 1 SUMMARY (my_book_chunk_001_summary.txt) ---\n\
             summary one\n\
             --- END CHUNK 1 SUMMARY ---\n\
             \n\
             --- BEGIN CHUNK 2 SUMMARY (my_book_chunk_002_summary.txt) ---\n\
             summary two\n\
             --- END CHUNK 2 SUMMARY ---"
        );
    }

    #[test]
    fn aggregation_skips_missing_and_empty_summaries_without_renumbering() {
        let root = tempfile::tempdir().unwrap();
        let input = Path::new("my_book.txt");

        let first = save_chunk_summary("kept", root.path(), input, 1).unwrap();
        let missing = root.path().join("my_book/summaries/my_book_chunk_002_summary.txt");
        let third = save_chunk_summary("   \n", root.path(), input, 3).unwrap();
        let fourth = save_chunk_summary("also kept", root.path(), input, 4).unwrap();

        let path = aggregate_summaries(&[first, missing, third, fourth], root.path(), input)
            .unwrap()
            .unwrap();

        let aggregated = fs::read_to_string(&path).unwrap();
        assert!(aggregated.contains("--- BEGIN CHUNK 1 SUMMARY"));
        assert!(!aggregated.contains("--- BEGIN CHUNK 2 SUMMARY"));
        assert!(!aggregated.contains("--- BEGIN CHUNK 3 SUMMARY"));
        assert!(aggregated.contains("--- BEGIN CHUNK 4 SUMMARY"));
    }

    #[test]
    fn aggregation_yields_nothing_when_every_summary_is_unusable() {
        let root = tempfile::tempdir().unwrap();
        let input = Path::new("my_book.txt");

        let empty = save_chunk_summary("", root.path(), input, 1).unwrap();
        let missing = root.path().join("my_book/summaries/my_book_chunk_002_summary.txt");

        let result = aggregate_summaries(&[empty, missing], root.path(), input).unwrap();
        assert!(result.is_none());

        let result = aggregate_summaries(&[], root.path(), input).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn final_summaries_are_markdown_files() {
        let root = tempfile::tempdir().unwrap();
        let input = Path::new("my_book.txt");

        let path = save_final_summary("# The Book\n\nIt was good.", root.path(), input).unwrap();

        assert!(path.ends_with("my_book/my_book_final_summary.md"));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# The Book\n\nIt was good."
        );
    }
}
