//! folio turns a book-length document into a hierarchical summary.
//!
//! The core is the word-bounded chunker in [`chunker`]: it splits extracted
//! text into chunks that respect a maximum word count while preserving
//! paragraph structure, degrading to sentence packing and then raw word
//! groups when a single structural unit exceeds the limit. Around it sit the
//! per-format text extractors, the OpenAI-compatible summarization client,
//! the output file layout, and the pipeline that drives all of them.

pub mod chunker;
pub mod extract;
pub mod pipeline;
pub mod storage;
pub mod summarizer;

pub use chunker::{chunk_text, count_words, DEFAULT_WORD_LIMIT};
pub use extract::{ExtractError, ExtractorRegistry, TextExtractor};
pub use pipeline::{PipelineConfig, PipelineReport};
pub use summarizer::{SummarizeError, SummaryClient};
