mod paragraph;
mod sentence;
mod splitter;


pub use splitter::chunk_text;

/// Maximum words per chunk when no explicit limit is given
pub const DEFAULT_WORD_LIMIT: usize = 10_000;

/// Count the words of `text`: maximal runs of non-whitespace characters.
///
/// Empty and whitespace-only input count zero. Every size comparison in the
/// chunker uses this definition, so the chunk bound is reproducible across
/// runs and platforms.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}
