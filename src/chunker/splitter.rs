use super::count_words;
use super::paragraph::split_paragraphs;
use super::sentence::split_sentences;

/// Split `text` into chunks of at most `word_limit` words each.
///
/// Paragraphs are packed greedily into chunks with their blank-line
/// separators kept intact. A paragraph that alone exceeds the limit degrades
/// to sentence packing, and a sentence that alone exceeds the limit degrades
/// to fixed-size groups of raw words. Every word of the input lands in
/// exactly one chunk, in source order, and no chunk ever exceeds
/// `word_limit` words.
///
/// Empty or whitespace-only input yields no chunks.
///
/// # Panics
///
/// Panics if `word_limit` is zero.
pub fn chunk_text(text: &str, word_limit: usize) -> Vec<String> {
    assert!(word_limit >= 1, "word_limit must be at least 1");

    if text.trim().is_empty() {
        return vec![];
    }

    let mut chunks = Vec::new();
    let mut batch: Vec<&str> = Vec::new();
    let mut batch_words = 0;

    for unit in split_paragraphs(text) {
        let words = count_words(unit);

        // A paragraph that alone exceeds the limit degrades separately
        if words > word_limit {
            flush_paragraphs(&mut chunks, &mut batch);
            batch_words = 0;
            split_long_paragraph(unit, word_limit, &mut chunks);
            continue;
        }

        // Flush before this paragraph would push the batch over the limit
        if batch_words + words > word_limit && !batch.is_empty() {
            flush_paragraphs(&mut chunks, &mut batch);
            batch_words = 0;
        }

        batch.push(unit);
        batch_words += words;
    }

    // Flush the remaining batch
    flush_paragraphs(&mut chunks, &mut batch);

    chunks.retain(|chunk| !chunk.is_empty());
    chunks
}

/// Join the pending paragraph units into one chunk, separators intact.
fn flush_paragraphs(chunks: &mut Vec<String>, batch: &mut Vec<&str>) {
    if batch.is_empty() {
        return;
    }
    chunks.push(batch.concat().trim().to_string());
    batch.clear();
}

/// Sentence-tier fallback for a paragraph that exceeds the word limit.
fn split_long_paragraph(paragraph: &str, word_limit: usize, chunks: &mut Vec<String>) {
    let mut parts: Vec<&str> = Vec::new();
    let mut part_words = 0;

    for sentence in split_sentences(paragraph) {
        let words = count_words(sentence);

        // An over-long sentence never enters the accumulator; a later flush
        // of it would break the word bound
        if words > word_limit {
            flush_sentences(chunks, &mut parts);
            part_words = 0;
            hard_split_words(sentence, word_limit, chunks);
            continue;
        }

        if part_words + words > word_limit && !parts.is_empty() {
            flush_sentences(chunks, &mut parts);
            part_words = 0;
        }

        parts.push(sentence);
        part_words += words;
    }

    flush_sentences(chunks, &mut parts);
}

/// Join the pending sentences with single spaces into one chunk.
fn flush_sentences(chunks: &mut Vec<String>, parts: &mut Vec<&str>) {
    if parts.is_empty() {
        return;
    }
    chunks.push(parts.join(" "));
    parts.clear();
}

/// Last-resort tier: fixed groups of `word_limit` raw words.
fn hard_split_words(sentence: &str, word_limit: usize, chunks: &mut Vec<String>) {
    let words: Vec<&str> = sentence.split_whitespace().collect();
    for group in words.chunks(word_limit) {
        chunks.push(group.join(" "));
    }
}
