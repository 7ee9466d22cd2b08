/// Sentence-terminating punctuation.
fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '?' | '!')
}

/// Word characters as the abbreviation guards see them: letters, digits,
/// underscore. `None` (start of text) is not a word character.
fn is_word(c: Option<char>) -> bool {
    matches!(c, Some(c) if c.is_alphanumeric() || c == '_')
}

/// Abbreviation guards, applied to the characters before a candidate break.
///
/// `c1` is the character immediately before the terminator, `c2` the one
/// before that, `c3` the one before `c2`.
fn is_abbreviation(terminator: char, c1: Option<char>, c2: Option<char>, c3: Option<char>) -> bool {
    // Single capital letter before the period: "A. Smith", and the final
    // period of dotted acronyms like "D.C."
    if terminator == '.' && matches!(c1, Some(c) if c.is_ascii_uppercase()) && !is_word(c2) {
        return true;
    }

    // Internal period two characters back: "e.g.", "i.e.", "U.S.", "a.m."
    if is_word(c1) && c2 == Some('.') && is_word(c3) {
        return true;
    }

    // Capitalized two-letter abbreviation: "Mr.", "Dr.", "St."
    terminator == '.'
        && matches!(c2, Some(c) if c.is_ascii_uppercase())
        && matches!(c1, Some(c) if c.is_ascii_lowercase())
}

/// Split a block of text into sentence units.
///
/// A sentence ends at `.`, `?` or `!` followed by whitespace, unless the
/// preceding characters match an abbreviation guard. The whitespace run
/// after the terminator is consumed; the units come back trimmed and never
/// empty. A block with no qualifying break is returned whole.
///
/// This is the same heuristic the rest of the chunker is calibrated
/// against, not a grammatical sentence-boundary detector: "et al.",
/// ellipses, and similar patterns mis-split, and that behavior is kept.
pub(crate) fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut in_break = false;
    // The last four characters behind the cursor, most recent first.
    let mut prev: [Option<char>; 4] = [None; 4];

    for (idx, c) in text.char_indices() {
        if in_break {
            if !c.is_whitespace() {
                start = idx;
                in_break = false;
            }
        } else if c.is_whitespace() {
            if let Some(terminator) = prev[0] {
                if is_terminator(terminator)
                    && !is_abbreviation(terminator, prev[1], prev[2], prev[3])
                {
                    push_trimmed(&mut sentences, &text[start..idx]);
                    in_break = true;
                }
            }
        }

        prev = [Some(c), prev[0], prev[1], prev[2]];
    }

    if !in_break {
        push_trimmed(&mut sentences, &text[start..]);
    }

    sentences
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, raw: &'a str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed);
    }
}
