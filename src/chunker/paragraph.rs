use regex::Regex;
use std::sync::LazyLock;

/// A paragraph boundary: a newline, any run of whitespace, then a newline.
/// Greedy, so one match covers a whole run of blank lines. Indentation after
/// the run's last newline belongs to the next paragraph.
static PARAGRAPH_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("paragraph boundary pattern is valid"));

/// Split `text` into paragraph units along blank-line boundaries.
///
/// Each unit keeps its trailing boundary text, so concatenating the units in
/// order reproduces the input byte for byte, except that whitespace-only
/// units (leading blank lines) are dropped. A text with no blank lines comes
/// back as a single unit.
pub(crate) fn split_paragraphs(text: &str) -> Vec<&str> {
    let mut units = Vec::new();
    let mut start = 0;

    for boundary in PARAGRAPH_BOUNDARY.find_iter(text) {
        let unit = &text[start..boundary.end()];
        if !unit.trim().is_empty() {
            units.push(unit);
        }
        start = boundary.end();
    }

    if start < text.len() {
        let tail = &text[start..];
        if !tail.trim().is_empty() {
            units.push(tail);
        }
    }

    units
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_the_separator_with_the_preceding_unit() {
        let units = split_paragraphs("First paragraph.\n\nSecond paragraph.");
        assert_eq!(units, vec!["First paragraph.\n\n", "Second paragraph."]);
    }

    #[test]
    fn boundary_spans_interior_whitespace() {
        let units = split_paragraphs("one\n \t \ntwo");
        assert_eq!(units, vec!["one\n \t \n", "two"]);
    }

    #[test]
    fn indentation_after_the_boundary_stays_with_the_next_unit() {
        let units = split_paragraphs("one\n\n   two");
        assert_eq!(units, vec!["one\n\n", "   two"]);
    }

    #[test]
    fn text_without_blank_lines_is_one_unit() {
        let text = "a single paragraph\nwith a line break but no blank line";
        assert_eq!(split_paragraphs(text), vec![text]);
    }

    #[test]
    fn blank_input_yields_nothing() {
        assert!(split_paragraphs("").is_empty());
        assert!(split_paragraphs("\n\n\n  \n\n").is_empty());
    }

    #[test]
    fn leading_blank_lines_are_dropped() {
        assert_eq!(split_paragraphs("\n\nhello"), vec!["hello"]);
    }

    #[test]
    fn concatenating_units_reproduces_the_text() {
        let text = "alpha beta.\n\ngamma\ndelta.\n\n\nepsilon.\n\n";
        let units = split_paragraphs(text);
        assert_eq!(units.concat(), text);
    }

    #[test]
    fn crlf_blank_lines_are_boundaries() {
        let units = split_paragraphs("one\r\n\r\ntwo");
        assert_eq!(units.len(), 2);
        assert!(units[0].ends_with("\r\n"));
        assert_eq!(units.concat(), "one\r\n\r\ntwo");
    }

    #[test]
    fn consecutive_blank_lines_collapse_into_one_boundary() {
        let units = split_paragraphs("one\n\n\n\n\ntwo");
        assert_eq!(units, vec!["one\n\n\n\n\n", "two"]);
    }
}
