/// Marker Project Gutenberg places before its licence block.
const GUTENBERG_END_MARKER: &str = "*** END OF THE PROJECT GUTENBERG EBOOK";

/// Truncates the text at the Project Gutenberg end-of-book marker so the
/// licence boilerplate never reaches the chunker. Text without the marker
/// comes back unchanged.
pub fn strip_gutenberg_trailer(text: &str) -> &str {
    match text.find(GUTENBERG_END_MARKER) {
        Some(index) => &text[..index],
        None => text,
    }
}
