use super::client::SummarizeError;

/// Substitution marker every prompt template must carry exactly once.
pub const PROMPT_PLACEHOLDER: &str = "{text}";

pub(crate) const SYSTEM_PROMPT: &str = "You are an AI assistant specialized in \
summarizing academic and literary texts in a detailed and neutral way, carefully \
following the provided instructions for the structure and content of the output.";

/// Per-chunk summarization instructions.
pub const CHUNK_SUMMARY_PROMPT: &str = r#"## Task

Summarize the following text excerpt (up to 10,000 words) into a **concise, information-rich summary of ~1,000 words**.

## Instructions

- Analyze the text carefully.
- Ignore:
  - editorial information, copyright, digitisation project;
  - added documents not part of the text (e.g. licences, critical introductions).
- Summarise **main text only**.
- Structure the summary with these sections:
  1. **Topics Covered**
  2. **Key Characters** (with brief descriptions)
  3. **Main Themes**
  4. **Main Points & Events**

- Be precise and comprehensive: do **not** omit details relevant for understanding the full book.
- Use clear, concise language.
- For fiction: capture main plot and character dynamics.
  For non-fiction: focus on arguments, evidence, conclusions.
- **Do not paraphrase superficially; synthesize and preserve all substantive content.**
- If unsure, favor inclusion of information at this stage.

## Input
<input-text>
{text}
</input-text>

## Output
1. **Topics Covered**
2. **Key Characters**
3. **Main Themes**
4. **Main Points & Events**

*(Total: ~1,000 words)*
"#;

/// Final synthesis instructions, applied to the aggregated chunk summaries.
pub const FINAL_SUMMARY_PROMPT: &str = r#"## Task

You are given multiple summaries, each covering a different portion of a book.
Your goal is to synthesize these into a **single, comprehensive final summary** of approximately 1,500 words.

## Instructions

- Carefully read and analyze all provided summaries.
- Eliminate any redundant or repeated information, but do **not** omit any important topics, characters, themes, or insights.
- Integrate information to create a **cohesive and complete picture** of the entire book.
- Ensure the summary is **dense, precise, and comprehensive**, preserving all relevant details, context, and nuances.
- For fiction: reflect the entire narrative arc, character evolution, and key plot points.
  For non-fiction: cover all main arguments, evidence, and conclusions.
- If unsure whether to include information, favor inclusion.
- Ignore:
  - editorial information, copyright, digitisation project;
  - added documents not part of the text (e.g. licences, critical introductions).

## Input
<input-text>
{text}
</input-text>

## Output
1. **Topics Covered**
2. **Key Characters**
3. **Main Themes**
4. **Main Points & Events**

*(Total: ~1,500 words)*
"#;

/// Substitutes the input text into a prompt template.
///
/// The template must contain [`PROMPT_PLACEHOLDER`]; only the first occurrence
/// is replaced, so braces inside the document itself are left alone.
pub fn render_prompt(template: &str, text: &str) -> Result<String, SummarizeError> {
    if !template.contains(PROMPT_PLACEHOLDER) {
        return Err(SummarizeError::MissingPlaceholder);
    }
    Ok(template.replacen(PROMPT_PLACEHOLDER, text, 1))
}
