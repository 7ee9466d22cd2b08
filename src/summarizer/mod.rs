mod client;
mod prompts;
mod types;

pub use client::{SummarizeError, SummaryClient, DEFAULT_API_BASE};
pub use prompts::{
    render_prompt, CHUNK_SUMMARY_PROMPT, FINAL_SUMMARY_PROMPT, PROMPT_PLACEHOLDER,
};
