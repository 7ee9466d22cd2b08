use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::prompts::{render_prompt, SYSTEM_PROMPT};
use super::types::{ApiErrorBody, ChatMessage, ChatRequest, ChatResponse};

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(180); // 3 min for LLM generation

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("Authentication failed (HTTP {status}): {message}")]
    Auth { status: u16, message: String },

    #[error("Rate limited by the API (HTTP 429): {0}")]
    RateLimited(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Prompt template does not contain the {{text}} placeholder")]
    MissingPlaceholder,

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl SummarizeError {
    /// Errors that will keep failing on retry, so callers should stop
    /// submitting work instead of moving on to the next chunk.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SummarizeError::Auth { .. }
                | SummarizeError::RateLimited(_)
                | SummarizeError::MissingPlaceholder
        )
    }
}

pub struct SummaryClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl SummaryClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_API_BASE)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        let base_url = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Render `text` into the prompt template and submit it to the
    /// chat-completions endpoint, returning the trimmed summary.
    ///
    /// Empty input is not worth a network round trip; it yields an
    /// empty summary.
    pub fn summarize(
        &self,
        text: &str,
        prompt_template: &str,
        model: &str,
        max_tokens: u32,
    ) -> Result<String, SummarizeError> {
        if text.trim().is_empty() {
            warn!("Asked to summarize empty text; returning an empty summary");
            return Ok(String::new());
        }

        let user_content = render_prompt(prompt_template, text)?;

        debug!(model, max_tokens, input_chars = text.len(), "Requesting summary");

        let request = ChatRequest {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_content,
                },
            ],
            temperature: 0.5,
            top_p: 1.0,
            max_tokens,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(classify_status(status, &body));
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| SummarizeError::Unexpected(format!("Malformed API response: {e}")))?;

        let summary = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| {
                SummarizeError::Unexpected("API response contained no choices".to_string())
            })?;

        info!(summary_chars = summary.len(), "Received summary");
        Ok(summary)
    }
}

fn classify_transport_error(e: reqwest::Error) -> SummarizeError {
    if e.is_timeout() {
        SummarizeError::Timeout(e.to_string())
    } else if e.is_connect() {
        SummarizeError::Connection(e.to_string())
    } else {
        SummarizeError::Unexpected(e.to_string())
    }
}

fn classify_status(status: StatusCode, body: &str) -> SummarizeError {
    let message = extract_api_message(body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SummarizeError::Auth {
            status: status.as_u16(),
            message,
        },
        StatusCode::TOO_MANY_REQUESTS => SummarizeError::RateLimited(message),
        _ => SummarizeError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

/// Pull the human-readable message out of an OpenAI-style error body,
/// falling back to the raw body when it does not parse.
fn extract_api_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .map(|parsed| parsed.error.message)
        .unwrap_or_else(|_| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarizer::prompts::CHUNK_SUMMARY_PROMPT;

    #[test]
    fn unauthorized_statuses_map_to_auth_errors() {
        for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
            let err = classify_status(status, "bad key");
            assert!(matches!(err, SummarizeError::Auth { .. }), "{status}");
            assert!(err.is_fatal());
        }
    }

    #[test]
    fn too_many_requests_maps_to_rate_limiting() {
        let err = classify_status(StatusCode::TOO_MANY_REQUESTS, "slow down");
        assert!(matches!(err, SummarizeError::RateLimited(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn other_statuses_map_to_retryable_api_errors() {
        let err = classify_status(StatusCode::INTERNAL_SERVER_ERROR, "oops");
        match err {
            SummarizeError::Api { status, .. } => assert_eq!(status, 500),
            other => panic!("expected Api error, got {other:?}"),
        }
        assert!(!classify_status(StatusCode::INTERNAL_SERVER_ERROR, "oops").is_fatal());
    }

    #[test]
    fn api_messages_are_pulled_from_the_error_body() {
        let body = r#"{"error": {"message": "Incorrect API key provided"}}"#;
        assert_eq!(extract_api_message(body), "Incorrect API key provided");
    }

    #[test]
    fn unparseable_bodies_are_passed_through_raw() {
        assert_eq!(extract_api_message("upstream exploded"), "upstream exploded");
    }

    #[test]
    fn empty_text_short_circuits_without_a_request() {
        // Port 1 would refuse the connection, so a request here would error.
        let client = SummaryClient::with_base_url("test-key", "http://127.0.0.1:1");
        let summary = client
            .summarize("   \n  ", CHUNK_SUMMARY_PROMPT, "gpt-4.1-mini", 64)
            .unwrap();
        assert_eq!(summary, "");
    }

    #[test]
    fn templates_without_the_placeholder_fail_before_sending() {
        let client = SummaryClient::with_base_url("test-key", "http://127.0.0.1:1");
        let err = client
            .summarize("some text", "no placeholder here", "gpt-4.1-mini", 64)
            .unwrap_err();
        assert!(matches!(err, SummarizeError::MissingPlaceholder));
        assert!(err.is_fatal());
    }

    #[test]
    fn transport_failures_are_not_fatal() {
        assert!(!SummarizeError::Timeout("180s elapsed".to_string()).is_fatal());
        assert!(!SummarizeError::Connection("refused".to_string()).is_fatal());
        assert!(!SummarizeError::Unexpected("???".to_string()).is_fatal());
    }

    /// Requires a real API key; run with `cargo test -- --ignored`.
    #[test]
    #[ignore]
    fn live_summarize_round_trip() {
        let api_key = std::env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY must be set");
        let client = SummaryClient::new(api_key);
        let summary = client
            .summarize(
                "Maria walked to the harbor at dawn and watched the fishing boats leave. \
                 She had promised her grandfather she would record everything she saw.",
                CHUNK_SUMMARY_PROMPT,
                "gpt-4.1-mini",
                200,
            )
            .unwrap();
        assert!(!summary.is_empty());
    }
}
