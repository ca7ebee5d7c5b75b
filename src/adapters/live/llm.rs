//! Live adapter for the `LlmClient` port using the Anthropic messages API.

use std::env;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ports::llm::{CompletionFuture, CompletionRequest, CompletionResponse, LlmClient};
use crate::ports::BoxError;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

const SYSTEM_PROMPT: &str =
    "You are a technical writer who produces accurate, well-structured README files in Markdown.";

/// Live LLM client that calls the Anthropic messages API.
pub struct LiveLlmClient {
    client: Client,
}

impl LiveLlmClient {
    /// Creates a new live LLM client.
    #[must_use]
    pub fn new() -> Self {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build().unwrap_or_default();
        Self { client }
    }
}

impl Default for LiveLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(rename = "type")]
    kind: String,
    message: String,
}

impl LlmClient for LiveLlmClient {
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_> {
        let request = request.clone();

        Box::pin(async move {
            let api_key = env::var(API_KEY_VAR)
                .ok()
                .filter(|k| !k.trim().is_empty())
                .ok_or_else(|| BoxError::from(format!("{API_KEY_VAR} is not set")))?;

            let body = MessagesRequest {
                model: &request.model,
                max_tokens: request.max_tokens,
                system: SYSTEM_PROMPT,
                messages: [Message { role: "user", content: &request.prompt }],
            };
            debug!(model = %request.model, prompt_chars = request.prompt.len(), "sending completion request");

            let response = self
                .client
                .post(ANTHROPIC_API_URL)
                .header("x-api-key", &api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .json(&body)
                .send()
                .await
                .map_err(|e| BoxError::from(format!("Anthropic API request failed: {e}")))?;

            let status = response.status();
            let text = response
                .text()
                .await
                .map_err(|e| BoxError::from(format!("failed to read Anthropic API response: {e}")))?;

            if !status.is_success() {
                let detail = serde_json::from_str::<ErrorEnvelope>(&text)
                    .map(|e| format!("{}: {}", e.error.kind, e.error.message))
                    .unwrap_or(text);
                return Err(format!("Anthropic API error ({}): {detail}", status.as_u16()).into());
            }

            parse_response(&text)
        })
    }
}

fn parse_response(text: &str) -> Result<CompletionResponse, BoxError> {
    let parsed: MessagesResponse = serde_json::from_str(text)
        .map_err(|e| BoxError::from(format!("failed to parse Anthropic API response: {e}")))?;
    let text = parsed
        .content
        .into_iter()
        .filter(|block| block.kind == "text")
        .map(|block| block.text)
        .collect::<String>();
    Ok(CompletionResponse {
        text,
        prompt_tokens: parsed.usage.input_tokens,
        completion_tokens: parsed.usage.output_tokens,
    })
}
