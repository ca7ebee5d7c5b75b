//! Narrative generation through the [`LlmClient`] port.

use thiserror::Error;
use tracing::info;

use crate::ports::llm::{CompletionRequest, LlmClient};

/// Model used when neither the CLI nor the config names one.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Completion budget used when the config does not set one.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Why the narrative could not be generated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// No API key is configured.
    #[error("ANTHROPIC_API_KEY is not set; export it or add it to a .env file")]
    MissingApiKey,
    /// The provider rejected the key.
    #[error("the Anthropic API rejected the API key; check ANTHROPIC_API_KEY ({0})")]
    InvalidApiKey(String),
    /// Rate limit or billing quota reached.
    #[error("Anthropic API quota or rate limit reached; wait and retry or check your plan ({0})")]
    QuotaExceeded(String),
    /// The provider is temporarily overloaded.
    #[error("the Anthropic API is overloaded; retry in a few minutes ({0})")]
    Overloaded(String),
    /// The model returned no text.
    #[error("the model returned an empty response; retry or raise max_tokens")]
    EmptyResponse,
    /// Anything else.
    #[error("narrative generation failed: {0}")]
    Other(String),
}

impl GenerationError {
    /// Maps an adapter error message to a typed error by inspecting it.
    #[must_use]
    pub fn classify(message: &str) -> Self {
        let lower = message.to_ascii_lowercase();
        let message = message.to_string();
        if lower.contains("anthropic_api_key") && lower.contains("not set") {
            Self::MissingApiKey
        } else if lower.contains("(401)")
            || lower.contains("authentication_error")
            || lower.contains("invalid x-api-key")
            || lower.contains("invalid api key")
        {
            Self::InvalidApiKey(message)
        } else if lower.contains("(429)")
            || lower.contains("rate_limit")
            || lower.contains("rate limit")
            || lower.contains("quota")
            || lower.contains("credit balance")
        {
            Self::QuotaExceeded(message)
        } else if lower.contains("(529)") || lower.contains("(503)") || lower.contains("overloaded") {
            Self::Overloaded(message)
        } else {
            Self::Other(message)
        }
    }
}

/// Asks the model for the README narrative.
///
/// # Errors
///
/// Returns a [`GenerationError`] when the request fails or yields no text.
pub async fn generate_narrative(
    llm: &dyn LlmClient,
    model: &str,
    max_tokens: u32,
    prompt: String,
) -> Result<String, GenerationError> {
    let request = CompletionRequest { model: model.to_string(), prompt, max_tokens };
    let response =
        llm.complete(&request).await.map_err(|e| GenerationError::classify(&e.to_string()))?;
    info!(
        model,
        prompt_tokens = response.prompt_tokens,
        completion_tokens = response.completion_tokens,
        "narrative generated"
    );
    if response.text.trim().is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    Ok(response.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::replaying::ReplayingLlmClient;
    use crate::cassette::format::{Cassette, Interaction};
    use crate::cassette::replayer::CassetteReplayer;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    fn client(output: serde_json::Value) -> ReplayingLlmClient {
        let cassette =
            Cassette::new("llm", vec![Interaction::new("llm", "complete", json!({}), output)]);
        ReplayingLlmClient::new(Arc::new(Mutex::new(CassetteReplayer::new(&cassette))))
    }

    #[test]
    fn classifies_provider_messages() {
        assert_eq!(
            GenerationError::classify("ANTHROPIC_API_KEY is not set"),
            GenerationError::MissingApiKey
        );
        assert!(matches!(
            GenerationError::classify("Anthropic API error (401): authentication_error: invalid x-api-key"),
            GenerationError::InvalidApiKey(_)
        ));
        assert!(matches!(
            GenerationError::classify("Anthropic API error (400): invalid_request_error: Your credit balance is too low"),
            GenerationError::QuotaExceeded(_)
        ));
        assert!(matches!(
            GenerationError::classify("Anthropic API error (529): overloaded_error: Overloaded"),
            GenerationError::Overloaded(_)
        ));
        assert!(matches!(
            GenerationError::classify("Anthropic API request failed: connection reset"),
            GenerationError::Other(_)
        ));
    }

    #[tokio::test]
    async fn returns_text_of_completion() {
        let llm = client(json!({"ok": {"text": "# hello\n\nBody", "prompt_tokens": 10, "completion_tokens": 5}}));
        let text = generate_narrative(&llm, DEFAULT_MODEL, DEFAULT_MAX_TOKENS, "p".into()).await.unwrap();
        assert_eq!(text, "# hello\n\nBody");
    }

    #[tokio::test]
    async fn adapter_errors_are_classified() {
        let llm = client(json!({"err": "Anthropic API error (429): rate_limit_error: slow down"}));
        let err = generate_narrative(&llm, DEFAULT_MODEL, 16, "p".into()).await.unwrap_err();
        assert!(matches!(err, GenerationError::QuotaExceeded(_)));
    }

    #[tokio::test]
    async fn blank_completion_is_an_error() {
        let llm = client(json!({"ok": {"text": "  \n", "prompt_tokens": 1, "completion_tokens": 1}}));
        let err = generate_narrative(&llm, DEFAULT_MODEL, 16, "p".into()).await.unwrap_err();
        assert_eq!(err, GenerationError::EmptyResponse);
    }
}
