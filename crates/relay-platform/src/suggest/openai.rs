//! OpenAI-compatible drafting service adapter.
//!
//! Sends the fixed drafting instruction plus the manager's message text to
//! a chat-completions endpoint and returns the raw model text. Parsing and
//! fail-open handling live in relay-core; this adapter only does transport.
//! Uses browser `fetch()` via gloo-net for WASM compatibility.

use async_trait::async_trait;
use gloo_net::http::Request;
use serde::Deserialize;
use serde_json::json;

use relay_core::ports::SuggestionServicePort;
use relay_core::suggest::DRAFT_INSTRUCTION;
use relay_types::config::SuggestConfig;
use relay_types::{RelayError, Result};

pub struct OpenAiSuggestionService {
    config: SuggestConfig,
}

impl OpenAiSuggestionService {
    pub fn new(config: SuggestConfig) -> Self {
        Self { config }
    }
}

#[async_trait(?Send)]
impl SuggestionServicePort for OpenAiSuggestionService {
    async fn draft_replies(&self, manager_text: &str) -> Result<String> {
        if self.config.api_key.is_empty() {
            return Err(RelayError::Config(
                "suggestion service API key is not set".to_string(),
            ));
        }

        let url = format!("{}/v1/chat/completions", self.config.base_url());
        let body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": DRAFT_INSTRUCTION },
                { "role": "user", "content": manager_text },
            ],
            "max_tokens": self.config.max_output_tokens,
        });

        let response = Request::post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", &format!("Bearer {}", self.config.api_key))
            .json(&body)
            .map_err(|e| RelayError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| RelayError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(RelayError::Suggestion(format!("HTTP {}: {}", status, text)));
        }

        let data: ApiResponse = response
            .json()
            .await
            .map_err(|e| RelayError::Suggestion(e.to_string()))?;

        data.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| RelayError::Suggestion("No choices in response".to_string()))
    }
}

// ─── API response types ──────────────────────────────────────

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
}

#[derive(Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Deserialize)]
struct ApiMessage {
    #[serde(default)]
    content: Option<String>,
}
