// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Text-generation client for an OpenAI-compatible chat completions API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("request to text model failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("text model returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("text model returned no completion choices")]
    EmptyCompletion,
}

/// Seam between the strategy step and the vendor API; mocked in tests.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Run a single-turn completion and return the raw message content.
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String, LlmError>;
}

/// Client for an OpenAI-compatible `/v1/chat/completions` endpoint
pub struct OpenAiChatClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

// --- OpenAI-compatible response types ---

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

impl OpenAiChatClient {
    pub fn new(
        endpoint: &str,
        api_key: &str,
        model: &str,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(timeout).build()?;

        let endpoint = endpoint.trim_end_matches('/').to_string();
        info!("Text model client configured: endpoint={}, model={}", endpoint, model);

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for OpenAiChatClient {
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String, LlmError> {
        let body = json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "temperature": temperature,
        });

        let url = format!("{}/v1/chat/completions", self.endpoint);
        debug!("Chat completion POST {} (prompt_len={})", url, prompt.len());

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api { status, body });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(LlmError::EmptyCompletion)
    }
}
