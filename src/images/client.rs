// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image-generation client for an OpenAI-compatible images API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, info};

/// Allowed output sizes for image generation
pub const ALLOWED_SIZES: &[&str] = &[
    "256x256",
    "512x512",
    "768x768",
    "1024x1024",
    "1024x768",
    "768x1024",
];

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("request to image model failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("image model returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("image model returned no images")]
    EmptyResponse,
    #[error("image model response contained no url")]
    MissingUrl,
}

/// Seam between the batch step and the vendor API; mocked in tests.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate exactly one image and return its resource locator.
    async fn generate(&self, prompt: &str, size: &str) -> Result<String, ImageError>;
}

/// Client for an OpenAI-compatible `/v1/images/generations` endpoint
pub struct OpenAiImageClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

// --- OpenAI-compatible response types ---

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
}

impl OpenAiImageClient {
    pub fn new(
        endpoint: &str,
        api_key: &str,
        model: &str,
        timeout: Duration,
    ) -> Result<Self, ImageError> {
        let client = Client::builder().timeout(timeout).build()?;

        let endpoint = endpoint.trim_end_matches('/').to_string();
        info!("Image model client configured: endpoint={}, model={}", endpoint, model);

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
impl ImageGenerator for OpenAiImageClient {
    async fn generate(&self, prompt: &str, size: &str) -> Result<String, ImageError> {
        let body = json!({
            "model": self.model,
            "prompt": prompt,
            "n": 1,
            "size": size,
            "response_format": "url",
        });

        let url = format!("{}/v1/images/generations", self.endpoint);
        debug!("Image generation POST {} (prompt_len={})", url, prompt.len());

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
            return Err(ImageError::Api { status, body });
        }

        let api_response: ImagesResponse = response.json().await?;
        let first = api_response
            .data
            .into_iter()
            .next()
            .ok_or(ImageError::EmptyResponse)?;

        first.url.ok_or(ImageError::MissingUrl)
    }
}
