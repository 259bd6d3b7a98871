// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Strategy generation: one model call, strict JSON contract
//!
//! The model is trusted to return the fixed shape the prompt demands. There
//! is no schema repair and no retry: the strategy is a prerequisite for every
//! downstream post, so any model or parse failure fails the whole step.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use super::prompt::build_strategy_prompt;
use super::types::{GeneratedStrategy, PostIdea, StrategyRequest};
use crate::llm::{LlmError, TextGenerator};

#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("text generation failed: {0}")]
    Model(#[from] LlmError),
    #[error("model output was not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("model output missing or empty field `{0}`")]
    MissingField(&'static str),
}

pub struct StrategyGenerator {
    client: Arc<dyn TextGenerator>,
    post_count: usize,
    temperature: f32,
}

impl StrategyGenerator {
    pub fn new(client: Arc<dyn TextGenerator>, post_count: usize, temperature: f32) -> Self {
        Self {
            client,
            post_count,
            temperature,
        }
    }

    /// Generate the strategy paragraph and post ideas in one model call.
    pub async fn generate(
        &self,
        request: &StrategyRequest,
    ) -> Result<GeneratedStrategy, StrategyError> {
        let prompt = build_strategy_prompt(request, self.post_count);

        info!("Sending strategy prompt to text model");
        let raw_output = self.client.complete(&prompt, self.temperature).await?;
        debug!("Raw model response: {}", raw_output);

        let generated = parse_strategy_output(&raw_output)?;
        info!(
            "Parsed strategy and {} post ideas",
            generated.post_ideas.len()
        );
        Ok(generated)
    }
}

/// Extract `{strategy, posts: [{caption, image_prompt}]}` from raw model
/// output. Each failure maps to a distinct error kind so callers never have
/// to string-match log messages.
fn parse_strategy_output(raw: &str) -> Result<GeneratedStrategy, StrategyError> {
    let value: Value = serde_json::from_str(raw.trim())?;

    let strategy = value
        .get("strategy")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or(StrategyError::MissingField("strategy"))?
        .to_string();

    let posts = value
        .get("posts")
        .and_then(Value::as_array)
        .ok_or(StrategyError::MissingField("posts"))?;

    let mut post_ideas = Vec::with_capacity(posts.len());
    for post in posts {
        let caption = post
            .get("caption")
            .and_then(Value::as_str)
            .ok_or(StrategyError::MissingField("posts[].caption"))?;
        let image_prompt = post
            .get("image_prompt")
            .and_then(Value::as_str)
            .ok_or(StrategyError::MissingField("posts[].image_prompt"))?;
        post_ideas.push(PostIdea {
            caption: caption.to_string(),
            image_prompt: image_prompt.to_string(),
        });
    }

    Ok(GeneratedStrategy {
        strategy,
        post_ideas,
    })
}
