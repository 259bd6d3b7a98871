// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Per-post image generation with per-item failure isolation
//!
//! One image call per post idea. A failed call degrades that post's
//! `image_url` to [`GENERATION_FAILED_SENTINEL`] and the batch carries on;
//! the batch as a whole never fails and never drops an item. Calls run with
//! a bounded fan-out, reassembled in input order.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::client::ImageGenerator;
use crate::strategy::PostIdea;

/// Stands in for a resource locator when image generation fails. Callers
/// that need the image must check for this value and retry out-of-band.
pub const GENERATION_FAILED_SENTINEL: &str = "Image generation failed";

/// One finished post: the idea's caption/prompt plus the generated image URL
/// (or the failure sentinel).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostContent {
    pub caption: String,
    pub image_prompt: String,
    pub image_url: String,
}

pub struct ImageBatchGenerator {
    client: Arc<dyn ImageGenerator>,
    size: String,
    max_concurrency: usize,
}

impl ImageBatchGenerator {
    pub fn new(client: Arc<dyn ImageGenerator>, size: String, max_concurrency: usize) -> Self {
        Self {
            client,
            size,
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Generate one image per idea. Output length and order always match the
    /// input; a failed item keeps its slot with the sentinel URL.
    pub async fn generate(&self, ideas: Vec<PostIdea>) -> Vec<PostContent> {
        let total = ideas.len();
        stream::iter(ideas.into_iter().enumerate())
            .map(|(index, idea)| self.generate_one(index, total, idea))
            .buffered(self.max_concurrency)
            .collect()
            .await
    }

    async fn generate_one(&self, index: usize, total: usize, idea: PostIdea) -> PostContent {
        debug!("Generating image {}/{}: {}", index + 1, total, idea.image_prompt);

        let image_url = match self.client.generate(&idea.image_prompt, &self.size).await {
            Ok(url) => url,
            Err(e) => {
                warn!("Image generation failed for post {}: {}", index + 1, e);
                GENERATION_FAILED_SENTINEL.to_string()
            }
        };

        PostContent {
            caption: idea.caption,
            image_prompt: idea.image_prompt,
            image_url,
        }
    }
}
