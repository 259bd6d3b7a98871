// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prompt construction for the strategy step

use super::types::StrategyRequest;

/// Build the marketing-strategist prompt.
///
/// The model is instructed to answer with a single strict JSON object:
/// `{"strategy": string, "posts": [{"caption", "image_prompt"}, ...]}` with
/// exactly `post_count` posts.
pub fn build_strategy_prompt(request: &StrategyRequest, post_count: usize) -> String {
    let description = request.description.as_deref().unwrap_or("not provided");
    let timeframe = request
        .timeframe
        .as_deref()
        .unwrap_or("any suitable upcoming date");

    let goals = request
        .goals
        .iter()
        .map(|goal| format!("- {}", goal))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are a digital marketing strategist.

A business is asking for a content strategy.
Project: {project_name}
Website: {website_url}
Description: {description}
Goals:
{goals}
They want to run the campaign around: {timeframe}

Your job is to generate:

1. A short marketing strategy paragraph (2-4 sentences)
2. {post_count} post ideas, where each post includes:
   - A social media caption (for Instagram or Facebook)
   - A visual description prompt that can be used with an image generation model

Respond with a single JSON object shaped like:
{{
  "strategy": "Your strategy text here...",
  "posts": [
    {{
      "caption": "...",
      "image_prompt": "..."
    }}
  ]
}}
Do not include any text outside the JSON object."#,
        project_name = request.project_name,
        website_url = request.website_url,
        description = description,
        goals = goals,
        post_count = post_count,
    )
}
