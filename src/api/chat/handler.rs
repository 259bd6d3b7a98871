// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Chat endpoint handler

use axum::{extract::State, http::HeaderMap, Json};
use chrono::{NaiveDate, Utc};
use tracing::{error, info, warn};

use super::request::ChatRequest;
use super::response::ChatResponse;
use crate::api::auth::authorize;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::parser;
use crate::strategy::StrategyRequest;

/// POST /chat - Generate a marketing strategy plus image-backed posts
///
/// Pipeline:
/// 1. Check the bearer token (401 before any model call)
/// 2. Validate request fields
/// 3. Generate strategy + post ideas (failure here is fatal -> 500)
/// 4. Generate one image per idea (per-item failures degrade to the sentinel)
/// 5. Assemble the response with the informational echo fields
pub async fn chat_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    info!("Received /chat request for project `{}`", request.project_name);

    authorize(&headers, &state.settings.server.auth_token)?;

    if let Err(e) = request.validate() {
        warn!("Chat request validation failed: {}", e);
        return Err(ApiError::InvalidRequest(e));
    }

    let today = Utc::now().date_naive();
    let (detected_url, detected_timeframe) = detect_echoes(&request, today);

    let strategy_request = StrategyRequest {
        project_name: request.project_name.clone(),
        website_url: request.website_url.clone(),
        description: request.description.clone(),
        goals: request.goals.clone(),
        timeframe: request.timeframe.clone(),
    };

    let generated = match state.strategy.generate(&strategy_request).await {
        Ok(generated) => generated,
        Err(e) => {
            error!("Strategy generation failed: {}", e);
            return Err(ApiError::InternalError(
                "strategy generation failed".to_string(),
            ));
        }
    };

    let posts = state.images.generate(generated.post_ideas).await;
    info!("Finished generating strategy and {} posts", posts.len());

    Ok(Json(ChatResponse {
        strategy: generated.strategy,
        posts,
        detected_url,
        detected_timeframe,
    }))
}

/// Informational echo fields: URL pulled out of the description (falling
/// back to the declared website), timeframe keyword resolved from the
/// timeframe field first, then the description, echoing the raw field when
/// no keyword matches.
fn detect_echoes(request: &ChatRequest, today: NaiveDate) -> (Option<String>, Option<String>) {
    let description = request.description.as_deref().unwrap_or("");

    let detected_url = parser::extract_url(description)
        .map(str::to_string)
        .or_else(|| Some(request.website_url.clone()));

    let timeframe = request.timeframe.as_deref().unwrap_or("");
    let detected_timeframe = parser::extract_timeframe(timeframe, today)
        .or_else(|| parser::extract_timeframe(description, today))
        .map(|date| date.format("%Y-%m-%d").to_string())
        .or_else(|| request.timeframe.clone());

    (detected_url, detected_timeframe)
}
