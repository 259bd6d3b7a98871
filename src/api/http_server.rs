// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::chat::chat_handler;
use crate::config::NodeSettings;
use crate::images::{ImageBatchGenerator, ImageGenerator, OpenAiImageClient};
use crate::llm::{OpenAiChatClient, TextGenerator};
use crate::strategy::StrategyGenerator;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<NodeSettings>,
    pub strategy: Arc<StrategyGenerator>,
    pub images: Arc<ImageBatchGenerator>,
}

impl AppState {
    /// Build the state with real model clients from the settings.
    pub fn new(settings: Arc<NodeSettings>) -> Result<Self> {
        let text_client = OpenAiChatClient::new(
            &settings.llm.api_base,
            &settings.llm.api_key,
            &settings.llm.model,
            Duration::from_secs(settings.llm.request_timeout_secs),
        )?;
        let image_client = OpenAiImageClient::new(
            &settings.images.api_base,
            settings.image_api_key(),
            &settings.images.model,
            Duration::from_secs(settings.images.request_timeout_secs),
        )?;

        Ok(Self::with_clients(
            settings,
            Arc::new(text_client),
            Arc::new(image_client),
        ))
    }

    /// Build the state around caller-supplied model clients (tests swap in
    /// mocks here).
    pub fn with_clients(
        settings: Arc<NodeSettings>,
        text_client: Arc<dyn TextGenerator>,
        image_client: Arc<dyn ImageGenerator>,
    ) -> Self {
        let strategy = StrategyGenerator::new(
            text_client,
            settings.llm.post_count,
            settings.llm.temperature,
        );
        let images = ImageBatchGenerator::new(
            image_client,
            settings.images.size.clone(),
            settings.images.max_concurrency,
        );

        Self {
            settings,
            strategy: Arc::new(strategy),
            images: Arc::new(images),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_handler))
        // Strategy + posts endpoint
        .route("/chat", post(chat_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub async fn start_server(settings: NodeSettings) -> Result<()> {
    let addr = settings.server.listen_addr.parse::<SocketAddr>()?;
    let state = AppState::new(Arc::new(settings))?;
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}

async fn health_handler() -> axum::response::Json<HealthResponse> {
    axum::response::Json(HealthResponse {
        status: "ok".to_string(),
    })
}
