// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Route registration tests for the HTTP surface
//!
//! These tests verify that:
//! - GET /health answers 200 with `{"status":"ok"}` and no auth
//! - POST /chat is registered and rejects wrong methods
//! - Auth failures surface as HTTP 401 through the router
//! - A full request round-trips through the router with mocked models

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use mockall::mock;
use tower::util::ServiceExt; // for `oneshot`

use fabstir_campaign_node::api::{create_app, AppState, ChatResponse};
use fabstir_campaign_node::config::NodeSettings;
use fabstir_campaign_node::images::{ImageError, ImageGenerator};
use fabstir_campaign_node::llm::{LlmError, TextGenerator};

mock! {
    pub TextClient {}

    #[async_trait]
    impl TextGenerator for TextClient {
        async fn complete(&self, prompt: &str, temperature: f32) -> Result<String, LlmError>;
    }
}

mock! {
    pub ImageClient {}

    #[async_trait]
    impl ImageGenerator for ImageClient {
        async fn generate(&self, prompt: &str, size: &str) -> Result<String, ImageError>;
    }
}

const TOKEN: &str = "route-test-token";

fn test_state(text: MockTextClient, image: MockImageClient) -> AppState {
    let mut settings = NodeSettings::default();
    settings.server.auth_token = TOKEN.to_string();
    AppState::with_clients(Arc::new(settings), Arc::new(text), Arc::new(image))
}

fn idle_state() -> AppState {
    let mut text = MockTextClient::new();
    text.expect_complete().times(0);
    let mut image = MockImageClient::new();
    image.expect_generate().times(0);
    test_state(text, image)
}

const CHAT_BODY: &str = r#"{
    "project_name": "Acme Tacos",
    "website_url": "https://acmetacos.example",
    "description": "our specials: https://deals.example/fall",
    "goals": ["grow followers"]
}"#;

/// Test 1: Health endpoint answers without auth.
#[tokio::test]
async fn test_health_route_no_auth() {
    let app = create_app(idle_state());

    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
}

/// Test 2: POST /health is rejected with 405.
#[tokio::test]
async fn test_health_route_rejects_post() {
    let app = create_app(idle_state());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

/// Test 3: GET /chat is rejected with 405.
#[tokio::test]
async fn test_chat_route_rejects_get() {
    let app = create_app(idle_state());

    let request = Request::builder()
        .method(Method::GET)
        .uri("/chat")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

/// Test 4: POST /chat without a token is 401 through the router.
#[tokio::test]
async fn test_chat_route_without_token_is_401() {
    let app = create_app(idle_state());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(CHAT_BODY))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error_type"], "unauthorized");
}

/// Test 5: Full round-trip through the router with mocked model clients,
/// including the informational echo fields.
#[tokio::test]
async fn test_chat_route_round_trip() {
    let mut text = MockTextClient::new();
    text.expect_complete().times(1).returning(|_, _| {
        Ok(r#"{
            "strategy": "Post daily.",
            "posts": [
                {"caption": "C1", "image_prompt": "P1"},
                {"caption": "C2", "image_prompt": "P2"}
            ]
        }"#
        .to_string())
    });

    let mut image = MockImageClient::new();
    image
        .expect_generate()
        .times(2)
        .returning(|prompt, _| Ok(format!("https://img.example/{}", prompt)));

    let app = create_app(test_state(text, image));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN))
        .body(Body::from(CHAT_BODY))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: ChatResponse = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body.strategy, "Post daily.");
    assert_eq!(body.posts.len(), 2);
    assert_eq!(body.posts[0].image_url, "https://img.example/P1");
    assert_eq!(body.posts[1].image_url, "https://img.example/P2");
    // URL pulled out of the description, not the declared website
    assert_eq!(body.detected_url.as_deref(), Some("https://deals.example/fall"));
    // No timeframe hint anywhere in the request
    assert_eq!(body.detected_timeframe, None);
}

/// Test 6: Invalid body through the router is 400.
#[tokio::test]
async fn test_chat_route_invalid_body_is_400() {
    let app = create_app(idle_state());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN))
        .body(Body::from(
            r#"{"project_name": "Acme", "website_url": "https://acme.example", "goals": []}"#,
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
