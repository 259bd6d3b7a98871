// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod auth;
pub mod chat;
pub mod errors;
pub mod http_server;

pub use auth::authorize;
pub use chat::{chat_handler, ChatRequest, ChatResponse};
pub use errors::{ApiError, ErrorResponse};
pub use http_server::{create_app, start_server, AppState, HealthResponse};
