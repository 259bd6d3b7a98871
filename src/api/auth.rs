// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Static bearer-token authorization
//!
//! Convention: `Authorization: Bearer <token>`, exact match against the
//! configured token after stripping the prefix. A raw token without the
//! prefix is rejected.

use axum::http::{header, HeaderMap};
use tracing::warn;

use super::errors::ApiError;

pub fn authorize(headers: &HeaderMap, expected_token: &str) -> Result<(), ApiError> {
    let header_value = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            warn!("Rejected request without Authorization header");
            ApiError::Unauthorized("missing Authorization header".to_string())
        })?;

    let token = header_value.strip_prefix("Bearer ").ok_or_else(|| {
        warn!("Rejected request without Bearer prefix");
        ApiError::Unauthorized("expected a Bearer token".to_string())
    })?;

    if token != expected_token {
        warn!("Rejected request with mismatched token");
        return Err(ApiError::Unauthorized("invalid token".to_string()));
    }

    Ok(())
}
