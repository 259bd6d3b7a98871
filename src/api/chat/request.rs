// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Chat request type and validation

use serde::{Deserialize, Serialize};

/// Request for strategy + posts via POST /chat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Name of the business or campaign
    pub project_name: String,

    /// Public website for the business
    pub website_url: String,

    /// Free-form description of the business
    #[serde(default)]
    pub description: Option<String>,

    /// Ordered marketing goals; must not be empty
    pub goals: Vec<String>,

    /// Coarse timeframe hint (e.g. "next week", "christmas")
    #[serde(default)]
    pub timeframe: Option<String>,
}

impl ChatRequest {
    /// Validate the request before any model call
    pub fn validate(&self) -> Result<(), String> {
        if self.project_name.trim().is_empty() {
            return Err("project_name must not be empty".to_string());
        }

        if self.website_url.trim().is_empty() {
            return Err("website_url must not be empty".to_string());
        }
        if url::Url::parse(&self.website_url).is_err() {
            return Err(format!("website_url `{}` is not a valid URL", self.website_url));
        }

        if self.goals.is_empty() {
            return Err("goals must contain at least one entry".to_string());
        }
        if self.goals.iter().any(|goal| goal.trim().is_empty()) {
            return Err("goals must not contain blank entries".to_string());
        }

        Ok(())
    }
}
