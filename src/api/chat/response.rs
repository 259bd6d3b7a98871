// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Chat response types

use serde::{Deserialize, Serialize};

use crate::images::PostContent;

/// Response from POST /chat
///
/// `posts` always has one entry per generated post idea, in idea order; a
/// post whose image failed carries the failure sentinel in `image_url`
/// instead of being dropped. The detected fields are informational echoes of
/// input parsing and never alter downstream behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub strategy: String,
    pub posts: Vec<PostContent>,
    pub detected_url: Option<String>,
    pub detected_timeframe: Option<String>,
}
