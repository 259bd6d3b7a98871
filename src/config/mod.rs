// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! YAML-backed node settings, loaded once at startup and passed by reference
//! into every component. Request handlers never read ambient process state.

use std::env;
use std::fs::File;
use std::io::Read;
use std::net::SocketAddr;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::images::client::ALLOWED_SIZES;

fn default_listen_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_api_base() -> String {
    "https://api.openai.com".to_string()
}

fn default_chat_model() -> String {
    "gpt-4".to_string()
}

fn default_image_model() -> String {
    "dall-e-3".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_post_count() -> usize {
    2
}

fn default_llm_timeout_secs() -> u64 {
    60
}

fn default_image_timeout_secs() -> u64 {
    120
}

fn default_size() -> String {
    "1024x1024".to_string()
}

fn default_max_concurrency() -> usize {
    2
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct NodeSettings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub llm: LlmSettings,
    #[serde(default)]
    pub images: ImageSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Static token expected in `Authorization: Bearer <token>`.
    #[serde(default)]
    pub auth_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_chat_model")]
    pub model: String,
    /// Sampling temperature for strategy generation.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// How many post ideas the strategy prompt asks for.
    #[serde(default = "default_post_count")]
    pub post_count: usize,
    #[serde(default = "default_llm_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageSettings {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Falls back to `llm.api_key` when empty.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_image_model")]
    pub model: String,
    #[serde(default = "default_size")]
    pub size: String,
    #[serde(default = "default_image_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Upper bound on in-flight image calls within one request.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            auth_token: String::new(),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            api_key: String::new(),
            model: default_chat_model(),
            temperature: default_temperature(),
            post_count: default_post_count(),
            request_timeout_secs: default_llm_timeout_secs(),
        }
    }
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            api_key: String::new(),
            model: default_image_model(),
            size: default_size(),
            request_timeout_secs: default_image_timeout_secs(),
            max_concurrency: default_max_concurrency(),
        }
    }
}

impl NodeSettings {
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut buf = String::new();
        reader
            .read_to_string(&mut buf)
            .context("failed to read settings")?;
        let settings: NodeSettings =
            serde_yaml::from_str(&buf).context("failed to parse settings YAML")?;
        Ok(settings)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())
            .with_context(|| format!("failed to open {}", path.as_ref().display()))?;
        Self::from_reader(file)
    }

    /// Load from a YAML file, then apply env overrides for secrets.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut settings = Self::from_path(path)?;
        settings.apply_env_overrides();
        Ok(settings)
    }

    /// Secrets may be supplied via environment instead of the YAML file:
    /// `API_TOKEN`, `OPENAI_API_KEY`, `LISTEN_ADDR`.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(token) = env::var("API_TOKEN") {
            if !token.is_empty() {
                self.server.auth_token = token;
            }
        }
        if let Ok(key) = env::var("OPENAI_API_KEY") {
            if !key.is_empty() {
                self.llm.api_key = key;
            }
        }
        if let Ok(addr) = env::var("LISTEN_ADDR") {
            if !addr.is_empty() {
                self.server.listen_addr = addr;
            }
        }
    }

    /// Image calls reuse the text-model key unless one is set explicitly.
    pub fn image_api_key(&self) -> &str {
        if self.images.api_key.is_empty() {
            &self.llm.api_key
        } else {
            &self.images.api_key
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.listen_addr.parse::<SocketAddr>().is_err() {
            bail!("server.listen_addr `{}` is not a valid socket address", self.server.listen_addr);
        }
        if self.server.auth_token.trim().is_empty() {
            bail!("server.auth_token must be set (YAML or API_TOKEN env var)");
        }
        if self.llm.api_key.trim().is_empty() {
            bail!("llm.api_key must be set (YAML or OPENAI_API_KEY env var)");
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            bail!("llm.temperature must be between 0.0 and 2.0, got {}", self.llm.temperature);
        }
        if self.llm.post_count == 0 || self.llm.post_count > 10 {
            bail!("llm.post_count must be between 1 and 10, got {}", self.llm.post_count);
        }
        if !ALLOWED_SIZES.contains(&self.images.size.as_str()) {
            bail!(
                "invalid images.size `{}`; allowed: {}",
                self.images.size,
                ALLOWED_SIZES.join(", ")
            );
        }
        if self.images.max_concurrency == 0 {
            bail!("images.max_concurrency must be at least 1");
        }
        Ok(())
    }
}
