// ABOUTME: Google Gemini LLM provider implementation for advice generation
// ABOUTME: Non-streaming generateContent calls via the Generative Language API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chi Wellness

//! # Gemini Provider
//!
//! Implementation of the [`LlmProvider`](super::LlmProvider) trait for
//! Google's Gemini models over the Generative Language REST API.
//!
//! ## Configuration
//!
//! Set `GEMINI_API_KEY` with an API key from Google AI Studio. `GEMINI_MODEL`
//! overrides the default model; `GEMINI_BASE_URL` points the client at a
//! test double.
//!
//! Generation calls can take multiple seconds, so the configured advice
//! timeout wraps every request; a timeout surfaces as an upstream error, and
//! the abandoned request is left to complete server-side (no cancellation
//! propagation exists upstream).

use crate::config::environment::LlmConfig;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;
use tracing::{debug, warn};

use super::LlmProvider;

// ============================================================================
// API Request/Response Types
// ============================================================================

/// Gemini API request structure
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

/// Content structure for the Gemini API
#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<ContentPart>,
}

/// Text part of a content block
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: String,
}

/// Gemini API response structure
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<GeminiError>,
}

/// Response candidate
#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<GeminiContent>,
}

/// Error payload returned by the API
#[derive(Debug, Deserialize)]
struct GeminiError {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

// ============================================================================
// Provider
// ============================================================================

/// Gemini text generation provider
#[derive(Clone)]
pub struct GeminiProvider {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl GeminiProvider {
    /// Create a provider from configuration
    ///
    /// # Errors
    ///
    /// Returns an error when no API key is configured or the HTTP client
    /// cannot be constructed.
    pub fn new(config: &LlmConfig) -> anyhow::Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| anyhow::anyhow!("GEMINI_API_KEY is not set"))?;

        let timeout = Duration::from_secs(config.advice_timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build HTTP client: {e}"))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            api_key,
            model: config.model.clone(),
            timeout,
        })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_owned()),
                parts: vec![ContentPart {
                    text: prompt.to_owned(),
                }],
            }],
        };

        let send = self.client.post(self.generate_url()).json(&request).send();
        let response = tokio::time::timeout(self.timeout, send)
            .await
            .map_err(|_| AppError::upstream("gemini", "generation timed out"))?
            .map_err(|e| AppError::upstream("gemini", e.to_string()))?;

        let status = response.status();
        let body: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AppError::serialization(e.to_string()))?;

        if let Some(error) = body.error {
            warn!("gemini error {} ({}): {}", error.code, status, error.message);
            return Err(AppError::upstream(
                "gemini",
                format!("generation failed with code {}", error.code),
            ));
        }

        // Partial or empty output is a soft failure; concatenate whatever the
        // model produced and let the caller decide
        let text: String = body
            .candidates
            .unwrap_or_default()
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .map(|p| p.text)
            .collect();

        debug!("gemini returned {} chars", text.len());
        Ok(text)
    }

    fn display_name(&self) -> &'static str {
        "Gemini"
    }
}
