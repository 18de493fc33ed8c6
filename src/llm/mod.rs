// ABOUTME: LLM provider abstraction for advice generation
// ABOUTME: Defines the generation contract plus the runtime provider selector
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chi Wellness

//! # Generative-text provider interface
//!
//! Advice text comes from an external generative model: given a prompt
//! string, return an advice string or fail. Providers implement exactly that
//! contract. Empty output is a valid soft-failure result; the handler, not
//! the provider, decides how to surface it.

mod gemini;
pub mod prompts;

pub use gemini::GeminiProvider;
pub use prompts::build_advice_prompt;

use crate::config::environment::LlmConfig;
use crate::errors::AppResult;
use async_trait::async_trait;
use tracing::info;

/// Contract for generative-text providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate text for a prompt
    ///
    /// # Errors
    ///
    /// Returns an upstream error when the service fails or times out. An
    /// empty string is a successful call with no usable output.
    async fn generate(&self, prompt: &str) -> AppResult<String>;

    /// Human-readable provider name for logs
    fn display_name(&self) -> &'static str;
}

/// Canned responder for tests and offline development
#[derive(Debug, Clone)]
pub struct StaticProvider {
    response: String,
}

impl StaticProvider {
    /// Create a responder that always returns `response`
    #[must_use]
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[async_trait]
impl LlmProvider for StaticProvider {
    async fn generate(&self, _prompt: &str) -> AppResult<String> {
        Ok(self.response.clone())
    }

    fn display_name(&self) -> &'static str {
        "Static"
    }
}

/// Advice generator wrapper that delegates to the configured provider
///
/// Gemini when an API key is configured, the static responder otherwise.
#[derive(Debug, Clone)]
pub enum AdviceGenerator {
    /// Google Gemini over the Generative Language REST API
    Gemini(GeminiProvider),
    /// Canned responder
    Static(StaticProvider),
}

impl AdviceGenerator {
    /// Create a generator from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &LlmConfig) -> anyhow::Result<Self> {
        if config.api_key.is_some() {
            info!("Initializing Gemini advice generator with model {}", config.model);
            Ok(Self::Gemini(GeminiProvider::new(config)?))
        } else {
            info!("GEMINI_API_KEY not set; advice generation uses the static responder");
            Ok(Self::Static(StaticProvider::new(
                "Advice generation is not configured on this server.",
            )))
        }
    }
}

#[async_trait]
impl LlmProvider for AdviceGenerator {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        match self {
            Self::Gemini(provider) => provider.generate(prompt).await,
            Self::Static(provider) => provider.generate(prompt).await,
        }
    }

    fn display_name(&self) -> &'static str {
        match self {
            Self::Gemini(provider) => provider.display_name(),
            Self::Static(provider) => provider.display_name(),
        }
    }
}
