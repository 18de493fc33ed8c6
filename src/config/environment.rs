// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chi Wellness

//! Environment-based configuration management for production deployment

use crate::constants::defaults;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::warn;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Default operational logging
    #[default]
    Info,
    /// Verbose diagnostics
    Debug,
    /// Full tracing output
    Trace,
}

impl LogLevel {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Environment type for logging defaults and CORS posture
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Document store backend selection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Hosted Firestore documents (production)
    #[default]
    Firestore,
    /// In-process maps (tests, local hacking without credentials)
    Memory,
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Firestore => write!(f, "firestore"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Document store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Selected backend
    pub backend: StoreBackend,
    /// Firebase/Firestore project id (required for the firestore backend)
    pub project_id: String,
    /// Web API key sent with Firestore REST calls (shared with identity)
    pub api_key: String,
    /// Base URL of the Firestore REST API; overridable for emulators/tests
    pub base_url: String,
}

/// Identity provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Web API key for the Identity Toolkit endpoints
    pub api_key: String,
    /// Base URL of the Identity Toolkit REST API; overridable for tests
    pub base_url: String,
}

/// Generative-text provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Gemini API key; absent selects the static offline responder
    pub api_key: Option<String>,
    /// Model identifier for advice generation
    pub model: String,
    /// Base URL of the Generative Language API; overridable for tests
    pub base_url: String,
    /// Timeout applied around one generation call, seconds
    pub advice_timeout_secs: u64,
}

/// Complete server configuration assembled from the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Log level (informational; the subscriber reads `RUST_LOG` directly)
    pub log_level: LogLevel,
    /// Document store settings
    pub store: StoreConfig,
    /// Identity provider settings
    pub identity: IdentityConfig,
    /// Generative-text provider settings
    pub llm: LlmConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error when the firestore backend is selected without a
    /// project id, or when the identity API key is missing outside the
    /// memory-backend profile.
    pub fn from_env() -> Result<Self> {
        let http_port = env::var("HTTP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults::HTTP_PORT);

        let environment = Environment::from_str_or_default(
            &env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        );

        let log_level = LogLevel::from_str_or_default(
            &env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        );

        let backend = match env::var("STORE_BACKEND").as_deref() {
            Ok("memory") => StoreBackend::Memory,
            Ok("firestore") | Err(_) => StoreBackend::Firestore,
            Ok(other) => {
                warn!("Unrecognized STORE_BACKEND '{other}', defaulting to firestore");
                StoreBackend::Firestore
            }
        };

        let project_id = env::var("FIREBASE_PROJECT_ID").unwrap_or_default();
        if backend == StoreBackend::Firestore && project_id.is_empty() {
            return Err(anyhow!(
                "FIREBASE_PROJECT_ID is required when STORE_BACKEND=firestore"
            ));
        }

        let api_key = env::var("FIREBASE_API_KEY").unwrap_or_default();
        if backend == StoreBackend::Firestore && api_key.is_empty() {
            return Err(anyhow!(
                "FIREBASE_API_KEY is required when STORE_BACKEND=firestore"
            ));
        }

        let store = StoreConfig {
            backend,
            project_id,
            api_key: api_key.clone(),
            base_url: env::var("FIRESTORE_BASE_URL")
                .unwrap_or_else(|_| "https://firestore.googleapis.com/v1".into()),
        };

        let identity = IdentityConfig {
            api_key,
            base_url: env::var("IDENTITY_BASE_URL")
                .unwrap_or_else(|_| "https://identitytoolkit.googleapis.com/v1".into()),
        };

        let llm = LlmConfig {
            api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            model: env::var("GEMINI_MODEL").unwrap_or_else(|_| defaults::GEMINI_MODEL.into()),
            base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".into()),
            advice_timeout_secs: env::var("ADVICE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults::ADVICE_TIMEOUT_SECS),
        };

        Ok(Self {
            http_port,
            environment,
            log_level,
            store,
            identity,
            llm,
        })
    }

    /// One-line startup summary for the logs, secrets elided
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "environment={} port={} store={} llm_model={} llm_configured={} advice_timeout={}s",
            self.environment,
            self.http_port,
            self.store.backend,
            self.llm.model,
            self.llm.api_key.is_some(),
            self.llm.advice_timeout_secs
        )
    }

    /// Configuration for a memory-backed instance, used by tests
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            http_port: 0,
            environment: Environment::Testing,
            log_level: LogLevel::Info,
            store: StoreConfig {
                backend: StoreBackend::Memory,
                project_id: String::new(),
                api_key: String::new(),
                base_url: String::new(),
            },
            identity: IdentityConfig {
                api_key: String::new(),
                base_url: String::new(),
            },
            llm: LlmConfig {
                api_key: None,
                model: defaults::GEMINI_MODEL.into(),
                base_url: String::new(),
                advice_timeout_secs: 1,
            },
        }
    }
}
