// ABOUTME: Firebase Authentication identity provider over the Identity Toolkit REST API
// ABOUTME: Maps provider error codes to the specific user-facing messages clients expect
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chi Wellness

//! Firebase identity provider
//!
//! Calls the Identity Toolkit endpoints (`accounts:signUp`,
//! `accounts:signInWithPassword`) with the project's web API key. Provider
//! error codes arrive as upper-snake strings (`EMAIL_EXISTS`,
//! `INVALID_LOGIN_CREDENTIALS`, ...), the SDK-era `auth/...` codes under a
//! different spelling, and are translated to user-facing messages here.
//! Unmapped codes fall back to a generic failure message.

use crate::config::environment::IdentityConfig;
use crate::constants::messages;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use super::{AuthTokens, IdentityProvider};

/// Timeout applied to a single identity call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Firebase Authentication client
#[derive(Clone)]
pub struct FirebaseIdentity {
    client: Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for FirebaseIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseIdentity")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// Identity Toolkit credential request body
#[derive(Debug, Serialize)]
struct CredentialRequest<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(rename = "returnSecureToken")]
    return_secure_token: bool,
}

/// Identity Toolkit success response (fields we consume)
#[derive(Debug, Deserialize)]
struct CredentialResponse {
    #[serde(rename = "localId")]
    local_id: String,
    #[serde(rename = "idToken")]
    id_token: String,
}

/// Identity Toolkit error envelope
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

impl FirebaseIdentity {
    /// Create a provider from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &IdentityConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build HTTP client: {e}"))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            api_key: config.api_key.clone(),
        })
    }

    /// Execute one credential endpoint call
    async fn credential_call(
        &self,
        endpoint: &str,
        email: &str,
        password: &str,
    ) -> AppResult<AuthTokens> {
        let url = format!("{}/{endpoint}?key={}", self.base_url, self.api_key);
        let body = CredentialRequest {
            email,
            password,
            return_secure_token: true,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::upstream("identity", e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let parsed: CredentialResponse = response
                .json()
                .await
                .map_err(|e| AppError::serialization(e.to_string()))?;
            debug!("identity {endpoint} succeeded for uid {}", parsed.local_id);
            return Ok(AuthTokens {
                uid: parsed.local_id,
                access_token: parsed.id_token,
            });
        }

        let text = response.text().await.unwrap_or_default();
        let code = serde_json::from_str::<ErrorEnvelope>(&text)
            .map(|envelope| envelope.error.message)
            .unwrap_or_default();

        if status.is_client_error() {
            debug!("identity {endpoint} rejected: {code}");
            Err(AppError::auth_failed(map_error_code(&code)))
        } else {
            warn!("identity {endpoint} failed: {status}: {code}");
            Err(AppError::upstream(
                "identity",
                format!("{endpoint} returned {status}"),
            ))
        }
    }
}

/// Translate a provider error code into a user-facing message
fn map_error_code(code: &str) -> &'static str {
    // WEAK_PASSWORD arrives with a suffix ("WEAK_PASSWORD : Password should...")
    if code.starts_with("WEAK_PASSWORD") {
        return "Password is too weak";
    }
    if code.starts_with("TOO_MANY_ATTEMPTS_TRY_LATER") {
        return "Too many attempts, please try again later";
    }

    match code {
        "EMAIL_EXISTS" => "Email already in use",
        "INVALID_EMAIL" | "MISSING_EMAIL" => "Invalid email",
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            "Invalid email or password"
        }
        "USER_DISABLED" => "This account has been disabled",
        _ => messages::AUTH_GENERIC_FAILURE,
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentity {
    async fn sign_up(&self, email: &str, password: &str) -> AppResult<AuthTokens> {
        self.credential_call("accounts:signUp", email, password)
            .await
    }

    async fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthTokens> {
        self.credential_call("accounts:signInWithPassword", email, password)
            .await
    }
}
