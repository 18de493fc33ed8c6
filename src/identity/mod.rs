// ABOUTME: Identity provider abstraction for login and signup delegation
// ABOUTME: Defines the IdentityProvider trait plus the runtime provider selector
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chi Wellness

//! # Identity Provider Service Provider Interface
//!
//! Account credentials live with a hosted identity service; this module
//! defines the contract the server programs against. Providers mint the
//! opaque access token that becomes the session key, and surface their error
//! codes so the handlers can map them to specific user-facing messages.

mod firebase;
mod memory;

pub use firebase::FirebaseIdentity;
pub use memory::MemoryIdentity;

use crate::config::environment::{IdentityConfig, StoreBackend};
use crate::errors::AppResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Credentials minted by the identity provider on login or signup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokens {
    /// Stable user id assigned by the provider
    pub uid: String,
    /// Opaque access token, used as the session key
    pub access_token: String,
}

/// Contract for the hosted identity service
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an account and mint tokens for it
    ///
    /// # Errors
    ///
    /// Returns an auth failure with a user-facing message when the provider
    /// rejects the credentials (email in use, weak password, ...), or an
    /// upstream error when the service cannot be reached.
    async fn sign_up(&self, email: &str, password: &str) -> AppResult<AuthTokens>;

    /// Authenticate an existing account and mint fresh tokens
    ///
    /// # Errors
    ///
    /// Returns an auth failure with a user-facing message for rejected
    /// credentials, or an upstream error when the service cannot be reached.
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthTokens>;
}

/// Identity instance wrapper that delegates to the configured provider
///
/// Selection follows the store backend: a memory-backed deployment has no
/// hosted credentials to call out to, so it gets the in-process provider.
#[derive(Debug, Clone)]
pub enum Identity {
    /// Hosted Firebase Authentication
    Firebase(FirebaseIdentity),
    /// In-process account table
    Memory(MemoryIdentity),
}

impl Identity {
    /// Get a descriptive string for the current provider
    #[must_use]
    pub const fn provider_info(&self) -> &'static str {
        match self {
            Self::Firebase(_) => "Firebase Authentication",
            Self::Memory(_) => "Memory (In-Process)",
        }
    }

    /// Create an identity provider from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &IdentityConfig, backend: StoreBackend) -> anyhow::Result<Self> {
        match backend {
            StoreBackend::Firestore => {
                info!("Initializing Firebase identity provider");
                Ok(Self::Firebase(FirebaseIdentity::new(config)?))
            }
            StoreBackend::Memory => {
                info!("Initializing in-memory identity provider");
                Ok(Self::Memory(MemoryIdentity::new()))
            }
        }
    }
}

#[async_trait]
impl IdentityProvider for Identity {
    async fn sign_up(&self, email: &str, password: &str) -> AppResult<AuthTokens> {
        match self {
            Self::Firebase(provider) => provider.sign_up(email, password).await,
            Self::Memory(provider) => provider.sign_up(email, password).await,
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthTokens> {
        match self {
            Self::Firebase(provider) => provider.sign_in(email, password).await,
            Self::Memory(provider) => provider.sign_in(email, password).await,
        }
    }
}
