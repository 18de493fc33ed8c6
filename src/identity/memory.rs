// ABOUTME: In-memory identity provider used by tests and credential-free local runs
// ABOUTME: Plain account table minting random hex access tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chi Wellness

//! In-memory identity provider
//!
//! Accounts exist only for the process lifetime. Passwords are held verbatim:
//! this provider never runs against real user credentials.

use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use dashmap::DashMap;
use rand::RngCore;
use std::sync::Arc;
use uuid::Uuid;

use super::{AuthTokens, IdentityProvider};

/// Stored account entry
#[derive(Debug, Clone)]
struct Account {
    uid: String,
    password: String,
}

/// Memory-backed identity provider
#[derive(Debug, Clone, Default)]
pub struct MemoryIdentity {
    accounts: Arc<DashMap<String, Account>>,
}

impl MemoryIdentity {
    /// Create a provider with no accounts
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn mint_token() -> String {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        hex::encode(bytes)
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentity {
    async fn sign_up(&self, email: &str, password: &str) -> AppResult<AuthTokens> {
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::auth_failed("Invalid email"));
        }
        if password.len() < 6 {
            return Err(AppError::auth_failed("Password is too weak"));
        }
        if self.accounts.contains_key(email) {
            return Err(AppError::auth_failed("Email already in use"));
        }

        let uid = Uuid::new_v4().to_string();
        self.accounts.insert(
            email.to_owned(),
            Account {
                uid: uid.clone(),
                password: password.to_owned(),
            },
        );

        Ok(AuthTokens {
            uid,
            access_token: Self::mint_token(),
        })
    }

    async fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthTokens> {
        let Some(account) = self.accounts.get(email).map(|a| a.value().clone()) else {
            return Err(AppError::auth_failed("Invalid email or password"));
        };
        if account.password != password {
            return Err(AppError::auth_failed("Invalid email or password"));
        }

        Ok(AuthTokens {
            uid: account.uid,
            access_token: Self::mint_token(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_signup_then_login() {
        let identity = MemoryIdentity::new();
        let created = identity.sign_up("a@b.com", "secret1").await.unwrap();
        let logged_in = identity.sign_in("a@b.com", "secret1").await.unwrap();

        assert_eq!(created.uid, logged_in.uid);
        // Each login mints a fresh token
        assert_ne!(created.access_token, logged_in.access_token);
    }

    #[tokio::test]
    async fn test_duplicate_signup_rejected() {
        let identity = MemoryIdentity::new();
        identity.sign_up("a@b.com", "secret1").await.unwrap();
        let err = identity.sign_up("a@b.com", "secret1").await.unwrap_err();
        assert_eq!(err.message, "Email already in use");
    }

    #[tokio::test]
    async fn test_wrong_password_rejected() {
        let identity = MemoryIdentity::new();
        identity.sign_up("a@b.com", "secret1").await.unwrap();
        let err = identity.sign_in("a@b.com", "nope00").await.unwrap_err();
        assert_eq!(err.message, "Invalid email or password");
    }
}
