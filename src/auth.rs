// ABOUTME: Session management over the document store's sessions collection
// ABOUTME: Opens token-to-uid entries at login and resolves them per request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chi Wellness

//! Session resolution
//!
//! The identity provider mints the opaque access token; this layer records
//! `{token -> uid}` in the sessions collection at login/signup and resolves
//! the token on every subsequent request. The collection is wiped once at
//! process startup, so a restart invalidates every outstanding session.

use crate::errors::{AppError, AppResult};
use crate::identity::AuthTokens;
use crate::store::{HealthStore, Store};
use tracing::{debug, info};

/// Session manager bound to the configured store
#[derive(Clone)]
pub struct SessionManager {
    store: Store,
}

impl SessionManager {
    /// Create a manager over the shared store handle
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Record a session for freshly minted tokens
    ///
    /// # Errors
    ///
    /// Returns a storage error when the sessions collection cannot be written.
    pub async fn open_session(&self, tokens: &AuthTokens) -> AppResult<()> {
        self.store
            .put_session(&tokens.access_token, &tokens.uid)
            .await?;
        debug!("session opened for uid {}", tokens.uid);
        Ok(())
    }

    /// Resolve a session token to a uid
    ///
    /// # Errors
    ///
    /// Returns [`AppError::invalid_session`] when the token is empty or
    /// unknown; the caller must log in again.
    pub async fn resolve(&self, token: &str) -> AppResult<String> {
        if token.is_empty() {
            return Err(AppError::invalid_session());
        }

        self.store
            .get_session(token)
            .await?
            .ok_or_else(AppError::invalid_session)
    }

    /// Delete every session entry; called once at startup
    ///
    /// # Errors
    ///
    /// Returns a storage error when the sessions collection cannot be cleared.
    pub async fn clear_all(&self) -> AppResult<()> {
        self.store.clear_sessions().await?;
        info!("sessions store cleared; all prior sessions invalidated");
        Ok(())
    }
}
