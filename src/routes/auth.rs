// ABOUTME: User authentication route handlers for login and signup
// ABOUTME: Delegates credentials to the identity provider and opens store-backed sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chi Wellness

//! Authentication routes
//!
//! Login and signup both delegate credential handling to the hosted identity
//! provider, record the minted token in the sessions store, and hand the
//! token back to the client. Signup also seeds today's daily record so a
//! fresh account has a document to update.

use crate::{
    errors::AppError,
    identity::IdentityProvider,
    models::DailyRecord,
    resources::ServerResources,
    store::HealthStore,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Login/signup request body
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    /// Account email
    #[serde(default)]
    pub email: String,
    /// Account password
    #[serde(default)]
    pub password: String,
}

/// Login/signup success response
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Outcome message
    pub message: String,
    /// Session token for subsequent requests
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

/// Authentication routes handler
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/login", post(Self::login))
            .route("/signup", post(Self::signup))
            .with_state(resources)
    }

    fn validate(request: &CredentialsRequest) -> Result<(), AppError> {
        if request.email.is_empty() {
            return Err(AppError::missing_field("email"));
        }
        if request.password.is_empty() {
            return Err(AppError::missing_field("password"));
        }
        Ok(())
    }

    /// Handle `POST /login`
    async fn login(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<CredentialsRequest>,
    ) -> Result<Response, AppError> {
        Self::validate(&request)?;

        let tokens = resources
            .identity
            .sign_in(&request.email, &request.password)
            .await?;
        resources.sessions.open_session(&tokens).await?;

        info!("login for uid {}", tokens.uid);
        Ok((
            StatusCode::OK,
            Json(AuthResponse {
                message: "Login successful!".into(),
                access_token: tokens.access_token,
            }),
        )
            .into_response())
    }

    /// Handle `POST /signup`
    async fn signup(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<CredentialsRequest>,
    ) -> Result<Response, AppError> {
        Self::validate(&request)?;

        let tokens = resources
            .identity
            .sign_up(&request.email, &request.password)
            .await?;
        resources.sessions.open_session(&tokens).await?;

        // New accounts start with an empty record for today
        let today = chrono::Utc::now().date_naive();
        resources
            .store
            .upsert_daily_record(&tokens.uid, &DailyRecord::empty(today))
            .await?;

        info!("new account created, uid {}", tokens.uid);
        Ok((
            StatusCode::OK,
            Json(AuthResponse {
                message: "Signup successful!".into(),
                access_token: tokens.access_token,
            }),
        )
            .into_response())
    }
}
