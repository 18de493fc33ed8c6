// ABOUTME: Route module organization for the wellness API HTTP endpoints
// ABOUTME: Centralized router assembly over the shared resource container
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chi Wellness

//! Route modules for the Chi Wellness API
//!
//! Routes are organized by domain; each module contains route definitions and
//! thin handlers that delegate to the domain layers. The public endpoint
//! shapes are stable: every response body is JSON with at least a `message`
//! field, and failures carry only `message`.

/// Authentication routes (login, signup)
pub mod auth;
/// Health check and placeholder routes
pub mod health;
/// Wellness data routes (profile, daily metrics, score, advice, location)
pub mod wellness;

pub use auth::AuthRoutes;
pub use health::HealthRoutes;
pub use wellness::WellnessRoutes;

use crate::resources::ServerResources;
use axum::Router;
use std::sync::Arc;

/// Assemble the complete application router
#[must_use]
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes())
        .merge(AuthRoutes::routes(resources.clone()))
        .merge(WellnessRoutes::routes(resources))
}
