// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Provides the legacy placeholder page plus a JSON health endpoint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chi Wellness

//! Health check routes for service monitoring
//!
//! `GET /` keeps the placeholder page the mobile clients probe during
//! development; `/health` serves monitoring infrastructure.

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    #[must_use]
    pub fn routes() -> axum::Router {
        use axum::{response::Html, routing::get, Json, Router};

        async fn root_handler() -> Html<&'static str> {
            Html("<pre>In Development</pre>")
        }

        async fn health_handler() -> Json<serde_json::Value> {
            Json(serde_json::json!({
                "status": "healthy",
                "timestamp": chrono::Utc::now().to_rfc3339()
            }))
        }

        Router::new()
            .route("/", get(root_handler))
            .route("/health", get(health_handler))
    }
}
