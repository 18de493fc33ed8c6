// ABOUTME: Unified error handling system with standard error codes and HTTP responses
// ABOUTME: Maps domain failures to the JSON {message} bodies the mobile clients expect
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chi Wellness

//! # Unified Error Handling System
//!
//! This module provides the centralized error handling system for the Chi
//! Wellness API server. It defines standard error codes, error construction
//! helpers, and HTTP response formatting so every handler fails the same way:
//! a status code plus a JSON `{"message": ...}` body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Sessions (1000-1999)
    /// Session token does not resolve to a user; caller must log in again
    #[serde(rename = "SESSION_INVALID")]
    SessionInvalid = 1001,

    // Validation (3000-3999)
    /// Malformed or out-of-range request field, user-correctable
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// A required field is missing from the request body
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField = 3001,

    // Account state (4000-4999)
    /// User profile or today's record absent; caller must complete setup first
    #[serde(rename = "NOT_CONFIGURED")]
    NotConfigured = 4000,

    // External services (5000-5999)
    /// Identity or generation service failed or timed out
    #[serde(rename = "UPSTREAM_UNAVAILABLE")]
    UpstreamUnavailable = 5001,
    /// The identity provider rejected the supplied credentials
    #[serde(rename = "EXTERNAL_AUTH_FAILED")]
    ExternalAuthFailed = 5002,

    // Configuration (6000-6999)
    /// Configuration error encountered at startup or request time
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,

    // Internal errors (9000-9999)
    /// An unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Document store operation failed
    #[serde(rename = "STORAGE_ERROR")]
    StorageError = 9002,
    /// Data serialization/deserialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            // 400 Bad Request: user-correctable, including stale sessions
            // (clients re-login on 400 from these endpoints)
            Self::InvalidInput
            | Self::MissingRequiredField
            | Self::SessionInvalid
            | Self::NotConfigured
            | Self::ExternalAuthFailed => 400,

            // 502 Bad Gateway
            Self::UpstreamUnavailable => 502,

            // 500 Internal Server Error
            Self::InternalError
            | Self::StorageError
            | Self::SerializationError
            | Self::ConfigError => 500,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::SessionInvalid => "The session token is invalid or expired",
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing from the request",
            Self::NotConfigured => "The account is missing required setup data",
            Self::UpstreamUnavailable => "An external service is currently unavailable",
            Self::ExternalAuthFailed => "Authentication with the identity service failed",
            Self::ConfigError => "Configuration error encountered",
            Self::InternalError => "An internal server error occurred",
            Self::StorageError => "Document store operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

/// Additional context that can be attached to errors
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorContext {
    /// User id if available (identity-provider uid, not locally minted)
    pub user_id: Option<String>,
    /// Resource identifier if applicable (document path, endpoint)
    pub resource_id: Option<String>,
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message, sent verbatim in the `{message}` body
    pub message: String,
    /// Additional context
    pub context: ErrorContext,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Add a user id to the error context
    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.context.user_id = Some(user_id.into());
        self
    }

    /// Add a resource id to the error context
    #[must_use]
    pub fn with_resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.context.resource_id = Some(resource_id.into());
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub fn http_status(&self) -> u16 {
        self.code.http_status()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// HTTP error response format: the clients only ever read `message`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// User-facing failure message
    pub message: String,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            message: error.message,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(code = ?self.code, "request failed: {self}");
        } else {
            tracing::debug!(code = ?self.code, "request rejected: {}", self.message);
        }

        (status, Json(ErrorResponse::from(self))).into_response()
    }
}

/// Convenience functions for creating common errors
impl AppError {
    /// Invalid session token
    #[must_use]
    pub fn invalid_session() -> Self {
        Self::new(ErrorCode::SessionInvalid, "Invalid session")
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Missing required field
    #[must_use]
    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("Missing required field: {field}"),
        )
    }

    /// Account setup incomplete (no profile, no record for today, ...)
    pub fn not_configured(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotConfigured, message)
    }

    /// External service unavailable or timed out
    pub fn upstream(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::UpstreamUnavailable,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// Identity provider rejected the credentials
    pub fn auth_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExternalAuthFailed, message)
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Document store error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }
}

/// Conversion from `anyhow::Error` (store trait boundary) to `AppError`
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::new(ErrorCode::StorageError, error.to_string())
    }
}
