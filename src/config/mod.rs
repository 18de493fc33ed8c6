// ABOUTME: Configuration module for environment-driven server settings
// ABOUTME: Re-exports the typed ServerConfig assembled from process environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chi Wellness

//! Configuration management
//!
//! All runtime configuration enters through environment variables, parsed once
//! at startup into [`environment::ServerConfig`] and shared behind an `Arc`.

/// Environment-based configuration management
pub mod environment;

pub use environment::{
    Environment, IdentityConfig, LlmConfig, LogLevel, ServerConfig, StoreBackend, StoreConfig,
};
