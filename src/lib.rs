// ABOUTME: Main library entry point for the Chi Wellness API server
// ABOUTME: Backend-for-frontend over hosted identity, document storage, and text generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chi Wellness

#![deny(unsafe_code)]

//! # Chi Wellness API Server
//!
//! A thin backend-for-frontend for the Chi personal wellness app. Accounts
//! live with a hosted identity service, per-day health metrics live in a
//! hosted document store, and advice text comes from a generative model; this
//! server validates input, resolves sessions, and runs the one piece of real
//! domain logic it owns: the lifestyle score calculator and its
//! recommendation resolver.
//!
//! ## Architecture
//!
//! - **Models**: profile, daily record, and reference-range types
//! - **Store**: document store abstraction (Firestore or in-memory)
//! - **Identity**: login/signup delegation with provider error mapping
//! - **Recommendations**: age/gender-bucketed target ranges
//! - **Scoring**: 14-day weighted lifestyle score
//! - **LLM**: advice prompt assembly and Gemini generation
//! - **Routes**: the JSON-over-HTTP endpoints the mobile clients call
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chi_wellness_server::config::environment::ServerConfig;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = ServerConfig::from_env()?;
//! println!("Chi Wellness API configured for port {}", config.http_port);
//! # Ok(())
//! # }
//! ```

/// Session management over the store's sessions collection
pub mod auth;

/// Configuration management from environment variables
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Identity provider abstraction (Firebase Authentication, in-memory)
pub mod identity;

/// LLM provider abstraction and advice prompt assembly
pub mod llm;

/// Production logging and structured output
pub mod logging;

/// Common data models for wellness data
pub mod models;

/// Recommended-range resolution over the reference table
pub mod recommendations;

/// Centralized resource container for dependency injection
pub mod resources;

/// `HTTP` routes for authentication and wellness data
pub mod routes;

/// Lifestyle score calculation over the rolling record window
pub mod scoring;

/// Document store abstraction layer with pluggable backends
pub mod store;
