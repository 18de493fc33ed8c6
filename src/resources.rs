// ABOUTME: Centralized resource container for dependency injection
// ABOUTME: Holds the store, identity, generator, and session handles built once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chi Wellness

//! # Server Resources Module
//!
//! Centralized resource container for dependency injection. The external
//! client handles are constructed exactly once at process start, shared
//! behind an `Arc`, and never mutated afterwards; handlers receive them as
//! axum state instead of reaching for module-level globals.

use crate::auth::SessionManager;
use crate::config::environment::ServerConfig;
use crate::identity::Identity;
use crate::llm::AdviceGenerator;
use crate::models::AgeBucket;
use crate::recommendations::ReferenceTable;
use crate::store::{HealthStore, Store};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Document store handle
    pub store: Store,
    /// Identity provider handle
    pub identity: Identity,
    /// Advice generator handle
    pub advice: AdviceGenerator,
    /// Session manager over the store's sessions collection
    pub sessions: SessionManager,
    /// Recommendation reference table, resolved once at startup
    pub reference_table: ReferenceTable,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Assemble resources from already-constructed collaborators
    #[must_use]
    pub fn new(
        store: Store,
        identity: Identity,
        advice: AdviceGenerator,
        reference_table: ReferenceTable,
        config: Arc<ServerConfig>,
    ) -> Self {
        let sessions = SessionManager::new(store.clone());
        Self {
            store,
            identity,
            advice,
            sessions,
            reference_table,
            config,
        }
    }

    /// Build every collaborator from configuration
    ///
    /// Loads per-bucket recommendation overrides from the store, falling
    /// back to the builtin table for buckets without an override document.
    ///
    /// # Errors
    ///
    /// Returns an error when a client cannot be constructed or the store is
    /// unreachable while loading reference data.
    pub async fn from_config(config: ServerConfig) -> Result<Self> {
        let store = Store::from_config(&config.store)?;
        info!("Store initialized: {}", store.backend_info());

        let identity = Identity::from_config(&config.identity, config.store.backend)?;
        info!("Identity provider initialized: {}", identity.provider_info());

        let advice = AdviceGenerator::from_config(&config.llm)?;

        let reference_table = load_reference_table(&store).await?;

        Ok(Self::new(
            store,
            identity,
            advice,
            reference_table,
            Arc::new(config),
        ))
    }
}

/// Builtin reference table with any store-supplied bucket overrides applied
///
/// # Errors
///
/// Returns an error when the store cannot be read.
pub async fn load_reference_table(store: &Store) -> Result<ReferenceTable> {
    let mut table = ReferenceTable::builtin();
    let mut overrides = 0;

    for bucket in AgeBucket::ALL {
        if let Some(ranges) = store.get_bucket_ranges(bucket).await? {
            table.set_bucket(bucket, ranges);
            overrides += 1;
        }
    }

    if overrides > 0 {
        info!("Loaded {overrides} recommendation override document(s) from the store");
    } else {
        debug!("No recommendation overrides in the store; using builtin table");
    }
    Ok(table)
}
