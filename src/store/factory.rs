// ABOUTME: Store factory and backend abstraction for runtime backend selection
// ABOUTME: Wraps the Firestore and memory stores behind one delegating enum
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chi Wellness

//! Store factory for creating document store backends
//!
//! Backend selection happens once at startup from configuration; the enum
//! keeps call sites monomorphic without trait objects.

use crate::config::environment::{StoreBackend, StoreConfig};
use crate::models::{AgeBucket, DailyRecord, GeoLocation, UserProfile};
use crate::recommendations::BucketRanges;
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::info;

use super::firestore::FirestoreStore;
use super::memory::MemoryStore;
use super::HealthStore;

/// Store instance wrapper that delegates to the configured backend
#[derive(Debug, Clone)]
pub enum Store {
    /// Hosted Firestore documents
    Firestore(FirestoreStore),
    /// In-process maps
    Memory(MemoryStore),
}

impl Store {
    /// Get a descriptive string for the current backend
    #[must_use]
    pub const fn backend_info(&self) -> &'static str {
        match self {
            Self::Firestore(_) => "Firestore (Hosted Documents)",
            Self::Memory(_) => "Memory (In-Process)",
        }
    }

    /// Create a store instance from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the Firestore client cannot be constructed.
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        match config.backend {
            StoreBackend::Firestore => {
                info!("Initializing Firestore store for project {}", config.project_id);
                Ok(Self::Firestore(FirestoreStore::new(config)?))
            }
            StoreBackend::Memory => {
                info!("Initializing in-memory store");
                Ok(Self::Memory(MemoryStore::new()))
            }
        }
    }
}

#[async_trait]
impl HealthStore for Store {
    async fn get_profile(&self, uid: &str) -> Result<Option<UserProfile>> {
        match self {
            Self::Firestore(store) => store.get_profile(uid).await,
            Self::Memory(store) => store.get_profile(uid).await,
        }
    }

    async fn upsert_profile(&self, uid: &str, profile: &UserProfile) -> Result<()> {
        match self {
            Self::Firestore(store) => store.upsert_profile(uid, profile).await,
            Self::Memory(store) => store.upsert_profile(uid, profile).await,
        }
    }

    async fn get_daily_record(&self, uid: &str, date: NaiveDate) -> Result<Option<DailyRecord>> {
        match self {
            Self::Firestore(store) => store.get_daily_record(uid, date).await,
            Self::Memory(store) => store.get_daily_record(uid, date).await,
        }
    }

    async fn upsert_daily_record(&self, uid: &str, record: &DailyRecord) -> Result<()> {
        match self {
            Self::Firestore(store) => store.upsert_daily_record(uid, record).await,
            Self::Memory(store) => store.upsert_daily_record(uid, record).await,
        }
    }

    async fn get_location(&self, uid: &str) -> Result<Option<GeoLocation>> {
        match self {
            Self::Firestore(store) => store.get_location(uid).await,
            Self::Memory(store) => store.get_location(uid).await,
        }
    }

    async fn set_location(&self, uid: &str, location: &GeoLocation) -> Result<()> {
        match self {
            Self::Firestore(store) => store.set_location(uid, location).await,
            Self::Memory(store) => store.set_location(uid, location).await,
        }
    }

    async fn put_session(&self, token: &str, uid: &str) -> Result<()> {
        match self {
            Self::Firestore(store) => store.put_session(token, uid).await,
            Self::Memory(store) => store.put_session(token, uid).await,
        }
    }

    async fn get_session(&self, token: &str) -> Result<Option<String>> {
        match self {
            Self::Firestore(store) => store.get_session(token).await,
            Self::Memory(store) => store.get_session(token).await,
        }
    }

    async fn clear_sessions(&self) -> Result<()> {
        match self {
            Self::Firestore(store) => store.clear_sessions().await,
            Self::Memory(store) => store.clear_sessions().await,
        }
    }

    async fn get_bucket_ranges(&self, bucket: AgeBucket) -> Result<Option<BucketRanges>> {
        match self {
            Self::Firestore(store) => store.get_bucket_ranges(bucket).await,
            Self::Memory(store) => store.get_bucket_ranges(bucket).await,
        }
    }
}
