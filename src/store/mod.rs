// ABOUTME: Health-record store abstraction with pluggable document backends
// ABOUTME: Defines the HealthStore trait implemented by the Firestore and memory stores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chi Wellness

//! Document store abstraction layer
//!
//! Persistence is delegated to an external document store; this module defines
//! the per-document contract the rest of the server programs against. Every
//! operation reads or writes exactly one document, and the backing store's
//! per-document update is assumed atomic. Two simultaneous requests touching
//! the same user's record may race last-write-wins; that is accepted, not
//! guaranteed against.

use crate::models::{AgeBucket, DailyRecord, GeoLocation, UserProfile};
use crate::recommendations::BucketRanges;
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

pub mod factory;
pub mod firestore;
pub mod memory;

pub use factory::Store;
pub use firestore::FirestoreStore;
pub use memory::MemoryStore;

/// Core document store trait
///
/// All store implementations must implement this trait to provide a
/// consistent interface for the application layer.
#[async_trait]
pub trait HealthStore: Send + Sync + Clone {
    // ================================
    // User profiles
    // ================================

    /// Get a user's profile
    async fn get_profile(&self, uid: &str) -> Result<Option<UserProfile>>;

    /// Create or replace a user's profile
    async fn upsert_profile(&self, uid: &str, profile: &UserProfile) -> Result<()>;

    // ================================
    // Daily records
    // ================================

    /// Get the record for one user and calendar day
    async fn get_daily_record(&self, uid: &str, date: NaiveDate) -> Result<Option<DailyRecord>>;

    /// Create or replace the record for one user and calendar day
    async fn upsert_daily_record(&self, uid: &str, record: &DailyRecord) -> Result<()>;

    // ================================
    // Locations
    // ================================

    /// Get a user's last reported location
    async fn get_location(&self, uid: &str) -> Result<Option<GeoLocation>>;

    /// Replace a user's last reported location
    async fn set_location(&self, uid: &str, location: &GeoLocation) -> Result<()>;

    // ================================
    // Sessions
    // ================================

    /// Record a `{token -> uid}` session entry
    async fn put_session(&self, token: &str, uid: &str) -> Result<()>;

    /// Resolve a session token to a uid, `None` when the token is unknown
    async fn get_session(&self, token: &str) -> Result<Option<String>>;

    /// Delete every session entry (invoked once at process startup)
    async fn clear_sessions(&self) -> Result<()>;

    // ================================
    // Reference data
    // ================================

    /// Fetch the recommendation override document for one age bucket
    async fn get_bucket_ranges(&self, bucket: AgeBucket) -> Result<Option<BucketRanges>>;
}
