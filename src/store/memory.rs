// ABOUTME: In-memory document store used by tests and credential-free local runs
// ABOUTME: DashMap-backed implementation of the HealthStore trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chi Wellness

//! In-memory store
//!
//! Per-document atomicity falls out of `DashMap`'s per-entry locking, so this
//! backend exhibits the same last-write-wins behavior under concurrent
//! requests as the hosted store.

use crate::models::{AgeBucket, DailyRecord, GeoLocation, UserProfile};
use crate::recommendations::BucketRanges;
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use std::sync::Arc;

use super::HealthStore;

/// Shared map state behind the cloneable handle
#[derive(Debug, Default)]
struct Inner {
    profiles: DashMap<String, UserProfile>,
    records: DashMap<(String, NaiveDate), DailyRecord>,
    locations: DashMap<String, GeoLocation>,
    sessions: DashMap<String, String>,
    recommended: DashMap<AgeBucket, BucketRanges>,
}

/// Memory-backed document store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a recommendation override document, mirroring hosted reference data
    pub fn seed_bucket_ranges(&self, bucket: AgeBucket, ranges: BucketRanges) {
        self.inner.recommended.insert(bucket, ranges);
    }
}

#[async_trait]
impl HealthStore for MemoryStore {
    async fn get_profile(&self, uid: &str) -> Result<Option<UserProfile>> {
        Ok(self.inner.profiles.get(uid).map(|p| p.value().clone()))
    }

    async fn upsert_profile(&self, uid: &str, profile: &UserProfile) -> Result<()> {
        self.inner.profiles.insert(uid.to_owned(), profile.clone());
        Ok(())
    }

    async fn get_daily_record(&self, uid: &str, date: NaiveDate) -> Result<Option<DailyRecord>> {
        Ok(self
            .inner
            .records
            .get(&(uid.to_owned(), date))
            .map(|r| r.value().clone()))
    }

    async fn upsert_daily_record(&self, uid: &str, record: &DailyRecord) -> Result<()> {
        self.inner
            .records
            .insert((uid.to_owned(), record.date), record.clone());
        Ok(())
    }

    async fn get_location(&self, uid: &str) -> Result<Option<GeoLocation>> {
        Ok(self.inner.locations.get(uid).map(|l| l.value().clone()))
    }

    async fn set_location(&self, uid: &str, location: &GeoLocation) -> Result<()> {
        self.inner
            .locations
            .insert(uid.to_owned(), location.clone());
        Ok(())
    }

    async fn put_session(&self, token: &str, uid: &str) -> Result<()> {
        self.inner
            .sessions
            .insert(token.to_owned(), uid.to_owned());
        Ok(())
    }

    async fn get_session(&self, token: &str) -> Result<Option<String>> {
        Ok(self.inner.sessions.get(token).map(|uid| uid.value().clone()))
    }

    async fn clear_sessions(&self) -> Result<()> {
        self.inner.sessions.clear();
        Ok(())
    }

    async fn get_bucket_ranges(&self, bucket: AgeBucket) -> Result<Option<BucketRanges>> {
        Ok(self.inner.recommended.get(&bucket).map(|r| r.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    #[tokio::test]
    async fn test_record_round_trip() {
        let store = MemoryStore::new();
        let date = NaiveDate::from_ymd_opt(2026, 8, 4).unwrap();
        let mut record = DailyRecord::empty(date);
        record.water_oz = 32.0;

        store.upsert_daily_record("u1", &record).await.unwrap();
        let loaded = store.get_daily_record("u1", date).await.unwrap().unwrap();
        assert_eq!(loaded.water_oz, 32.0);

        // A different day is a different document
        let other = date.succ_opt().unwrap();
        assert!(store.get_daily_record("u1", other).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sessions_clear_all() {
        let store = MemoryStore::new();
        store.put_session("tok-a", "u1").await.unwrap();
        store.put_session("tok-b", "u2").await.unwrap();

        assert_eq!(
            store.get_session("tok-a").await.unwrap().as_deref(),
            Some("u1")
        );

        store.clear_sessions().await.unwrap();
        assert!(store.get_session("tok-a").await.unwrap().is_none());
        assert!(store.get_session("tok-b").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_profile_round_trip() {
        let store = MemoryStore::new();
        let profile = UserProfile {
            birthday: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            gender: Gender::Male,
            height_feet: 5.9,
            weight_lbs: 160.0,
        };

        store.upsert_profile("u1", &profile).await.unwrap();
        assert_eq!(store.get_profile("u1").await.unwrap(), Some(profile));
    }
}
