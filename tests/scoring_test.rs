// ABOUTME: Integration tests for the lifestyle score calculator over the memory store
// ABOUTME: Validates floor, ceiling, missing-day, and purity semantics end to end
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chi Wellness

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chi_wellness_server::errors::ErrorCode;
use chi_wellness_server::models::{DailyRecord, Gender, UserProfile};
use chi_wellness_server::recommendations::ReferenceTable;
use chi_wellness_server::scoring::compute_score;
use chi_wellness_server::store::{HealthStore, MemoryStore, Store};
use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};

const UID: &str = "user-1";

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 4, 12, 0, 0).unwrap()
}

fn adult_profile() -> UserProfile {
    UserProfile {
        birthday: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
        gender: Gender::Male,
        height_feet: 5.9,
        weight_lbs: 160.0,
    }
}

async fn setup(profile: Option<UserProfile>) -> Store {
    let store = Store::Memory(MemoryStore::new());
    if let Some(profile) = profile {
        store.upsert_profile(UID, &profile).await.unwrap();
    }
    store
}

async fn insert_day(store: &Store, days_ago: u64, water: f64, sleep: f64, exercise: f64) {
    let date = fixed_now()
        .date_naive()
        .checked_sub_days(Days::new(days_ago))
        .unwrap();
    let record = DailyRecord {
        date,
        water_oz: water,
        sleep_hours: sleep,
        exercise_hours: exercise,
        journal: String::new(),
    };
    store.upsert_daily_record(UID, &record).await.unwrap();
}

#[tokio::test]
async fn test_missing_profile_fails_not_configured() {
    let store = setup(None).await;
    let table = ReferenceTable::builtin();
    let err = compute_score(&store, &table, UID, fixed_now())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::NotConfigured);
}

#[tokio::test]
async fn test_no_records_in_window_scores_exact_floor() {
    let store = setup(Some(adult_profile())).await;
    let table = ReferenceTable::builtin();

    // A record outside the 14-day window must not count
    insert_day(&store, 14, 100.0, 8.0, 1.0).await;

    let score = compute_score(&store, &table, UID, fixed_now()).await.unwrap();
    assert!((score - 0.15).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_fourteen_days_at_midpoint_scores_exactly_one() {
    let store = setup(Some(adult_profile())).await;
    let table = ReferenceTable::builtin();

    // Profile is a 26-year-old male: youngadult midpoints are
    // water 115 oz, sleep 8 h, exercise 1.125 h
    for days_ago in 0..14 {
        insert_day(&store, days_ago, 115.0, 8.0, 1.125).await;
    }

    let score = compute_score(&store, &table, UID, fixed_now()).await.unwrap();
    assert!((score - 1.0).abs() < 1e-12, "{score}");
}

#[tokio::test]
async fn test_missing_days_skipped_rather_than_zeroed() {
    let store = setup(Some(adult_profile())).await;
    let table = ReferenceTable::builtin();

    // Only three of the fourteen days have data, each exactly on target;
    // skipped days must not drag the mean down
    for days_ago in [0, 5, 13] {
        insert_day(&store, days_ago, 115.0, 8.0, 1.125).await;
    }

    let score = compute_score(&store, &table, UID, fixed_now()).await.unwrap();
    assert!((score - 1.0).abs() < 1e-12, "{score}");
}

#[tokio::test]
async fn test_score_within_bounds_and_repeatable() {
    let store = setup(Some(adult_profile())).await;
    let table = ReferenceTable::builtin();

    for days_ago in 0..14 {
        let f = days_ago as f64;
        insert_day(&store, days_ago, 20.0 * f, 0.7 * f, 0.1 * f).await;
    }

    let first = compute_score(&store, &table, UID, fixed_now()).await.unwrap();
    let second = compute_score(&store, &table, UID, fixed_now()).await.unwrap();

    assert!((0.15..=1.0).contains(&first), "{first}");
    // Read-only aggregation: recomputing over identical inputs is identical
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_half_of_target_scores_midway() {
    let store = setup(Some(adult_profile())).await;
    let table = ReferenceTable::builtin();

    for days_ago in 0..14 {
        insert_day(&store, days_ago, 57.5, 4.0, 0.5625).await;
    }

    // Every category ratio is 0.5, so raw = 0.5 and score = 0.15 + 0.85*0.5
    let score = compute_score(&store, &table, UID, fixed_now()).await.unwrap();
    assert!((score - 0.575).abs() < 1e-12, "{score}");
}

#[tokio::test]
async fn test_child_user_scores_against_child_targets() {
    let profile = UserProfile {
        birthday: NaiveDate::from_ymd_opt(2016, 1, 1).unwrap(),
        gender: Gender::Female,
        height_feet: 4.5,
        weight_lbs: 80.0,
    };
    let store = setup(Some(profile)).await;
    let table = ReferenceTable::builtin();

    // Child midpoints: water 50 oz, sleep 10.5 h, exercise 1.5 h
    insert_day(&store, 0, 50.0, 10.5, 1.5).await;

    let score = compute_score(&store, &table, UID, fixed_now()).await.unwrap();
    assert!((score - 1.0).abs() < 1e-12, "{score}");
}
