// ABOUTME: Integration tests for the document store abstraction
// ABOUTME: Round-trips models through the factory enum and the Firestore REST client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chi Wellness

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chi_wellness_server::config::environment::{StoreBackend, StoreConfig};
use chi_wellness_server::models::{DailyRecord, GeoLocation};
use chi_wellness_server::store::{FirestoreStore, HealthStore, MemoryStore, Store};
use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 4).unwrap()
}

#[tokio::test]
async fn test_memory_record_field_round_trip() {
    let store = Store::Memory(MemoryStore::new());

    let mut record = DailyRecord::empty(today());
    record.water_oz = 32.0;
    store.upsert_daily_record("u1", &record).await.unwrap();

    let loaded = store.get_daily_record("u1", today()).await.unwrap().unwrap();
    assert_eq!(loaded.water_oz, 32.0);
    assert_eq!(loaded.sleep_hours, 0.0);
    assert_eq!(loaded.journal, "");
}

#[tokio::test]
async fn test_memory_location_round_trip() {
    let store = Store::Memory(MemoryStore::new());
    let location = GeoLocation {
        latitude: 42.3601,
        longitude: -71.0589,
        label: Some("Boston".into()),
    };

    store.set_location("u1", &location).await.unwrap();
    let loaded = store.get_location("u1").await.unwrap().unwrap();
    assert_eq!(loaded, location);
    assert_eq!(loaded.display_label(), "Boston");
}

#[tokio::test]
async fn test_backend_info_strings() {
    let store = Store::Memory(MemoryStore::new());
    assert_eq!(store.backend_info(), "Memory (In-Process)");
}

fn firestore_config(base_url: String) -> StoreConfig {
    StoreConfig {
        backend: StoreBackend::Firestore,
        project_id: "chi-test".into(),
        api_key: "test-key".into(),
        base_url,
    }
}

#[tokio::test]
async fn test_firestore_get_daily_record_decodes_typed_values() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/projects/chi-test/databases/(default)/documents/records/u1_2026-08-04",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "projects/chi-test/databases/(default)/documents/records/u1_2026-08-04",
            "fields": {
                "date": { "stringValue": "2026-08-04" },
                "waterOz": { "doubleValue": 32.0 },
                "sleepHours": { "integerValue": "8" },
                "exerciseHours": { "doubleValue": 1.0 },
                "journal": { "stringValue": "felt good" }
            }
        })))
        .mount(&server)
        .await;

    let store = FirestoreStore::new(&firestore_config(server.uri())).unwrap();
    let record = store.get_daily_record("u1", today()).await.unwrap().unwrap();

    assert_eq!(record.water_oz, 32.0);
    assert_eq!(record.sleep_hours, 8.0);
    assert_eq!(record.journal, "felt good");
}

#[tokio::test]
async fn test_firestore_missing_document_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "code": 404, "status": "NOT_FOUND" }
        })))
        .mount(&server)
        .await;

    let store = FirestoreStore::new(&firestore_config(server.uri())).unwrap();
    assert!(store.get_profile("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn test_firestore_upsert_encodes_typed_values() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path(
            "/projects/chi-test/databases/(default)/documents/records/u1_2026-08-04",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "projects/chi-test/databases/(default)/documents/records/u1_2026-08-04"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = FirestoreStore::new(&firestore_config(server.uri())).unwrap();
    let mut record = DailyRecord::empty(today());
    record.water_oz = 32.0;
    store.upsert_daily_record("u1", &record).await.unwrap();
}

#[tokio::test]
async fn test_firestore_server_error_surfaces() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let store = FirestoreStore::new(&firestore_config(server.uri())).unwrap();
    assert!(store.get_profile("u1").await.is_err());
}

#[tokio::test]
async fn test_firestore_clear_sessions_lists_and_deletes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/projects/chi-test/databases/(default)/documents/sessions",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [
                { "name": "projects/chi-test/databases/(default)/documents/sessions/tok-a" },
                { "name": "projects/chi-test/databases/(default)/documents/sessions/tok-b" }
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(2)
        .mount(&server)
        .await;

    let store = FirestoreStore::new(&firestore_config(server.uri())).unwrap();
    store.clear_sessions().await.unwrap();
}
