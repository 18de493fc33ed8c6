// ABOUTME: HTTP integration tests for authentication routes
// ABOUTME: Tests login and signup including error message mapping and sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chi Wellness

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use chi_wellness_server::routes;
use helpers::axum_test::AxumTestRequest;
use serde_json::json;

#[tokio::test]
async fn test_signup_returns_token_and_seeds_today_record() {
    let setup = common::create_test_resources();
    let app = routes::router(setup.resources.clone());

    let response = AxumTestRequest::post("/signup")
        .json(&json!({ "email": "a@b.com", "password": "secret1" }))
        .send(app)
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.json();
    assert_eq!(body["message"], "Signup successful!");
    let token = body["accessToken"].as_str().unwrap();
    assert!(!token.is_empty());

    // The session resolves and today's record exists
    let uid = setup.resources.sessions.resolve(token).await.unwrap();
    let today = chrono::Utc::now().date_naive();
    use chi_wellness_server::store::HealthStore;
    let record = setup
        .store
        .get_daily_record(&uid, today)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.water_oz, 0.0);
    assert!(record.journal.is_empty());
}

#[tokio::test]
async fn test_duplicate_signup_maps_to_email_in_use() {
    let setup = common::create_test_resources();

    let first = AxumTestRequest::post("/signup")
        .json(&json!({ "email": "a@b.com", "password": "secret1" }))
        .send(routes::router(setup.resources.clone()))
        .await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = AxumTestRequest::post("/signup")
        .json(&json!({ "email": "a@b.com", "password": "secret1" }))
        .send(routes::router(setup.resources.clone()))
        .await;

    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    assert_eq!(second.json()["message"], "Email already in use");
}

#[tokio::test]
async fn test_login_with_wrong_password_is_rejected() {
    let setup = common::create_test_resources();

    AxumTestRequest::post("/signup")
        .json(&json!({ "email": "a@b.com", "password": "secret1" }))
        .send(routes::router(setup.resources.clone()))
        .await;

    let response = AxumTestRequest::post("/login")
        .json(&json!({ "email": "a@b.com", "password": "wrong0" }))
        .send(routes::router(setup.resources.clone()))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_login_mints_fresh_session() {
    let setup = common::create_test_resources();

    AxumTestRequest::post("/signup")
        .json(&json!({ "email": "a@b.com", "password": "secret1" }))
        .send(routes::router(setup.resources.clone()))
        .await;

    let response = AxumTestRequest::post("/login")
        .json(&json!({ "email": "a@b.com", "password": "secret1" }))
        .send(routes::router(setup.resources.clone()))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let token = response.json()["accessToken"].as_str().unwrap().to_owned();
    assert!(setup.resources.sessions.resolve(&token).await.is_ok());
}

#[tokio::test]
async fn test_missing_fields_are_rejected() {
    let setup = common::create_test_resources();

    let no_password = AxumTestRequest::post("/login")
        .json(&json!({ "email": "a@b.com" }))
        .send(routes::router(setup.resources.clone()))
        .await;
    assert_eq!(no_password.status(), StatusCode::BAD_REQUEST);

    let no_email = AxumTestRequest::post("/signup")
        .json(&json!({ "password": "secret1" }))
        .send(routes::router(setup.resources.clone()))
        .await;
    assert_eq!(no_email.status(), StatusCode::BAD_REQUEST);
}
