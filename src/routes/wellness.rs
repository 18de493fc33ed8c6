// ABOUTME: Wellness data route handlers for profile, daily metrics, score, advice, location
// ABOUTME: Validates input, resolves the session token, and delegates to the domain layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chi Wellness

//! Wellness routes
//!
//! Every endpoint is a POST carrying the session token in the body, the shape
//! the mobile clients have always sent. Handlers validate field presence and
//! range, resolve the token to a uid, perform one short chain of store calls,
//! and answer with a `{message, ...}` JSON body.
//!
//! Metric amounts arrive as JSON numbers or numeric strings (the form inputs
//! send strings); both are accepted and validated as finite values >= 0.

use crate::{
    constants::{defaults, limits, messages},
    errors::AppError,
    llm::{build_advice_prompt, LlmProvider},
    models::{Category, DailyRecord, Gender, GeoLocation, UserProfile},
    resources::ServerResources,
    scoring,
    store::HealthStore,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Profile setup request
#[derive(Debug, Deserialize)]
pub struct SetUserDataRequest {
    /// Session token
    #[serde(default)]
    pub token: String,
    /// ISO calendar date of birth
    #[serde(default)]
    pub birthday: String,
    /// One of the three recognized gender strings
    #[serde(default)]
    pub gender: String,
    /// Height in feet; number or numeric string
    #[serde(default)]
    pub height: Value,
    /// Weight in pounds; number or numeric string
    #[serde(default)]
    pub weight: Value,
}

/// Daily metric or journal update request
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    /// Session token
    #[serde(default)]
    pub token: String,
    /// New value: numeric for metrics, non-empty string for journals
    #[serde(default)]
    pub data: Value,
}

/// Token-only request (score, advice)
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    /// Session token
    #[serde(default)]
    pub token: String,
}

/// Location update request
#[derive(Debug, Deserialize)]
pub struct UpdateLocationRequest {
    /// Session token
    #[serde(default)]
    pub token: String,
    /// Latitude in degrees; number or numeric string
    #[serde(default)]
    pub latitude: Value,
    /// Longitude in degrees; number or numeric string
    #[serde(default)]
    pub longitude: Value,
    /// Optional client-resolved place label
    #[serde(default)]
    pub label: Option<String>,
}

/// Plain outcome response
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Outcome message
    pub message: String,
}

/// Lifestyle score response
#[derive(Debug, Serialize, Deserialize)]
pub struct ScoreResponse {
    /// Outcome message
    pub message: String,
    /// Score in [0.15, 1.0]
    pub score: f64,
}

/// Advice response
#[derive(Debug, Serialize, Deserialize)]
pub struct AdviceResponse {
    /// Outcome message
    pub message: String,
    /// Generated advice text, or "Invalid" on a soft upstream failure
    pub advice: String,
}

// ============================================================================
// Wellness Routes
// ============================================================================

/// Wellness routes handler
pub struct WellnessRoutes;

impl WellnessRoutes {
    /// Create all wellness routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/set_user_data", post(Self::set_user_data))
            .route("/update_water", post(Self::update_water))
            .route("/update_sleep", post(Self::update_sleep))
            .route("/update_exercise", post(Self::update_exercise))
            .route("/update_journal", post(Self::update_journal))
            .route("/get_lifestyle_score", post(Self::get_lifestyle_score))
            .route("/get_advice", post(Self::get_advice))
            .route("/update_location", post(Self::update_location))
            .with_state(resources)
    }

    /// Handle `POST /set_user_data`
    async fn set_user_data(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<SetUserDataRequest>,
    ) -> Result<Response, AppError> {
        let uid = resources.sessions.resolve(&request.token).await?;

        let birthday = NaiveDate::parse_from_str(&request.birthday, "%Y-%m-%d")
            .map_err(|_| AppError::invalid_input(messages::INVALID_BIRTHDAY))?;

        let gender = Gender::parse_strict(&request.gender)
            .ok_or_else(|| AppError::invalid_input(messages::INVALID_GENDER))?;

        let height_feet = numeric_field(&request.height)
            .filter(|h| *h > limits::HEIGHT_FEET_MIN && *h <= limits::HEIGHT_FEET_MAX)
            .ok_or_else(|| AppError::invalid_input(messages::INVALID_HEIGHT))?;

        let weight_lbs = numeric_field(&request.weight)
            .filter(|w| *w >= limits::WEIGHT_LBS_MIN)
            .ok_or_else(|| AppError::invalid_input(messages::INVALID_WEIGHT))?;

        let profile = UserProfile {
            birthday,
            gender,
            height_feet,
            weight_lbs,
        };
        resources.store.upsert_profile(&uid, &profile).await?;

        info!("profile updated for uid {uid}");
        Ok(message_ok("User data updated!"))
    }

    /// Handle `POST /update_water`
    async fn update_water(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<UpdateRequest>,
    ) -> Result<Response, AppError> {
        Self::update_metric(&resources, request, Category::Water).await
    }

    /// Handle `POST /update_sleep`
    async fn update_sleep(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<UpdateRequest>,
    ) -> Result<Response, AppError> {
        Self::update_metric(&resources, request, Category::Sleep).await
    }

    /// Handle `POST /update_exercise`
    async fn update_exercise(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<UpdateRequest>,
    ) -> Result<Response, AppError> {
        Self::update_metric(&resources, request, Category::Exercise).await
    }

    /// Shared read-modify-write for the three metric endpoints
    ///
    /// The whole operation is scoped to this one request; concurrent updates
    /// to the same record resolve last-write-wins at the store.
    async fn update_metric(
        resources: &ServerResources,
        request: UpdateRequest,
        category: Category,
    ) -> Result<Response, AppError> {
        let uid = resources.sessions.resolve(&request.token).await?;

        let amount = numeric_field(&request.data)
            .filter(|a| a.is_finite() && *a >= 0.0)
            .ok_or_else(|| AppError::invalid_input(messages::INVALID_AMOUNT))?;

        let today = Utc::now().date_naive();
        let mut record = resources
            .store
            .get_daily_record(&uid, today)
            .await?
            .unwrap_or_else(|| DailyRecord::empty(today));
        record.set_amount(category, amount);
        resources.store.upsert_daily_record(&uid, &record).await?;

        info!("{} updated for uid {uid}", category.as_str());
        Ok(message_ok("Data updated!"))
    }

    /// Handle `POST /update_journal`
    async fn update_journal(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<UpdateRequest>,
    ) -> Result<Response, AppError> {
        let uid = resources.sessions.resolve(&request.token).await?;

        let journal = request
            .data
            .as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::invalid_input(messages::EMPTY_JOURNAL))?;

        let today = Utc::now().date_naive();
        let mut record = resources
            .store
            .get_daily_record(&uid, today)
            .await?
            .unwrap_or_else(|| DailyRecord::empty(today));
        record.journal = journal.to_owned();
        resources.store.upsert_daily_record(&uid, &record).await?;

        info!("journal updated for uid {uid}");
        Ok(message_ok("Data updated!"))
    }

    /// Handle `POST /get_lifestyle_score`
    async fn get_lifestyle_score(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<TokenRequest>,
    ) -> Result<Response, AppError> {
        let uid = resources.sessions.resolve(&request.token).await?;

        let now = Utc::now();
        let score =
            scoring::compute_score(&resources.store, &resources.reference_table, &uid, now)
                .await?;

        Ok((
            StatusCode::OK,
            Json(ScoreResponse {
                message: "Lifestyle score computed!".into(),
                score,
            }),
        )
            .into_response())
    }

    /// Handle `POST /get_advice`
    async fn get_advice(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<TokenRequest>,
    ) -> Result<Response, AppError> {
        let uid = resources.sessions.resolve(&request.token).await?;
        let now = Utc::now();

        let profile = resources
            .store
            .get_profile(&uid)
            .await?
            .ok_or_else(|| AppError::not_configured(messages::PROFILE_REQUIRED))?;

        let record = resources
            .store
            .get_daily_record(&uid, now.date_naive())
            .await?
            .ok_or_else(|| AppError::not_configured(messages::RECORD_REQUIRED))?;

        if record.journal.trim().is_empty() {
            return Err(AppError::not_configured(messages::JOURNAL_REQUIRED));
        }

        let score =
            scoring::compute_score(&resources.store, &resources.reference_table, &uid, now)
                .await?;

        let midpoints = resources
            .reference_table
            .midpoints(profile.age_at(now), profile.gender)
            .map_err(|e| AppError::internal(format!("recommendation lookup failed: {e}")))?;

        let location_label = resources
            .store
            .get_location(&uid)
            .await?
            .map_or_else(|| defaults::UNKNOWN_LOCATION.to_owned(), |l| l.display_label());

        let prompt =
            build_advice_prompt(&record, &profile, score, &midpoints, &location_label, now);

        let advice = resources.advice.generate(&prompt).await?;

        // Empty output is a soft failure: report "Invalid" advice, never crash
        if advice.trim().is_empty() {
            warn!("advice generation returned empty output for uid {uid}");
            return Ok((
                StatusCode::OK,
                Json(AdviceResponse {
                    message: "Advice generation returned no usable output".into(),
                    advice: messages::INVALID_ADVICE.into(),
                }),
            )
                .into_response());
        }

        info!("advice generated for uid {uid}");
        Ok((
            StatusCode::OK,
            Json(AdviceResponse {
                message: "Advice generated!".into(),
                advice,
            }),
        )
            .into_response())
    }

    /// Handle `POST /update_location`
    async fn update_location(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<UpdateLocationRequest>,
    ) -> Result<Response, AppError> {
        let uid = resources.sessions.resolve(&request.token).await?;

        let latitude = numeric_field(&request.latitude)
            .filter(|v| v.abs() <= limits::LATITUDE_ABS_MAX)
            .ok_or_else(|| AppError::invalid_input("Invalid latitude"))?;

        let longitude = numeric_field(&request.longitude)
            .filter(|v| v.abs() <= limits::LONGITUDE_ABS_MAX)
            .ok_or_else(|| AppError::invalid_input("Invalid longitude"))?;

        let location = GeoLocation {
            latitude,
            longitude,
            label: request.label.filter(|l| !l.trim().is_empty()),
        };
        resources.store.set_location(&uid, &location).await?;

        info!("location updated for uid {uid}");
        Ok(message_ok("Location updated!"))
    }
}

/// Parse a JSON number or numeric string into a finite f64
fn numeric_field(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// 200 response with a bare message body
fn message_ok(message: &str) -> Response {
    (
        StatusCode::OK,
        Json(MessageResponse {
            message: message.to_owned(),
        }),
    )
        .into_response()
}
