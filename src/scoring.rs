// ABOUTME: Lifestyle score calculator over a rolling 14-day window of daily records
// ABOUTME: Weighted normalized aggregation clamped into the published [0.15, 1.0] range
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chi Wellness

//! Lifestyle scoring
//!
//! The score is a deterministic aggregation over the last 14 calendar days of
//! stored metrics: per-category means, normalized against the recommended
//! midpoints for the user's age and gender, weighted (sleep 0.5, water 0.35,
//! exercise 0.15), then rescaled into the displayed `[0.15, 1.0]` range. It is
//! recomputed on demand and never persisted.
//!
//! The window math is split out as pure functions over already-fetched
//! records; `compute_score` performs the store round-trips. The caller
//! supplies `now`, so identical stored data always yields an identical score.

use crate::constants::score;
use crate::errors::{AppError, AppResult};
use crate::models::DailyRecord;
use crate::recommendations::{CategoryMidpoints, ReferenceTable};
use crate::store::{HealthStore, Store};
use chrono::{DateTime, Days, Utc};
use tracing::debug;

/// Per-category means over the days that had records
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowAverages {
    /// Mean water intake, fluid ounces
    pub water: f64,
    /// Mean sleep, hours
    pub sleep: f64,
    /// Mean exercise, hours
    pub exercise: f64,
    /// Number of days in the window that had a record
    pub days_counted: usize,
}

/// Arithmetic means across the supplied records
///
/// Days without records are simply not in the slice; they are skipped, not
/// counted as zero. Returns `None` for an empty window.
#[must_use]
pub fn average_window(records: &[DailyRecord]) -> Option<WindowAverages> {
    if records.is_empty() {
        return None;
    }

    let n = records.len() as f64;
    Some(WindowAverages {
        water: records.iter().map(|r| r.water_oz).sum::<f64>() / n,
        sleep: records.iter().map(|r| r.sleep_hours).sum::<f64>() / n,
        exercise: records.iter().map(|r| r.exercise_hours).sum::<f64>() / n,
        days_counted: records.len(),
    })
}

/// Normalized score for one category: observed mean over recommended midpoint,
/// capped at 1. A zero or non-finite midpoint scores 0 rather than dividing.
fn category_score(observed: f64, midpoint: f64) -> f64 {
    if midpoint <= 0.0 || !midpoint.is_finite() {
        return 0.0;
    }
    (observed / midpoint).min(1.0)
}

/// Score a window of records against recommended midpoints
///
/// Pure function of the multiset of records: the result does not depend on
/// the order days were fetched in. An empty window scores the floor. Any
/// non-finite intermediate collapses to the floor instead of propagating.
#[must_use]
pub fn score_window(records: &[DailyRecord], midpoints: &CategoryMidpoints) -> f64 {
    let Some(averages) = average_window(records) else {
        return score::FLOOR;
    };

    let sleep = category_score(averages.sleep, midpoints.sleep);
    let water = category_score(averages.water, midpoints.water);
    let exercise = category_score(averages.exercise, midpoints.exercise);

    let raw = score::SLEEP_WEIGHT * sleep
        + score::WATER_WEIGHT * water
        + score::EXERCISE_WEIGHT * exercise;
    let scaled = score::SPAN.mul_add(raw, score::FLOOR).min(1.0);

    debug!(
        days = averages.days_counted,
        sleep, water, exercise, raw, scaled, "scored lifestyle window"
    );

    if scaled.is_finite() {
        scaled
    } else {
        score::FLOOR
    }
}

/// Compute a user's lifestyle score at the supplied instant
///
/// Fetches the profile and the 14 calendar days ending today (inclusive),
/// resolves recommended midpoints for the user's current age and gender, and
/// scores the window. Read-only; safe to recompute any number of times.
///
/// # Errors
///
/// Returns [`AppError::not_configured`] when the user has no profile, or a
/// storage error when the store cannot be read. Resolver failures over a
/// malformed override table are swallowed into the floor score.
pub async fn compute_score(
    store: &Store,
    table: &ReferenceTable,
    uid: &str,
    now: DateTime<Utc>,
) -> AppResult<f64> {
    let profile = store
        .get_profile(uid)
        .await?
        .ok_or_else(|| AppError::not_configured(crate::constants::messages::PROFILE_REQUIRED))?;

    let today = now.date_naive();
    let mut records = Vec::with_capacity(score::WINDOW_DAYS as usize);
    for offset in 0..score::WINDOW_DAYS {
        let Some(date) = today.checked_sub_days(Days::new(offset as u64)) else {
            continue;
        };
        if let Some(record) = store.get_daily_record(uid, date).await? {
            records.push(record);
        }
    }

    let age = profile.age_at(now);
    let Ok(midpoints) = table.midpoints(age, profile.gender) else {
        // A malformed override table must not take scoring down with it
        debug!("recommendation lookup failed for uid {uid}; returning floor score");
        return Ok(score::FLOOR);
    };

    Ok(score_window(&records, &midpoints))
}
