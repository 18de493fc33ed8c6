// ABOUTME: Advice prompt assembly from score, recommendations, and today's record
// ABOUTME: Pure string formatting; the network call lives with the provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chi Wellness

//! # Advice prompt builder
//!
//! Assembles the natural-language prompt sent to the generative model. Pure
//! formatting over values the caller already fetched: today's record, the
//! user's profile, the current lifestyle score, the recommended midpoints,
//! the last reported location, and an explicit `now` for age and
//! time-of-day derivation.
//!
//! The prompt instructs the model to produce exactly 15 recommendations,
//! distributed across the categories in proportion to their scoring weight
//! and to the gap between observed and recommended amounts. That distribution
//! is entirely the model's to honor; only the prompt text is this module's
//! contract.

use crate::constants::score;
use crate::models::{DailyRecord, UserProfile};
use crate::recommendations::CategoryMidpoints;
use chrono::{DateTime, Timelike, Utc};

/// Coarse time-of-day label for prompt context
fn time_of_day(now: DateTime<Utc>) -> &'static str {
    match now.hour() {
        5..=11 => "morning",
        12..=16 => "afternoon",
        17..=21 => "evening",
        _ => "night",
    }
}

/// Build the advice generation prompt
#[must_use]
pub fn build_advice_prompt(
    record: &DailyRecord,
    profile: &UserProfile,
    lifestyle_score: f64,
    midpoints: &CategoryMidpoints,
    location_label: &str,
    now: DateTime<Utc>,
) -> String {
    let age = profile.age_at(now);
    let sleep_pct = score::SLEEP_WEIGHT * 100.0;
    let water_pct = score::WATER_WEIGHT * 100.0;
    let exercise_pct = score::EXERCISE_WEIGHT * 100.0;

    format!(
        "You are a personal wellness assistant writing daily advice for a client.\n\
         \n\
         Client profile: a {age}-year-old {gender}, {height:.1} feet tall, weighing \
         {weight:.0} pounds. They are currently in {location} and it is {tod} for them.\n\
         \n\
         Today they have had {water:.1} oz of water, {sleep:.1} hours of sleep, and \
         {exercise:.2} hours of exercise. Their journal entry for today reads: \
         \"{journal}\"\n\
         \n\
         Their current lifestyle score is {score:.2} on a scale from 0.15 to 1.00. \
         Recommended daily amounts for someone like them are about {water_mid:.0} oz of \
         water, {sleep_mid:.1} hours of sleep, and {exercise_mid:.2} hours of exercise.\n\
         \n\
         Write exactly 15 short, encouraging recommendations for the rest of their day. \
         Distribute the recommendations across water, sleep, and exercise in proportion \
         to each category's weight in the score (sleep {sleep_pct:.0}%, water \
         {water_pct:.0}%, exercise {exercise_pct:.0}%) and to how far today's amounts \
         fall short of the recommended amounts. Draw on the journal entry to keep the \
         advice personal.",
        gender = profile.gender.as_str(),
        height = profile.height_feet,
        weight = profile.weight_lbs,
        location = location_label,
        tod = time_of_day(now),
        water = record.water_oz,
        sleep = record.sleep_hours,
        exercise = record.exercise_hours,
        journal = record.journal,
        score = lifestyle_score,
        water_mid = midpoints.water,
        sleep_mid = midpoints.sleep,
        exercise_mid = midpoints.exercise,
    )
}
