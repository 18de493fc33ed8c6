// ABOUTME: Application constants organized by domain
// ABOUTME: Validation limits, scoring weights, store collection names, and user-facing messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chi Wellness

//! Constants module
//!
//! Application constants grouped into logical domains rather than scattered
//! through the code. Scoring weights live here because they are part of the
//! published score contract, not tuning knobs.

/// Service identity used in logs and config summaries
pub mod service_names {
    /// Canonical service name
    pub const CHI_WELLNESS_SERVER: &str = "chi-wellness-server";
}

/// Validation limits for request fields
pub mod limits {
    /// Exclusive lower bound for profile height in feet
    pub const HEIGHT_FEET_MIN: f64 = 0.0;
    /// Inclusive upper bound for profile height in feet
    pub const HEIGHT_FEET_MAX: f64 = 10.0;
    /// Inclusive lower bound for profile weight in pounds
    pub const WEIGHT_LBS_MIN: f64 = 0.0;
    /// Valid latitude range is [-90, 90]
    pub const LATITUDE_ABS_MAX: f64 = 90.0;
    /// Valid longitude range is [-180, 180]
    pub const LONGITUDE_ABS_MAX: f64 = 180.0;
}

/// Lifestyle score contract: window, weights, and display range
pub mod score {
    /// Rolling window length in calendar days, ending today inclusive
    pub const WINDOW_DAYS: i64 = 14;
    /// Weight of the sleep category in the raw score
    pub const SLEEP_WEIGHT: f64 = 0.5;
    /// Weight of the water category in the raw score
    pub const WATER_WEIGHT: f64 = 0.35;
    /// Weight of the exercise category in the raw score
    pub const EXERCISE_WEIGHT: f64 = 0.15;
    /// Displayed floor: a user with no data never scores below this
    pub const FLOOR: f64 = 0.15;
    /// Span of the displayed range above the floor
    pub const SPAN: f64 = 0.85;
}

/// Default configuration values
pub mod defaults {
    /// Default HTTP port when `HTTP_PORT` is unset
    pub const HTTP_PORT: u16 = 3000;
    /// Default Gemini model for advice generation
    pub const GEMINI_MODEL: &str = "gemini-2.5-flash";
    /// Default timeout applied to a single advice generation call, seconds
    pub const ADVICE_TIMEOUT_SECS: u64 = 30;
    /// Location label embedded in prompts when the user never reported one
    pub const UNKNOWN_LOCATION: &str = "an unknown location";
}

/// Document store collection names
pub mod collections {
    /// One profile document per user, keyed by uid
    pub const PROFILES: &str = "profiles";
    /// One record document per user per day, keyed by `{uid}_{date}`
    pub const RECORDS: &str = "records";
    /// One location document per user, keyed by uid
    pub const LOCATIONS: &str = "locations";
    /// One session document per token, keyed by the opaque token
    pub const SESSIONS: &str = "sessions";
    /// One recommended-ranges document per age bucket, keyed by bucket name
    pub const RECOMMENDED: &str = "recommended";
}

/// User-facing message strings shared across handlers
pub mod messages {
    /// Rejection for a gender value outside the three recognized wire strings
    pub const INVALID_GENDER: &str = "Invalid gender";
    /// Rejection for a birthday that does not parse as an ISO calendar date
    pub const INVALID_BIRTHDAY: &str = "Invalid birthday";
    /// Rejection for an out-of-range height
    pub const INVALID_HEIGHT: &str = "Invalid height";
    /// Rejection for a negative weight
    pub const INVALID_WEIGHT: &str = "Invalid weight";
    /// Rejection for a metric amount that is not a finite number >= 0
    pub const INVALID_AMOUNT: &str = "Invalid amount";
    /// Rejection for an empty journal entry
    pub const EMPTY_JOURNAL: &str = "Journal entry cannot be empty";
    /// Prompting profile setup before advice/score operations
    pub const PROFILE_REQUIRED: &str = "User profile has not been set up";
    /// Prompting a daily record before advice generation
    pub const RECORD_REQUIRED: &str = "No health data recorded for today";
    /// Prompting a journal entry before advice generation
    pub const JOURNAL_REQUIRED: &str = "No journal entry recorded for today";
    /// Generic fallback for unmapped identity-provider error codes
    pub const AUTH_GENERIC_FAILURE: &str = "Couldn't authenticate, please try again";
    /// Soft-failure advice value when the generation service returns nothing
    pub const INVALID_ADVICE: &str = "Invalid";
}
