// ABOUTME: Common data models for wellness data
// ABOUTME: Profiles, daily records, recommendation ranges, and the enums that key them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chi Wellness

//! Core domain types shared across the store adapter, the score calculator,
//! and the HTTP boundary.
//!
//! Wire field names follow the document shapes the mobile clients already
//! write (camelCase), so serde renames are applied per struct.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// User gender as stored on the profile
///
/// Wire strings are fixed: `"Male"`, `"Female"`, `"Non-Binary"`.
/// Deserialization is lenient through [`Gender::classify`] so documents
/// written by older clients still load; the profile endpoint validates new
/// writes strictly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Gender {
    /// Wire string "Male"
    Male,
    /// Wire string "Female"
    Female,
    /// Wire string "Non-Binary"
    #[serde(rename = "Non-Binary")]
    NonBinary,
}

impl From<String> for Gender {
    fn from(value: String) -> Self {
        Self::classify(&value)
    }
}

impl Gender {
    /// Wire string for this gender
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::NonBinary => "Non-Binary",
        }
    }

    /// Reference-table key for this gender
    #[must_use]
    pub const fn table_key(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::NonBinary => "non-binary",
        }
    }

    /// Strict parse of a wire string; `None` for anything unrecognized
    #[must_use]
    pub fn parse_strict(value: &str) -> Option<Self> {
        match value {
            "Male" => Some(Self::Male),
            "Female" => Some(Self::Female),
            "Non-Binary" => Some(Self::NonBinary),
            _ => None,
        }
    }

    /// Lenient classification of stored data written by older clients.
    ///
    /// Unrecognized values fall back to `Male`. Compatibility quirk carried
    /// over from the original lookup code; flagged for product review in
    /// DESIGN.md. New writes never take this path because the profile
    /// endpoint rejects unknown strings.
    #[must_use]
    pub fn classify(value: &str) -> Self {
        Self::parse_strict(value).unwrap_or(Self::Male)
    }
}

/// Metric category tracked per day and scored against recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Water intake, fluid ounces per day
    Water,
    /// Sleep, hours per night
    Sleep,
    /// Exercise, hours per day
    Exercise,
}

impl Category {
    /// All categories, in scoring-weight order
    pub const ALL: [Self; 3] = [Self::Sleep, Self::Water, Self::Exercise];

    /// Reference-table key for this category
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Water => "water",
            Self::Sleep => "sleep",
            Self::Exercise => "exercise",
        }
    }
}

/// Age bucket keying the recommendation table
///
/// Boundaries are inclusive at each threshold: `<= 12` child, `<= 17` teen,
/// `<= 29` young adult, `<= 64` adult, otherwise elderly. The `<= 12`
/// child/teen cutoff is canonical; keep every lookup on this one function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeBucket {
    /// Ages 0-12
    Child,
    /// Ages 13-17
    Teen,
    /// Ages 18-29
    YoungAdult,
    /// Ages 30-64
    Adult,
    /// Ages 65+
    Elderly,
}

impl AgeBucket {
    /// All buckets, youngest first
    pub const ALL: [Self; 5] = [
        Self::Child,
        Self::Teen,
        Self::YoungAdult,
        Self::Adult,
        Self::Elderly,
    ];

    /// Total mapping from age in years to bucket
    #[must_use]
    pub const fn for_age(age: u32) -> Self {
        match age {
            0..=12 => Self::Child,
            13..=17 => Self::Teen,
            18..=29 => Self::YoungAdult,
            30..=64 => Self::Adult,
            _ => Self::Elderly,
        }
    }

    /// Store document id for this bucket
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Child => "child",
            Self::Teen => "teen",
            Self::YoungAdult => "youngadult",
            Self::Adult => "adult",
            Self::Elderly => "elderly",
        }
    }
}

/// Per-user profile, written once at setup and updated explicitly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Calendar birthday, ISO date on the wire
    pub birthday: NaiveDate,
    /// Profile gender
    pub gender: Gender,
    /// Height in feet, validated into (0, 10]
    pub height_feet: f64,
    /// Weight in pounds, validated >= 0
    pub weight_lbs: f64,
}

impl UserProfile {
    /// Whole years of age at the supplied instant
    ///
    /// Clock injection keeps the score calculator and prompt builder pure;
    /// callers thread one `now` through an entire request.
    #[must_use]
    pub fn age_at(&self, now: DateTime<Utc>) -> u32 {
        let today = now.date_naive();
        let mut age = today.year() - self.birthday.year();
        if (today.month(), today.day()) < (self.birthday.month(), self.birthday.day()) {
            age -= 1;
        }
        u32::try_from(age).unwrap_or(0)
    }
}

/// One health record per user per calendar day
///
/// Created on signup (for that day) or lazily by the first update; fields
/// default to zero/empty and records are never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    /// Calendar day this record covers (document key component)
    pub date: NaiveDate,
    /// Water intake in fluid ounces, >= 0
    #[serde(default)]
    pub water_oz: f64,
    /// Sleep in hours, >= 0
    #[serde(default)]
    pub sleep_hours: f64,
    /// Exercise in hours, >= 0
    #[serde(default)]
    pub exercise_hours: f64,
    /// Free-text journal entry
    #[serde(default)]
    pub journal: String,
}

impl DailyRecord {
    /// Fresh all-defaults record for a day
    #[must_use]
    pub const fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            water_oz: 0.0,
            sleep_hours: 0.0,
            exercise_hours: 0.0,
            journal: String::new(),
        }
    }

    /// Observed amount for a category
    #[must_use]
    pub fn amount(&self, category: Category) -> f64 {
        match category {
            Category::Water => self.water_oz,
            Category::Sleep => self.sleep_hours,
            Category::Exercise => self.exercise_hours,
        }
    }

    /// Set the amount for a category, used by the update handlers
    pub fn set_amount(&mut self, category: Category, value: f64) {
        match category {
            Category::Water => self.water_oz = value,
            Category::Sleep => self.sleep_hours = value,
            Category::Exercise => self.exercise_hours = value,
        }
    }
}

/// Recommended target range for one (bucket, gender, category) triple
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecommendedRange {
    /// Low end of the recommended range
    pub low: f64,
    /// High end of the recommended range
    pub high: f64,
}

impl RecommendedRange {
    /// Construct a range
    #[must_use]
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Midpoint of the range, the score calculator's target value
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        (self.low + self.high) / 2.0
    }
}

/// Last reported device location for a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoLocation {
    /// Latitude in degrees, [-90, 90]
    pub latitude: f64,
    /// Longitude in degrees, [-180, 180]
    pub longitude: f64,
    /// Optional human-readable label resolved client-side
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl GeoLocation {
    /// Label for prompt embedding, falling back to raw coordinates
    #[must_use]
    pub fn display_label(&self) -> String {
        self.label.clone().unwrap_or_else(|| {
            format!(
                "latitude {:.4}, longitude {:.4}",
                self.latitude, self.longitude
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_age_bucket_partition() {
        assert_eq!(AgeBucket::for_age(0), AgeBucket::Child);
        assert_eq!(AgeBucket::for_age(12), AgeBucket::Child);
        assert_eq!(AgeBucket::for_age(13), AgeBucket::Teen);
        assert_eq!(AgeBucket::for_age(17), AgeBucket::Teen);
        assert_eq!(AgeBucket::for_age(18), AgeBucket::YoungAdult);
        assert_eq!(AgeBucket::for_age(29), AgeBucket::YoungAdult);
        assert_eq!(AgeBucket::for_age(30), AgeBucket::Adult);
        assert_eq!(AgeBucket::for_age(64), AgeBucket::Adult);
        assert_eq!(AgeBucket::for_age(65), AgeBucket::Elderly);
        assert_eq!(AgeBucket::for_age(120), AgeBucket::Elderly);
    }

    #[test]
    fn test_gender_classify_quirk() {
        assert_eq!(Gender::classify("Female"), Gender::Female);
        assert_eq!(Gender::classify("Non-Binary"), Gender::NonBinary);
        // Unrecognized stored values fall back to Male
        assert_eq!(Gender::classify("Other"), Gender::Male);
        assert_eq!(Gender::classify(""), Gender::Male);
    }

    #[test]
    fn test_gender_deserialization_is_lenient() {
        let strict: Gender = serde_json::from_value(serde_json::json!("Non-Binary")).unwrap();
        assert_eq!(strict, Gender::NonBinary);

        // Old documents with unrecognized strings still load
        let legacy: Gender = serde_json::from_value(serde_json::json!("Other")).unwrap();
        assert_eq!(legacy, Gender::Male);
    }

    #[test]
    fn test_age_at_respects_birthday_within_year() {
        let profile = UserProfile {
            birthday: NaiveDate::from_ymd_opt(2000, 6, 15).unwrap(),
            gender: Gender::Male,
            height_feet: 5.9,
            weight_lbs: 160.0,
        };

        let before = Utc.with_ymd_and_hms(2026, 6, 14, 12, 0, 0).unwrap();
        let on = Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap();
        assert_eq!(profile.age_at(before), 25);
        assert_eq!(profile.age_at(on), 26);
    }

    #[test]
    fn test_daily_record_wire_shape() {
        let record = DailyRecord {
            date: NaiveDate::from_ymd_opt(2026, 8, 4).unwrap(),
            water_oz: 64.0,
            sleep_hours: 8.0,
            exercise_hours: 1.0,
            journal: "felt good".into(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["waterOz"], 64.0);
        assert_eq!(json["sleepHours"], 8.0);
        assert_eq!(json["exerciseHours"], 1.0);
        assert_eq!(json["journal"], "felt good");
    }

    #[test]
    fn test_daily_record_missing_fields_default() {
        let record: DailyRecord = serde_json::from_value(serde_json::json!({
            "date": "2026-08-04"
        }))
        .unwrap();
        assert_eq!(record.water_oz, 0.0);
        assert_eq!(record.sleep_hours, 0.0);
        assert_eq!(record.exercise_hours, 0.0);
        assert!(record.journal.is_empty());
    }
}
