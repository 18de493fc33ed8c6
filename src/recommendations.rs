// ABOUTME: Recommendation resolver over age/gender-bucketed reference ranges
// ABOUTME: Static builtin table with per-bucket override documents from the store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chi Wellness

//! Recommended-range resolution
//!
//! Maps a user's age and gender to target ranges for water, sleep, and
//! exercise. The table is static reference data: a builtin copy ships with the
//! binary, and the store may supply one override document per age bucket
//! (nested gender, then category, then `[low, high]`).
//!
//! Resolution is a pure function over the supplied table; no side effects.

use crate::errors::{AppError, AppResult};
use crate::models::{AgeBucket, Category, Gender, RecommendedRange};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Target ranges for one gender within a bucket, `[low, high]` on the wire
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenderRanges {
    /// Water intake range, fluid ounces per day
    pub water: [f64; 2],
    /// Sleep range, hours per night
    pub sleep: [f64; 2],
    /// Exercise range, hours per day
    pub exercise: [f64; 2],
}

impl GenderRanges {
    /// Range for a category
    #[must_use]
    pub const fn range(&self, category: Category) -> RecommendedRange {
        let [low, high] = match category {
            Category::Water => self.water,
            Category::Sleep => self.sleep,
            Category::Exercise => self.exercise,
        };
        RecommendedRange::new(low, high)
    }
}

/// One reference document: gender key to category ranges
///
/// Matches the store document shape, one document per age bucket with keys
/// `male`, `female`, `non-binary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketRanges {
    /// Ranges keyed by gender table key
    #[serde(flatten)]
    pub genders: HashMap<String, GenderRanges>,
}

impl BucketRanges {
    /// Ranges for a gender, if the document carries that key
    #[must_use]
    pub fn for_gender(&self, gender: Gender) -> Option<&GenderRanges> {
        self.genders.get(gender.table_key())
    }
}

/// Complete recommendation table, one entry per age bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceTable {
    /// Per-bucket reference documents
    pub buckets: HashMap<AgeBucket, BucketRanges>,
}

impl ReferenceTable {
    /// Builtin reference data used when the store supplies no override
    #[must_use]
    pub fn builtin() -> Self {
        let mut buckets = HashMap::new();
        for bucket in AgeBucket::ALL {
            buckets.insert(bucket, builtin_bucket(bucket));
        }
        Self { buckets }
    }

    /// Replace one bucket's document (store override path)
    pub fn set_bucket(&mut self, bucket: AgeBucket, ranges: BucketRanges) {
        self.buckets.insert(bucket, ranges);
    }

    /// Resolve the recommended range for an age, gender, and category
    ///
    /// Total over ages via [`AgeBucket::for_age`]; gender and category are
    /// already validated by their types. Fails only when the supplied table
    /// is missing the bucket or gender entry, which indicates a malformed
    /// override document.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::invalid_input`] when the table has no entry for
    /// the resolved (bucket, gender) pair.
    pub fn resolve(
        &self,
        age: u32,
        gender: Gender,
        category: Category,
    ) -> AppResult<RecommendedRange> {
        let bucket = AgeBucket::for_age(age);
        let ranges = self
            .buckets
            .get(&bucket)
            .and_then(|doc| doc.for_gender(gender))
            .ok_or_else(|| {
                AppError::invalid_input(format!(
                    "No recommendation entry for bucket '{}' gender '{}'",
                    bucket.as_str(),
                    gender.table_key()
                ))
            })?;
        Ok(ranges.range(category))
    }

    /// Recommended midpoints for all three categories at once
    ///
    /// # Errors
    ///
    /// Propagates the lookup failure from [`Self::resolve`].
    pub fn midpoints(&self, age: u32, gender: Gender) -> AppResult<CategoryMidpoints> {
        Ok(CategoryMidpoints {
            water: self.resolve(age, gender, Category::Water)?.midpoint(),
            sleep: self.resolve(age, gender, Category::Sleep)?.midpoint(),
            exercise: self.resolve(age, gender, Category::Exercise)?.midpoint(),
        })
    }
}

/// Recommended midpoints, the score calculator's targets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryMidpoints {
    /// Water midpoint, fluid ounces per day
    pub water: f64,
    /// Sleep midpoint, hours per night
    pub sleep: f64,
    /// Exercise midpoint, hours per day
    pub exercise: f64,
}

impl CategoryMidpoints {
    /// Midpoint for a category
    #[must_use]
    pub const fn get(&self, category: Category) -> f64 {
        match category {
            Category::Water => self.water,
            Category::Sleep => self.sleep,
            Category::Exercise => self.exercise,
        }
    }
}

fn gender_ranges(water: [f64; 2], sleep: [f64; 2], exercise: [f64; 2]) -> GenderRanges {
    GenderRanges {
        water,
        sleep,
        exercise,
    }
}

fn bucket_doc(
    male: GenderRanges,
    female: GenderRanges,
    non_binary: GenderRanges,
) -> BucketRanges {
    let mut genders = HashMap::new();
    genders.insert("male".to_owned(), male);
    genders.insert("female".to_owned(), female);
    genders.insert("non-binary".to_owned(), non_binary);
    BucketRanges { genders }
}

/// Builtin reference values per bucket.
///
/// Water in fluid ounces per day (total fluids), sleep in hours per night,
/// exercise in hours per day. Non-binary entries are the midline of the
/// male/female entries.
fn builtin_bucket(bucket: AgeBucket) -> BucketRanges {
    match bucket {
        AgeBucket::Child => bucket_doc(
            gender_ranges([40.0, 60.0], [9.0, 12.0], [1.0, 2.0]),
            gender_ranges([40.0, 60.0], [9.0, 12.0], [1.0, 2.0]),
            gender_ranges([40.0, 60.0], [9.0, 12.0], [1.0, 2.0]),
        ),
        AgeBucket::Teen => bucket_doc(
            gender_ranges([60.0, 90.0], [8.0, 10.0], [1.0, 2.0]),
            gender_ranges([55.0, 80.0], [8.0, 10.0], [1.0, 2.0]),
            gender_ranges([57.5, 85.0], [8.0, 10.0], [1.0, 2.0]),
        ),
        AgeBucket::YoungAdult => bucket_doc(
            gender_ranges([100.0, 130.0], [7.0, 9.0], [0.75, 1.5]),
            gender_ranges([70.0, 95.0], [7.0, 9.0], [0.75, 1.5]),
            gender_ranges([85.0, 112.5], [7.0, 9.0], [0.75, 1.5]),
        ),
        AgeBucket::Adult => bucket_doc(
            gender_ranges([100.0, 130.0], [7.0, 9.0], [0.5, 1.25]),
            gender_ranges([70.0, 95.0], [7.0, 9.0], [0.5, 1.25]),
            gender_ranges([85.0, 112.5], [7.0, 9.0], [0.5, 1.25]),
        ),
        AgeBucket::Elderly => bucket_doc(
            gender_ranges([80.0, 110.0], [7.0, 8.0], [0.5, 1.0]),
            gender_ranges([60.0, 85.0], [7.0, 8.0], [0.5, 1.0]),
            gender_ranges([70.0, 97.5], [7.0, 8.0], [0.5, 1.0]),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_covers_every_triple() {
        let table = ReferenceTable::builtin();
        for bucket in AgeBucket::ALL {
            for gender in [Gender::Male, Gender::Female, Gender::NonBinary] {
                for category in Category::ALL {
                    let doc = table.buckets.get(&bucket).unwrap();
                    let ranges = doc.for_gender(gender).unwrap();
                    let range = ranges.range(category);
                    assert!(range.low > 0.0, "{bucket:?}/{gender:?}/{category:?}");
                    assert!(range.high >= range.low);
                }
            }
        }
    }

    #[test]
    fn test_resolve_uses_bucket_for_age() {
        let table = ReferenceTable::builtin();
        let child = table.resolve(12, Gender::Female, Category::Sleep).unwrap();
        let teen = table.resolve(13, Gender::Female, Category::Sleep).unwrap();
        assert_eq!(child, RecommendedRange::new(9.0, 12.0));
        assert_eq!(teen, RecommendedRange::new(8.0, 10.0));
    }

    #[test]
    fn test_resolve_missing_gender_entry_is_invalid_input() {
        let mut table = ReferenceTable::builtin();
        table.set_bucket(
            AgeBucket::Adult,
            BucketRanges {
                genders: HashMap::new(),
            },
        );
        let err = table
            .resolve(40, Gender::Male, Category::Water)
            .unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::InvalidInput);
    }

    #[test]
    fn test_bucket_document_wire_shape() {
        let doc = builtin_bucket(AgeBucket::Teen);
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["male"]["water"], serde_json::json!([60.0, 90.0]));
        assert_eq!(json["female"]["sleep"], serde_json::json!([8.0, 10.0]));
    }

    #[test]
    fn test_midpoints() {
        let table = ReferenceTable::builtin();
        let mids = table.midpoints(25, Gender::Male).unwrap();
        assert!((mids.water - 115.0).abs() < f64::EPSILON);
        assert!((mids.sleep - 8.0).abs() < f64::EPSILON);
        assert!((mids.exercise - 1.125).abs() < f64::EPSILON);
    }
}
