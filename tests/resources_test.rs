// ABOUTME: Integration tests for startup resource assembly
// ABOUTME: Validates backend construction and reference-table override loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chi Wellness

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chi_wellness_server::config::environment::ServerConfig;
use chi_wellness_server::models::{AgeBucket, Category, Gender};
use chi_wellness_server::recommendations::{BucketRanges, GenderRanges};
use chi_wellness_server::resources::{load_reference_table, ServerResources};
use chi_wellness_server::store::{MemoryStore, Store};
use std::collections::HashMap;

#[tokio::test]
async fn test_from_config_builds_memory_profile() {
    let resources = ServerResources::from_config(ServerConfig::for_testing())
        .await
        .unwrap();

    assert_eq!(resources.store.backend_info(), "Memory (In-Process)");
    assert_eq!(resources.identity.provider_info(), "Memory (In-Process)");
    // No overrides in a fresh store: builtin values apply
    let range = resources
        .reference_table
        .resolve(40, Gender::Male, Category::Sleep)
        .unwrap();
    assert!((range.midpoint() - 8.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_store_override_documents_replace_builtin_buckets() {
    let memory = MemoryStore::new();

    let mut genders = HashMap::new();
    for key in ["male", "female", "non-binary"] {
        genders.insert(
            key.to_owned(),
            GenderRanges {
                water: [200.0, 240.0],
                sleep: [6.0, 8.0],
                exercise: [1.0, 3.0],
            },
        );
    }
    memory.seed_bucket_ranges(AgeBucket::Adult, BucketRanges { genders });

    let table = load_reference_table(&Store::Memory(memory)).await.unwrap();

    // Overridden bucket reflects the store document
    let adult = table.resolve(40, Gender::Female, Category::Water).unwrap();
    assert!((adult.midpoint() - 220.0).abs() < f64::EPSILON);

    // Untouched buckets keep builtin values
    let teen = table.resolve(15, Gender::Female, Category::Water).unwrap();
    assert!((teen.midpoint() - 67.5).abs() < f64::EPSILON);
}
