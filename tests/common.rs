// ABOUTME: Shared test setup helpers for integration tests
// ABOUTME: Builds memory-backed server resources with a canned advice generator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chi Wellness

#![allow(dead_code)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use chi_wellness_server::{
    config::environment::ServerConfig,
    identity::{Identity, MemoryIdentity},
    llm::{AdviceGenerator, StaticProvider},
    recommendations::ReferenceTable,
    resources::ServerResources,
    store::{MemoryStore, Store},
};
use std::sync::Arc;

/// Default canned advice returned by the test generator
pub const TEST_ADVICE: &str = "1. Drink a glass of water now.\n2. Aim for an early night.";

/// Memory-backed resources plus direct handles for seeding state
pub struct TestSetup {
    pub resources: Arc<ServerResources>,
    pub store: MemoryStore,
}

/// Build resources over memory backends and a canned advice responder
pub fn create_test_resources() -> TestSetup {
    create_test_resources_with_advice(TEST_ADVICE)
}

/// Build resources with a specific canned advice string
///
/// An empty string exercises the soft-failure path in `/get_advice`.
pub fn create_test_resources_with_advice(advice: &str) -> TestSetup {
    let store = MemoryStore::new();
    let resources = ServerResources::new(
        Store::Memory(store.clone()),
        Identity::Memory(MemoryIdentity::new()),
        AdviceGenerator::Static(StaticProvider::new(advice)),
        ReferenceTable::builtin(),
        Arc::new(ServerConfig::for_testing()),
    );

    TestSetup {
        resources: Arc::new(resources),
        store,
    }
}
