// ABOUTME: Test helper module exports
// ABOUTME: HTTP harness utilities shared by route integration tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chi Wellness

#![allow(dead_code)]

pub mod axum_test;
