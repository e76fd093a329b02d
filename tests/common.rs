// ABOUTME: Shared test utilities for the onboarding tracker integration tests
// ABOUTME: Provides quiet logging setup and tracker/store constructors
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `pierre_onboarding`

use pierre_onboarding::store::memory::InMemoryStore;
use pierre_onboarding::OnboardingProgressTracker;
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Create a tracker over a fresh in-memory store, returning both
///
/// The returned store is a clone sharing the same entries, so tests can
/// observe what the tracker persisted.
pub async fn memory_tracker() -> (OnboardingProgressTracker, InMemoryStore) {
    init_test_logging();
    let store = InMemoryStore::default();
    let tracker = OnboardingProgressTracker::initialize(store.clone()).await;
    (tracker, store)
}
