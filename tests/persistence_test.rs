// ABOUTME: Tests for the write-behind persistence adapter
// ABOUTME: Covers fire-and-forget failure handling and last-write-wins snapshots
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use async_trait::async_trait;
use common::init_test_logging;
use pierre_onboarding::constants::{storage, wizard};
use pierre_onboarding::errors::{AppError, AppResult};
use pierre_onboarding::models::OnboardingState;
use pierre_onboarding::persistence::PersistenceHandle;
use pierre_onboarding::store::memory::InMemoryStore;
use pierre_onboarding::store::{StoreConfig, StoreProvider};
use pierre_onboarding::OnboardingProgressTracker;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Store whose reads and writes always fail
#[derive(Clone, Default)]
struct FailingStore {
    write_attempts: Arc<AtomicUsize>,
}

#[async_trait]
impl StoreProvider for FailingStore {
    async fn new(_config: StoreConfig) -> AppResult<Self> {
        Ok(Self::default())
    }

    async fn migrate(&self) -> AppResult<()> {
        Ok(())
    }

    async fn set<T: Serialize + Send + Sync>(&self, _key: &str, _value: &T) -> AppResult<()> {
        self.write_attempts.fetch_add(1, Ordering::SeqCst);
        Err(AppError::store_unavailable("disk full"))
    }

    async fn get<T: DeserializeOwned>(&self, _key: &str) -> AppResult<Option<T>> {
        Err(AppError::store_unavailable("disk full"))
    }

    async fn remove(&self, _key: &str) -> AppResult<()> {
        Err(AppError::store_unavailable("disk full"))
    }
}

#[tokio::test]
async fn read_failure_degrades_to_default_state() {
    init_test_logging();
    let tracker = OnboardingProgressTracker::initialize(FailingStore::default()).await;
    assert_eq!(tracker.current_section().await, 0);
    assert!(tracker.user_data().await.groups.is_empty());
}

#[tokio::test]
async fn write_failures_never_roll_back_memory() {
    init_test_logging();
    let store = FailingStore::default();
    let tracker = OnboardingProgressTracker::initialize(store.clone()).await;

    tracker.advance().await;
    tracker.advance().await;
    tracker.flush().await;

    // Every dispatched write failed, yet the in-memory state kept moving.
    assert!(store.write_attempts.load(Ordering::SeqCst) >= 1);
    assert_eq!(tracker.current_section().await, 2);

    // And the tracker keeps accepting mutations afterwards.
    assert_eq!(tracker.advance().await, 3);
}

#[tokio::test]
async fn latest_snapshot_wins_on_the_persisted_side() {
    init_test_logging();
    let store = InMemoryStore::default();
    let tracker = OnboardingProgressTracker::initialize(store.clone()).await;

    // A burst of mutations, then one flush: whatever writes the adapter
    // coalesced away, the durable snapshot must be the newest one.
    for _ in 0..wizard::TOTAL_SECTIONS {
        tracker.advance().await;
    }
    tracker.retreat().await;
    tracker.flush().await;

    let persisted: OnboardingState = store
        .get(storage::SNAPSHOT_KEY)
        .await
        .unwrap()
        .expect("snapshot after flush");
    assert_eq!(persisted.current_section_index, wizard::TOTAL_SECTIONS - 2);
    assert!(persisted.steps.iter().all(|step| step.completed));
}

#[tokio::test]
async fn flush_on_idle_adapter_returns_immediately() {
    init_test_logging();
    let handle = PersistenceHandle::spawn(InMemoryStore::default());
    handle.flush().await;
}

#[tokio::test]
async fn adapter_writes_dispatched_snapshots() {
    init_test_logging();
    let store = InMemoryStore::default();
    let handle = PersistenceHandle::spawn(store.clone());

    let mut state = OnboardingState::new();
    state.advance();
    handle.dispatch(state.clone());
    handle.flush().await;

    let persisted: Option<OnboardingState> = store.get(storage::SNAPSHOT_KEY).await.unwrap();
    assert_eq!(persisted, Some(state));
}
