// ABOUTME: OnboardingProgressTracker owning wizard position and accumulated answers
// ABOUTME: Lock-guarded pure transitions with write-through dispatch to the persistence adapter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Onboarding Progress Tracker
//!
//! Maintains the wizard position and the accumulated draft answers as the
//! user steps through the fixed onboarding sequence, surviving process
//! restarts through an injected store.
//!
//! The tracker is an explicitly-owned, dependency-injected container rather
//! than ambient global state: construct one per application (or per test)
//! over whatever [`StoreProvider`] fits. Mutations apply a pure transition
//! on [`OnboardingState`] under a write lock and then dispatch the full
//! updated snapshot to the write-behind persistence adapter, so no caller
//! ever awaits storage I/O.

use crate::constants::storage;
use crate::errors::AppResult;
use crate::models::{AnswerGroup, EntryStep, OnboardingState, UserData};
use crate::persistence::PersistenceHandle;
use crate::store::factory::Store;
use crate::store::StoreProvider;
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Tracks wizard position and accumulated answers across process restarts
#[derive(Clone)]
pub struct OnboardingProgressTracker {
    state: Arc<RwLock<OnboardingState>>,
    persistence: PersistenceHandle,
}

impl OnboardingProgressTracker {
    /// Load persisted state from `store` and start tracking
    ///
    /// Absence of a stored snapshot yields the default initial state. Store
    /// read failures are non-fatal and degrade to the default state as well;
    /// the tracker keeps running in memory and retries persistence on the
    /// next mutation. Rehydrated snapshots are repaired so the aggregate
    /// invariants hold even when written by an older build.
    pub async fn initialize<S: StoreProvider + 'static>(store: S) -> Self {
        let state = match store.get::<OnboardingState>(storage::SNAPSHOT_KEY).await {
            Ok(Some(mut snapshot)) => {
                snapshot.sanitize();
                debug!(
                    "Restored onboarding state at section {}",
                    snapshot.current_section_index
                );
                snapshot
            }
            Ok(None) => {
                debug!("No persisted onboarding state, starting fresh");
                OnboardingState::new()
            }
            Err(err) => {
                warn!(
                    "Failed to load onboarding state, falling back to defaults: {}",
                    err
                );
                OnboardingState::new()
            }
        };

        Self {
            state: Arc::new(RwLock::new(state)),
            persistence: PersistenceHandle::spawn(store),
        }
    }

    /// Initialize over the store selected by environment configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configured store URL is unsupported or the
    /// backend fails to open
    pub async fn from_env() -> AppResult<Self> {
        let store = Store::from_env().await?;
        debug!("Onboarding store backend: {}", store.backend_info());
        Ok(Self::initialize(store).await)
    }

    async fn mutate<R>(&self, transition: impl FnOnce(&mut OnboardingState) -> R) -> R {
        let mut state = self.state.write().await;
        let result = transition(&mut state);
        let snapshot = state.clone();
        drop(state);
        self.persistence.dispatch(snapshot);
        result
    }

    /// Mark the current step completed and move forward one step
    ///
    /// Returns the new section index. At the last step the index stays put
    /// but the completion mark is still applied.
    pub async fn advance(&self) -> usize {
        self.mutate(OnboardingState::advance).await
    }

    /// Move back one step, staying at 0 when already there
    pub async fn retreat(&self) -> usize {
        self.mutate(OnboardingState::retreat).await
    }

    /// Jump directly to `index`
    ///
    /// Out-of-range indices clamp to the last valid section; the effective
    /// index is returned. Screens call this on mount to resynchronize the
    /// tracker after navigation outside its own controls.
    pub async fn set_current_section(&self, index: usize) -> usize {
        self.mutate(|state| {
            let effective = state.set_current_section(index);
            if effective != index {
                warn!(
                    "Requested section {} is out of range, clamped to {}",
                    index, effective
                );
            }
            effective
        })
        .await
    }

    /// Shallow-merge partial answers into the accumulated draft
    ///
    /// Each top-level key replaces its previous payload wholesale. Returns
    /// the updated answers.
    pub async fn merge_user_data(&self, partial: Map<String, Value>) -> UserData {
        self.mutate(|state| state.merge_user_data(partial).clone())
            .await
    }

    /// Replace one answer group wholesale, by raw key
    pub async fn replace_group(&self, key: impl Into<String>, value: Value) -> UserData {
        let key = key.into();
        self.mutate(|state| state.replace_group(key, value).clone())
            .await
    }

    /// Replace one well-known answer group wholesale
    pub async fn replace_answer_group(&self, group: AnswerGroup, value: Value) -> UserData {
        self.replace_group(group.key(), value).await
    }

    /// Set the setup-complete flag
    pub async fn set_setup_complete(&self, flag: bool) {
        self.mutate(|state| state.set_setup_complete(flag)).await;
    }

    /// Set or clear the profile picture reference
    pub async fn set_profile_picture(&self, reference: Option<String>) {
        self.mutate(|state| state.set_profile_picture(reference))
            .await;
    }

    /// Restore the default initial state, discarding all answers and
    /// completion flags
    ///
    /// Called on logout.
    pub async fn reset(&self) {
        self.mutate(OnboardingState::reset).await;
    }

    /// Resolve where the wizard should open
    ///
    /// `has_identity_marker` is whatever durable signal the caller uses to
    /// tell a fresh install from a returning user whose session was torn
    /// down, typically presence of a previously captured account email.
    pub async fn resolve_entry_step(&self, has_identity_marker: bool) -> EntryStep {
        self.state.read().await.resolve_entry_step(has_identity_marker)
    }

    /// Immutable snapshot of the full aggregate
    pub async fn snapshot(&self) -> OnboardingState {
        self.state.read().await.clone()
    }

    /// The section currently displayed
    pub async fn current_section(&self) -> usize {
        self.state.read().await.current_section_index
    }

    /// Immutable snapshot of the accumulated answers
    pub async fn user_data(&self) -> UserData {
        self.state.read().await.user_data.clone()
    }

    /// Wait until every mutation dispatched so far is durable
    ///
    /// Graceful-shutdown support; mutations themselves never await I/O.
    pub async fn flush(&self) {
        self.persistence.flush().await;
    }
}
