// ABOUTME: Durable key-value store abstraction for onboarding snapshots
// ABOUTME: Pluggable backend support (in-memory, SQLite) behind a provider trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Store abstraction for snapshot persistence.
//!
//! The tracker serializes the full onboarding aggregate as one JSON blob
//! under a fixed namespace key. Backends only need dumb get/set/remove of
//! blobs; everything domain-specific stays above this layer.

use crate::errors::AppResult;
use serde::{de::DeserializeOwned, Serialize};

/// Store factory for backend selection
pub mod factory;
/// In-memory store implementation
pub mod memory;
/// SQLite store implementation
#[cfg(feature = "sqlite")]
pub mod sqlite;

/// Store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Backend connection URL (`memory:` or `sqlite:<path>`)
    pub database_url: String,
}

impl StoreConfig {
    /// Configuration for the given backend URL
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }
}

/// Store provider trait for pluggable backend implementations
///
/// # Examples
///
/// ```rust,no_run
/// use pierre_onboarding::models::OnboardingState;
/// use pierre_onboarding::store::memory::InMemoryStore;
/// use pierre_onboarding::store::{StoreConfig, StoreProvider};
/// # async fn example() -> Result<(), pierre_onboarding::errors::AppError> {
///
/// let store = InMemoryStore::new(StoreConfig::new("memory:")).await?;
/// store.migrate().await?;
///
/// let state = OnboardingState::new();
/// store.set("onboarding_state", &state).await?;
///
/// let restored: Option<OnboardingState> = store.get("onboarding_state").await?;
/// assert!(restored.is_some());
/// # Ok(())
/// # }
/// ```
#[async_trait::async_trait]
pub trait StoreProvider: Send + Sync + Clone {
    /// Create a new store instance with configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be opened
    async fn new(config: StoreConfig) -> AppResult<Self>
    where
        Self: Sized;

    /// Prepare the backend schema or namespace
    ///
    /// # Errors
    ///
    /// Returns an error if schema setup fails
    async fn migrate(&self) -> AppResult<()>;

    /// Serialize and store `value` under `key`, replacing any previous payload
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails
    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T) -> AppResult<()>;

    /// Load and deserialize the payload stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the read or deserialization fails
    async fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>>;

    /// Delete the payload stored under `key`, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    async fn remove(&self, key: &str) -> AppResult<()>;
}
