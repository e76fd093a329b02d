// ABOUTME: Store factory and backend abstraction for runtime backend selection
// ABOUTME: Provides unified interface over in-memory and SQLite stores via URL detection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Store factory for creating store providers
//!
//! Backend selection happens automatically from the connection URL scheme:
//! `memory:` selects the volatile in-memory store, `sqlite:` the durable
//! SQLite store.

use super::{memory::InMemoryStore, StoreConfig, StoreProvider};
use crate::errors::{AppError, AppResult};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

#[cfg(feature = "sqlite")]
use super::sqlite::SqliteStore;

/// Supported store backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreType {
    /// Volatile in-memory backend
    Memory,
    /// Durable SQLite backend
    Sqlite,
}

/// Detect the store backend from a connection URL
///
/// # Errors
///
/// Returns an error for URL schemes no backend understands
pub fn detect_store_type(database_url: &str) -> AppResult<StoreType> {
    if database_url == ":memory:" || database_url.starts_with("memory:") {
        Ok(StoreType::Memory)
    } else if database_url.starts_with("sqlite:") {
        Ok(StoreType::Sqlite)
    } else {
        Err(AppError::config(format!(
            "unsupported store URL: {database_url}"
        )))
    }
}

/// Store instance wrapper that delegates to the selected backend
#[derive(Clone)]
pub enum Store {
    /// Volatile in-memory backend
    Memory(InMemoryStore),
    /// Durable SQLite backend
    #[cfg(feature = "sqlite")]
    Sqlite(SqliteStore),
}

impl Store {
    /// Descriptive string for the current backend
    #[must_use]
    pub const fn backend_info(&self) -> &'static str {
        match self {
            Self::Memory(_) => "In-Memory (volatile)",
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => "SQLite (durable)",
        }
    }

    /// The backend type enum
    #[must_use]
    pub const fn store_type(&self) -> StoreType {
        match self {
            Self::Memory(_) => StoreType::Memory,
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => StoreType::Sqlite,
        }
    }

    /// Create a store from environment configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configured URL is unsupported or the backend
    /// fails to open
    pub async fn from_env() -> AppResult<Self> {
        let config = crate::config::OnboardingConfig::from_env();
        <Self as StoreProvider>::new(StoreConfig::new(config.database_url)).await
    }
}

#[async_trait::async_trait]
impl StoreProvider for Store {
    async fn new(config: StoreConfig) -> AppResult<Self> {
        debug!("Detecting store backend from URL: {}", config.database_url);
        let store_type = detect_store_type(&config.database_url)?;

        match store_type {
            StoreType::Memory => {
                info!("Initializing in-memory store");
                let store = InMemoryStore::new(config).await?;
                Ok(Self::Memory(store))
            }
            #[cfg(feature = "sqlite")]
            StoreType::Sqlite => {
                info!("Initializing SQLite store");
                let store = SqliteStore::new(config).await?;
                info!("SQLite store initialized successfully");
                Ok(Self::Sqlite(store))
            }
            #[cfg(not(feature = "sqlite"))]
            StoreType::Sqlite => Err(AppError::config(
                "SQLite support not enabled. Enable the 'sqlite' feature flag.",
            )),
        }
    }

    async fn migrate(&self) -> AppResult<()> {
        match self {
            Self::Memory(store) => store.migrate().await,
            #[cfg(feature = "sqlite")]
            Self::Sqlite(store) => store.migrate().await,
        }
    }

    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T) -> AppResult<()> {
        match self {
            Self::Memory(store) => store.set(key, value).await,
            #[cfg(feature = "sqlite")]
            Self::Sqlite(store) => store.set(key, value).await,
        }
    }

    async fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        match self {
            Self::Memory(store) => store.get(key).await,
            #[cfg(feature = "sqlite")]
            Self::Sqlite(store) => store.get(key).await,
        }
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        match self {
            Self::Memory(store) => store.remove(key).await,
            #[cfg(feature = "sqlite")]
            Self::Sqlite(store) => store.remove(key).await,
        }
    }
}
