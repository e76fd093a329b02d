// ABOUTME: SQLite store implementation for durable snapshot persistence
// ABOUTME: Single upsert table of JSON payloads, created on first open
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! SQLite store implementation
//!
//! Snapshots live in one `onboarding_snapshots` table as JSON text. The
//! database file and its parent directory are created on first open, so a
//! fresh install needs no setup step.

use super::{StoreConfig, StoreProvider};
use crate::errors::{AppError, AppResult};
use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use std::path::Path;
use std::str::FromStr;

/// SQLite-backed store
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Access the underlying pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn connect_options(database_url: &str) -> AppResult<SqliteConnectOptions> {
    let path = database_url
        .strip_prefix("sqlite:")
        .unwrap_or(database_url);

    // SQLite creates the file but not missing parent directories.
    if path != ":memory:" {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|err| {
                    AppError::store_unavailable(format!(
                        "creating {}: {err}",
                        parent.display()
                    ))
                })?;
            }
        }
    }

    Ok(SqliteConnectOptions::from_str(database_url)?.create_if_missing(true))
}

#[async_trait::async_trait]
impl StoreProvider for SqliteStore {
    async fn new(config: StoreConfig) -> AppResult<Self> {
        let options = connect_options(&config.database_url)?;
        let pool = SqlitePool::connect_with(options).await?;
        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS onboarding_snapshots (
                key TEXT PRIMARY KEY,
                payload TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T) -> AppResult<()> {
        let payload = serde_json::to_string(value)?;
        sqlx::query(
            r"
            INSERT INTO onboarding_snapshots (key, payload, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at
            ",
        )
        .bind(key)
        .bind(payload)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT payload FROM onboarding_snapshots WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some((payload,)) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        sqlx::query("DELETE FROM onboarding_snapshots WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
