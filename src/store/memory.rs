// ABOUTME: In-memory store implementation backed by a shared HashMap
// ABOUTME: Volatile backend for tests and store-unavailable degradation
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::{StoreConfig, StoreProvider};
use crate::errors::AppResult;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory store holding serialized payloads keyed by string
///
/// Payloads are kept as serialized bytes so the memory backend exercises the
/// same serialization path as the durable ones. State is shared across
/// clones, which is what lets a tracker and its persistence task observe the
/// same entries.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryStore {
    /// Number of stored entries
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the store holds no entries
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl StoreProvider for InMemoryStore {
    async fn new(_config: StoreConfig) -> AppResult<Self> {
        Ok(Self::default())
    }

    async fn migrate(&self) -> AppResult<()> {
        Ok(())
    }

    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T) -> AppResult<()> {
        let payload = serde_json::to_vec(value)?;
        self.entries.write().await.insert(key.to_owned(), payload);
        Ok(())
    }

    async fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(payload) => Ok(Some(serde_json::from_slice(payload)?)),
            None => Ok(None),
        }
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
