// ABOUTME: Unified error handling for the onboarding tracker
// ABOUTME: Defines store, serialization, and configuration error variants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Error Handling
//!
//! Centralized error types for the crate. Store failures are recoverable by
//! design: reads degrade to the default state and writes are retried on the
//! next mutation, so none of these errors ever reaches an end user.

use thiserror::Error;

/// Result alias used throughout the crate
pub type AppResult<T> = Result<T, AppError>;

/// Unified error type for the onboarding tracker
#[derive(Debug, Error)]
pub enum AppError {
    /// Durable storage could not be read or written
    #[error("store unavailable: {context}")]
    StoreUnavailable {
        /// What the store was doing when it failed
        context: String,
    },

    /// Snapshot serialization or deserialization failed
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration is missing or invalid
    #[error("invalid configuration: {context}")]
    Config {
        /// What was rejected and why
        context: String,
    },
}

impl AppError {
    /// Store read/write failure with context
    pub fn store_unavailable(context: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            context: context.into(),
        }
    }

    /// Configuration failure with context
    pub fn config(context: impl Into<String>) -> Self {
        Self::Config {
            context: context.into(),
        }
    }
}

#[cfg(feature = "sqlite")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        Self::StoreUnavailable {
            context: err.to_string(),
        }
    }
}
