// ABOUTME: Environment configuration management for the onboarding tracker
// ABOUTME: Resolves store backend URL and log level from environment variables
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Environment-based configuration management

use crate::constants::env_config;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Standard operational logging
    #[default]
    Info,
    /// Verbose diagnostics
    Debug,
    /// Everything, including per-mutation traces
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback to `Info`
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }

    /// Lowercase name as understood by `EnvFilter`
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Runtime configuration resolved from the environment
#[derive(Debug, Clone)]
pub struct OnboardingConfig {
    /// Store backend URL (`memory:` or `sqlite:<path>`)
    pub database_url: String,
    /// Log level for the tracing subscriber
    pub log_level: LogLevel,
}

impl OnboardingConfig {
    /// Resolve configuration from environment variables
    ///
    /// `ONBOARDING_DATABASE_URL` selects the store backend; when unset, a
    /// SQLite file under the platform-local data directory is used so a
    /// fresh install persists out of the box.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            database_url: env::var(env_config::DATABASE_URL_ENV)
                .unwrap_or_else(|_| default_database_url()),
            log_level: LogLevel::from_str_or_default(
                &env::var(env_config::LOG_LEVEL_ENV).unwrap_or_default(),
            ),
        }
    }
}

/// Default store URL: a SQLite file under the platform data directory
#[must_use]
pub fn default_database_url() -> String {
    let dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("./data"))
        .join("pierre");
    format!("sqlite:{}", dir.join("onboarding.db").display())
}
