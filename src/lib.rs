// ABOUTME: Main library entry point for Pierre onboarding state tracking
// ABOUTME: Provides the wizard progress tracker, durable stores, and persistence adapter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Onboarding
//!
//! Onboarding wizard state tracking for Pierre fitness applications. The
//! tracker owns the wizard's current step index, the fixed step sequence,
//! and the accumulating draft of user-provided answers, and persists the
//! whole aggregate across process restarts through a pluggable store.
//!
//! ## Features
//!
//! - **Pure transitions**: state changes are synchronous methods on
//!   [`models::OnboardingState`], unit-testable without I/O
//! - **Write-behind persistence**: mutations never await storage; a spawned
//!   adapter serializes the full aggregate with last-write-wins semantics
//! - **Pluggable stores**: in-memory and SQLite backends behind
//!   [`store::StoreProvider`], selected by URL scheme
//! - **Restart-safe**: snapshots from older builds are repaired on load so
//!   the aggregate invariants always hold
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pierre_onboarding::models::AnswerGroup;
//! use pierre_onboarding::store::memory::InMemoryStore;
//! use pierre_onboarding::OnboardingProgressTracker;
//! use serde_json::json;
//!
//! # async fn example() {
//! let tracker = OnboardingProgressTracker::initialize(InMemoryStore::default()).await;
//!
//! tracker
//!     .replace_answer_group(AnswerGroup::BasicInfo, json!({"age": 30}))
//!     .await;
//! let section = tracker.advance().await;
//! assert_eq!(section, 1);
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **models**: the aggregate and its pure state transitions
//! - **tracker**: lock-guarded operations over an injected store
//! - **store**: durable key-value port with memory and SQLite backends
//! - **persistence**: the write-behind side-effect boundary

/// Environment configuration management
pub mod config;
/// Domain constants grouped by concern
pub mod constants;
/// Unified error handling
pub mod errors;
/// Structured logging setup
pub mod logging;
/// Core data models and pure transitions
pub mod models;
/// Write-behind persistence adapter
pub mod persistence;
/// Durable key-value store abstraction
pub mod store;
/// The onboarding progress tracker
pub mod tracker;

pub use errors::{AppError, AppResult};
pub use models::{AnswerGroup, EntryStep, OnboardingState, UserData, WizardStep};
pub use store::factory::Store;
pub use tracker::OnboardingProgressTracker;
