// ABOUTME: Domain constants for the onboarding wizard organized by concern
// ABOUTME: Section sequence, storage namespace, and environment variable names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Application constants grouped by domain rather than collected in a single
//! flat namespace.

/// Wizard section sequence
pub mod wizard {
    /// Number of sections in the onboarding flow
    pub const TOTAL_SECTIONS: usize = 9;

    /// Ordered section names; the array index is the section id
    pub const SECTION_NAMES: [&str; TOTAL_SECTIONS] = [
        "Getting Started",
        "Basic Info",
        "Body Measurements",
        "Health Info",
        "Fitness Background",
        "Fitness Goals",
        "Nutrition Preferences",
        "Profile Picture",
        "Review & Confirm",
    ];
}

/// Durable storage namespace
pub mod storage {
    /// Fixed key the serialized aggregate is stored under
    pub const SNAPSHOT_KEY: &str = "onboarding_state";
}

/// Environment variable names
pub mod env_config {
    /// Selects the store backend URL (`memory:` or `sqlite:<path>`)
    pub const DATABASE_URL_ENV: &str = "ONBOARDING_DATABASE_URL";

    /// Overrides the default log level
    pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

    /// Overrides the log output format (json, pretty, compact)
    pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";
}
