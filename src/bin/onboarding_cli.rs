// ABOUTME: Onboarding CLI - command-line tool for inspecting and driving wizard state
// ABOUTME: Handles status display, step navigation, answer updates, and resets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Show the persisted wizard state
//! onboarding-cli status
//!
//! # Complete the current step and move forward
//! onboarding-cli advance
//!
//! # Jump to a specific section
//! onboarding-cli goto 3
//!
//! # Store an answer group
//! onboarding-cli set-group basic_info '{"age": 30}'
//!
//! # Resolve the wizard entry step for a user with a stored email
//! onboarding-cli entry --identity
//!
//! # Discard all progress (logout)
//! onboarding-cli reset
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pierre_onboarding::config::{LogLevel, OnboardingConfig};
use pierre_onboarding::logging::{init_logging, LogFormat, LoggingConfig};
use pierre_onboarding::models::AnswerGroup;
use pierre_onboarding::store::factory::Store;
use pierre_onboarding::store::{StoreConfig, StoreProvider};
use pierre_onboarding::OnboardingProgressTracker;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "onboarding-cli",
    about = "Pierre onboarding state management CLI",
    long_about = "Command-line tool for inspecting and driving the persisted onboarding wizard state."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Store URL override (`memory:` or `sqlite:<path>`)
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Show the full wizard state as JSON
    Status,
    /// Complete the current step and move forward
    Advance,
    /// Move back one step
    Retreat,
    /// Jump to a specific section index
    Goto {
        /// 0-based section index
        index: usize,
    },
    /// Replace one answer group with a JSON payload
    SetGroup {
        /// Answer group key (e.g. basic_info, fitness_goals)
        group: AnswerGroup,
        /// JSON payload for the group
        json: String,
    },
    /// Mark setup complete (or incomplete with --undo)
    Complete {
        /// Clear the flag instead of setting it
        #[arg(long)]
        undo: bool,
    },
    /// Discard all progress and answers
    Reset,
    /// Resolve which step the wizard should open to
    Entry {
        /// Treat a durable identity marker (e.g. a stored email) as present
        #[arg(long)]
        identity: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        LoggingConfig::from_env().level
    };
    init_logging(&LoggingConfig {
        level,
        format: LogFormat::Compact,
    })?;

    let database_url = cli
        .database_url
        .unwrap_or_else(|| OnboardingConfig::from_env().database_url);
    let store = <Store as StoreProvider>::new(StoreConfig::new(database_url)).await?;
    info!("Store backend: {}", store.backend_info());

    let tracker = OnboardingProgressTracker::initialize(store).await;
    run_command(&tracker, cli.command).await?;

    // Make sure every dispatched write lands before the process exits.
    tracker.flush().await;
    Ok(())
}

async fn run_command(tracker: &OnboardingProgressTracker, command: Command) -> Result<()> {
    match command {
        Command::Status => {
            let snapshot = tracker.snapshot().await;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Command::Advance => {
            let section = tracker.advance().await;
            println!("now at section {section}");
        }
        Command::Retreat => {
            let section = tracker.retreat().await;
            println!("now at section {section}");
        }
        Command::Goto { index } => {
            let section = tracker.set_current_section(index).await;
            println!("now at section {section}");
        }
        Command::SetGroup { group, json } => {
            let value = serde_json::from_str(&json)
                .with_context(|| format!("payload for {group} is not valid JSON"))?;
            let user_data = tracker.replace_answer_group(group, value).await;
            println!("{}", serde_json::to_string_pretty(&user_data)?);
        }
        Command::Complete { undo } => {
            tracker.set_setup_complete(!undo).await;
            println!("setup_complete = {}", !undo);
        }
        Command::Reset => {
            tracker.reset().await;
            println!("onboarding state reset");
        }
        Command::Entry { identity } => {
            let entry = tracker.resolve_entry_step(identity).await;
            println!("{entry}");
        }
    }
    Ok(())
}
