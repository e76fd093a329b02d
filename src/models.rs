// ABOUTME: Core data model for the onboarding wizard aggregate
// ABOUTME: Defines WizardStep, UserData, OnboardingState and its pure transitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Core data structures for the onboarding wizard: the fixed step sequence,
//! the accumulating draft of user-provided answers, and the aggregate root
//! that owns the wizard position.
//!
//! ## Design Principles
//!
//! - **Pure transitions**: every state change is a synchronous method on
//!   [`OnboardingState`] with no I/O, so transition logic is unit-testable
//!   in isolation. Persistence happens in a separate adapter.
//! - **Serializable**: the whole aggregate round-trips through JSON as the
//!   snapshot written to durable storage.
//! - **Type Safe**: well-known answer groups are a closed enum while the
//!   payloads themselves stay free-form JSON.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::wizard;
use crate::errors::AppError;

/// One page of the onboarding flow
///
/// Steps are created once at initialization and are never removed or
/// reordered; `id` always equals the step's position in the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardStep {
    /// 0-based position in the fixed step sequence
    pub id: usize,
    /// Human-readable label
    pub name: String,
    /// Set once the user has advanced past this step
    pub completed: bool,
}

/// Well-known answer groups collected by the wizard
///
/// Screens use these typed constants instead of raw strings; free-form keys
/// remain accepted at the [`UserData`] level for forward compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerGroup {
    /// Name, age, contact details
    BasicInfo,
    /// Height, weight, and related measurements
    BodyMeasurements,
    /// Medical conditions, injuries, medications
    HealthInfo,
    /// Training history and experience level
    FitnessBackground,
    /// Target outcomes and timelines
    FitnessGoals,
    /// Dietary restrictions and preferences
    NutritionPreferences,
}

impl AnswerGroup {
    /// Stable storage key for this group
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::BasicInfo => "basic_info",
            Self::BodyMeasurements => "body_measurements",
            Self::HealthInfo => "health_info",
            Self::FitnessBackground => "fitness_background",
            Self::FitnessGoals => "fitness_goals",
            Self::NutritionPreferences => "nutrition_preferences",
        }
    }
}

impl Display for AnswerGroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.key())
    }
}

impl FromStr for AnswerGroup {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic_info" => Ok(Self::BasicInfo),
            "body_measurements" => Ok(Self::BodyMeasurements),
            "health_info" => Ok(Self::HealthInfo),
            "fitness_background" => Ok(Self::FitnessBackground),
            "fitness_goals" => Ok(Self::FitnessGoals),
            "nutrition_preferences" => Ok(Self::NutritionPreferences),
            other => Err(AppError::config(format!("unknown answer group: {other}"))),
        }
    }
}

/// Accumulating record of user-provided answers across all steps
///
/// Groups are independent top-level entries. Setting a group replaces its
/// previous payload wholesale; there is no recursive merging of nested
/// objects, and [`UserData::replace_group`] is named to make that explicit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    /// Answer groups keyed by group name
    #[serde(default)]
    pub groups: Map<String, Value>,
    /// Whether the user has finished initial setup
    #[serde(default)]
    pub setup_complete: bool,
    /// Opaque reference to an uploaded profile picture
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

impl UserData {
    /// Replace one answer group wholesale
    ///
    /// Any previous payload under `key` is discarded, including nested
    /// objects. Other groups are untouched.
    pub fn replace_group(&mut self, key: impl Into<String>, value: Value) {
        self.groups.insert(key.into(), value);
    }

    /// Shallow-merge `partial` into the stored groups
    ///
    /// Each top-level key is applied as a [`UserData::replace_group`] call:
    /// last write wins per key, untouched keys are preserved.
    pub fn merge(&mut self, partial: Map<String, Value>) {
        for (key, value) in partial {
            self.replace_group(key, value);
        }
    }

    /// Read an answer group by raw key
    #[must_use]
    pub fn group(&self, key: &str) -> Option<&Value> {
        self.groups.get(key)
    }

    /// Read a well-known answer group
    #[must_use]
    pub fn answer_group(&self, group: AnswerGroup) -> Option<&Value> {
        self.groups.get(group.key())
    }
}

/// Where the wizard should open when the app starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStep {
    /// Designated start screen for a user who has never begun the flow
    Start,
    /// Resume at the given section index
    Section(usize),
}

impl Display for EntryStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Start => f.write_str("start"),
            Self::Section(index) => write!(f, "section {index}"),
        }
    }
}

/// The onboarding aggregate root
///
/// Owns the wizard position, the fixed step sequence, and the accumulated
/// answers. All mutation goes through the transition methods below; callers
/// outside this crate receive cloned snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingState {
    /// Step currently displayed, always within `[0, total_sections)`
    pub current_section_index: usize,
    /// Length of the step sequence
    pub total_sections: usize,
    /// Ordered step sequence, `steps[i].id == i`
    pub steps: Vec<WizardStep>,
    /// Accumulated draft answers
    pub user_data: UserData,
    /// Refreshed on every mutation
    pub updated_at: DateTime<Utc>,
}

impl Default for OnboardingState {
    fn default() -> Self {
        Self::new()
    }
}

impl OnboardingState {
    /// Default initial state: section 0, nothing completed, empty answers
    #[must_use]
    pub fn new() -> Self {
        Self {
            current_section_index: 0,
            total_sections: wizard::TOTAL_SECTIONS,
            steps: Self::fresh_steps(|_| false),
            user_data: UserData::default(),
            updated_at: Utc::now(),
        }
    }

    fn fresh_steps(completed: impl Fn(usize) -> bool) -> Vec<WizardStep> {
        wizard::SECTION_NAMES
            .iter()
            .enumerate()
            .map(|(id, name)| WizardStep {
                id,
                name: (*name).to_owned(),
                completed: completed(id),
            })
            .collect()
    }

    fn last_section_index(&self) -> usize {
        self.total_sections.saturating_sub(1)
    }

    /// Mark the current step completed and move forward one step
    ///
    /// At the last step the index stays put but the completion mark is still
    /// applied, so repeated calls at the terminal step are idempotent after
    /// the first. Returns the new index.
    pub fn advance(&mut self) -> usize {
        if let Some(step) = self.steps.get_mut(self.current_section_index) {
            step.completed = true;
        }
        if self.current_section_index < self.last_section_index() {
            self.current_section_index += 1;
        }
        self.touch();
        self.current_section_index
    }

    /// Move back one step, staying at 0 when already there
    ///
    /// The completion flag of the step being left is not cleared. Returns
    /// the new index.
    pub fn retreat(&mut self) -> usize {
        if self.current_section_index > 0 {
            self.current_section_index -= 1;
            self.touch();
        }
        self.current_section_index
    }

    /// Jump directly to `index`, clamping to the valid range
    ///
    /// Screens call this on mount to resynchronize the tracker with the
    /// screen the user is actually viewing. Returns the effective index.
    pub fn set_current_section(&mut self, index: usize) -> usize {
        self.current_section_index = index.min(self.last_section_index());
        self.touch();
        self.current_section_index
    }

    /// Shallow-merge partial answers into the accumulated draft
    pub fn merge_user_data(&mut self, partial: Map<String, Value>) -> &UserData {
        self.user_data.merge(partial);
        self.touch();
        &self.user_data
    }

    /// Replace one answer group wholesale
    pub fn replace_group(&mut self, key: impl Into<String>, value: Value) -> &UserData {
        self.user_data.replace_group(key, value);
        self.touch();
        &self.user_data
    }

    /// Set the setup-complete flag
    pub fn set_setup_complete(&mut self, flag: bool) {
        self.user_data.setup_complete = flag;
        self.touch();
    }

    /// Set or clear the profile picture reference
    pub fn set_profile_picture(&mut self, reference: Option<String>) {
        self.user_data.profile_picture = reference;
        self.touch();
    }

    /// Restore the default initial state, discarding all answers and
    /// completion flags
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Resolve where the wizard should open
    ///
    /// A user at section 0 with no durable identity marker has never started
    /// the flow and gets the designated start screen. Anyone else resumes at
    /// their persisted section, falling back to the start screen if the
    /// persisted index maps to no known section.
    #[must_use]
    pub fn resolve_entry_step(&self, has_identity_marker: bool) -> EntryStep {
        if self.current_section_index == 0 && !has_identity_marker {
            return EntryStep::Start;
        }
        if self.current_section_index < self.total_sections {
            EntryStep::Section(self.current_section_index)
        } else {
            EntryStep::Start
        }
    }

    /// Repair a rehydrated snapshot so the aggregate invariants hold
    ///
    /// Snapshots written by older builds may carry a step list that disagrees
    /// with the current fixed sequence, or an index outside it. The step list
    /// is rebuilt preserving completion flags by id, and the index is clamped.
    pub fn sanitize(&mut self) {
        let sequence_matches = self.total_sections == wizard::TOTAL_SECTIONS
            && self.steps.len() == wizard::TOTAL_SECTIONS
            && self.steps.iter().enumerate().all(|(i, step)| step.id == i);

        if !sequence_matches {
            let completed: Vec<usize> = self
                .steps
                .iter()
                .filter(|step| step.completed)
                .map(|step| step.id)
                .collect();
            self.total_sections = wizard::TOTAL_SECTIONS;
            self.steps = Self::fresh_steps(|id| completed.contains(&id));
        }

        if self.current_section_index >= self.total_sections {
            self.current_section_index = self.last_section_index();
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_state_starts_at_section_zero() {
        let state = OnboardingState::new();
        assert_eq!(state.current_section_index, 0);
        assert_eq!(state.total_sections, wizard::TOTAL_SECTIONS);
        assert_eq!(state.steps.len(), wizard::TOTAL_SECTIONS);
        assert!(state.steps.iter().all(|step| !step.completed));
        assert!(!state.user_data.setup_complete);
    }

    #[test]
    fn step_ids_match_positions() {
        let state = OnboardingState::new();
        for (i, step) in state.steps.iter().enumerate() {
            assert_eq!(step.id, i);
            assert_eq!(step.name, wizard::SECTION_NAMES[i]);
        }
    }

    #[test]
    fn advance_marks_completed_and_increments() {
        let mut state = OnboardingState::new();
        let index = state.advance();
        assert_eq!(index, 1);
        assert!(state.steps[0].completed);
        assert!(!state.steps[1].completed);
    }

    #[test]
    fn advance_is_position_idempotent_at_last_step() {
        let mut state = OnboardingState::new();
        let last = state.total_sections - 1;
        state.set_current_section(last);
        for _ in 0..3 {
            assert_eq!(state.advance(), last);
        }
        assert!(state.steps[last].completed);
    }

    #[test]
    fn retreat_does_not_underflow() {
        let mut state = OnboardingState::new();
        assert_eq!(state.retreat(), 0);
        assert_eq!(state.current_section_index, 0);
    }

    #[test]
    fn retreat_preserves_completion() {
        let mut state = OnboardingState::new();
        state.set_current_section(3);
        state.advance();
        assert_eq!(state.retreat(), 3);
        assert!(state.steps[3].completed);
    }

    #[test]
    fn set_current_section_clamps_out_of_range() {
        let mut state = OnboardingState::new();
        assert_eq!(state.set_current_section(999), state.total_sections - 1);
    }

    #[test]
    fn merge_is_shallow_and_last_write_wins() {
        let mut state = OnboardingState::new();
        state.merge_user_data(json!({"a": {"x": 1}}).as_object().unwrap().clone());
        state.merge_user_data(json!({"b": 2}).as_object().unwrap().clone());
        assert_eq!(state.user_data.group("a"), Some(&json!({"x": 1})));
        assert_eq!(state.user_data.group("b"), Some(&json!(2)));

        // Nested objects are replaced wholesale, not deep-merged.
        state.merge_user_data(json!({"a": {"y": 3}}).as_object().unwrap().clone());
        assert_eq!(state.user_data.group("a"), Some(&json!({"y": 3})));
        assert_eq!(state.user_data.group("b"), Some(&json!(2)));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut state = OnboardingState::new();
        state.advance();
        state.replace_group(AnswerGroup::BasicInfo.key(), json!({"age": 30}));
        state.set_setup_complete(true);
        state.reset();
        assert_eq!(state.current_section_index, 0);
        assert!(state.steps.iter().all(|step| !step.completed));
        assert!(state.user_data.groups.is_empty());
        assert!(!state.user_data.setup_complete);
        assert!(state.user_data.profile_picture.is_none());
    }

    #[test]
    fn entry_step_distinguishes_fresh_from_resuming() {
        let mut state = OnboardingState::new();
        assert_eq!(state.resolve_entry_step(false), EntryStep::Start);
        assert_eq!(state.resolve_entry_step(true), EntryStep::Section(0));
        state.set_current_section(3);
        assert_eq!(state.resolve_entry_step(true), EntryStep::Section(3));
        assert_eq!(state.resolve_entry_step(false), EntryStep::Section(3));
    }

    #[test]
    fn sanitize_repairs_corrupt_snapshot() {
        let mut state = OnboardingState::new();
        state.steps.truncate(4);
        state.steps[2].completed = true;
        state.current_section_index = 42;
        state.sanitize();
        assert_eq!(state.steps.len(), wizard::TOTAL_SECTIONS);
        assert!(state.steps[2].completed);
        assert_eq!(state.current_section_index, state.total_sections - 1);
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let mut state = OnboardingState::new();
        state.advance();
        state.replace_group(AnswerGroup::BodyMeasurements.key(), json!({"weight_kg": 72.5}));
        let payload = serde_json::to_string(&state).unwrap();
        let restored: OnboardingState = serde_json::from_str(&payload).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn answer_group_keys_parse_back() {
        for group in [
            AnswerGroup::BasicInfo,
            AnswerGroup::BodyMeasurements,
            AnswerGroup::HealthInfo,
            AnswerGroup::FitnessBackground,
            AnswerGroup::FitnessGoals,
            AnswerGroup::NutritionPreferences,
        ] {
            assert_eq!(group.key().parse::<AnswerGroup>().unwrap(), group);
        }
        assert!("recipes".parse::<AnswerGroup>().is_err());
    }
}
