// ABOUTME: Criterion benchmarks for wizard state transitions and snapshot serialization
// ABOUTME: Measures transition throughput and serde_json performance for the aggregate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pierre_onboarding::constants::wizard;
use pierre_onboarding::models::{AnswerGroup, OnboardingState};
use serde_json::json;

fn populated_state() -> OnboardingState {
    let mut state = OnboardingState::new();
    state.replace_group(
        AnswerGroup::BasicInfo.key(),
        json!({"first_name": "Jordan", "last_name": "Lee", "age": 30}),
    );
    state.replace_group(
        AnswerGroup::BodyMeasurements.key(),
        json!({"weight_kg": 72.5, "height_cm": 180, "body_fat_pct": 18.2}),
    );
    state.replace_group(
        AnswerGroup::FitnessGoals.key(),
        json!({"target": "half marathon", "weekly_sessions": 4, "horizon_weeks": 16}),
    );
    for _ in 0..5 {
        state.advance();
    }
    state
}

fn bench_transitions(c: &mut Criterion) {
    c.bench_function("walk_full_wizard", |b| {
        b.iter(|| {
            let mut state = OnboardingState::new();
            for _ in 0..wizard::TOTAL_SECTIONS {
                black_box(state.advance());
            }
            for _ in 0..wizard::TOTAL_SECTIONS {
                black_box(state.retreat());
            }
        });
    });

    c.bench_function("merge_answer_group", |b| {
        let partial = json!({"nutrition_preferences": {"diet": "vegetarian", "meals_per_day": 4}})
            .as_object()
            .unwrap()
            .clone();
        b.iter(|| {
            let mut state = populated_state();
            state.merge_user_data(black_box(partial.clone()));
        });
    });
}

fn bench_snapshot_serialization(c: &mut Criterion) {
    let state = populated_state();
    let payload = serde_json::to_string(&state).unwrap();

    c.bench_function("serialize_snapshot", |b| {
        b.iter(|| serde_json::to_string(black_box(&state)).unwrap());
    });

    c.bench_function("deserialize_snapshot", |b| {
        b.iter(|| {
            let restored: OnboardingState = serde_json::from_str(black_box(&payload)).unwrap();
            restored
        });
    });
}

criterion_group!(benches, bench_transitions, bench_snapshot_serialization);
criterion_main!(benches);
