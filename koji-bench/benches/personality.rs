//! Koji personality benchmarks.
//!
//! Everything here runs on the robot's control loop, so each operation
//! should stay well under a millisecond:
//!   process_event ..................... < 1μs
//!   select_action_with_echoes ......... < 5μs
//!   active_echoes_full_ledger ......... < 2μs
//!   select_micro_behavior ............. < 1μs

use chrono::{TimeDelta, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use koji_core::echo::EchoLedger;
use koji_core::{EmotionalState, Event, EventContext, Intensity, Mood, VariationEngine};

/// Benchmark: one event through the transition table.
fn bench_process_event(c: &mut Criterion) {
    let now = Utc::now();
    let events = [
        EventContext::new(Event::LoudNoise),
        EventContext::new(Event::Music).with_intensity(0.9),
        EventContext::new(Event::Petted).with_source("hand"),
        EventContext::new(Event::Silence),
    ];
    let mut state = EmotionalState::new();

    c.bench_function("process_event", |b| {
        let mut i = 0;
        b.iter(|| {
            let changed = state.process_event_at(black_box(&events[i % events.len()]), now);
            i += 1;
            black_box(changed);
        });
    });
}

/// Benchmark: weighted selection with two live echoes injecting candidates.
fn bench_select_action(c: &mut Criterion) {
    let mut engine = VariationEngine::with_seed(42);
    let t0 = Utc::now();
    engine.record_mood_change_at(Mood::Frightened, t0);
    engine.record_mood_change_at(Mood::Happy, t0 + TimeDelta::seconds(5));
    let now = t0 + TimeDelta::seconds(10);

    c.bench_function("select_action_with_echoes", |b| {
        b.iter(|| {
            let picked = engine.select_action_at(black_box(Mood::Curious), Intensity::MEDIUM, now);
            black_box(picked);
        });
    });
}

/// Benchmark: strength recomputation over a full ledger.
fn bench_active_echoes(c: &mut Criterion) {
    let mut ledger = EchoLedger::default();
    let t0 = Utc::now();
    for (i, mood) in Mood::ALL.iter().cycle().take(ledger.capacity()).enumerate() {
        ledger.record_at(*mood, t0 + TimeDelta::seconds(i64::try_from(i).unwrap_or(0)));
    }
    let now = t0 + TimeDelta::seconds(15);

    c.bench_function("active_echoes_full_ledger", |b| {
        b.iter(|| {
            black_box(ledger.active_at(black_box(now)));
        });
    });
}

/// Benchmark: idle micro-behavior draw.
fn bench_micro_behavior(c: &mut Criterion) {
    let mut engine = VariationEngine::with_seed(7);

    c.bench_function("select_micro_behavior", |b| {
        b.iter(|| {
            black_box(engine.select_micro_behavior(black_box(Mood::Sleepy)));
        });
    });
}

criterion_group!(
    benches,
    bench_process_event,
    bench_select_action,
    bench_active_echoes,
    bench_micro_behavior,
);
criterion_main!(benches);
