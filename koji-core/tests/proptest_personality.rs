//! Property-based tests for the Koji personality core.
//!
//! Transitions, decay and echoes are checked against arbitrary moods,
//! events, hints and clock offsets.

use chrono::{TimeDelta, Utc};
use proptest::prelude::*;

use koji_core::echo::{self, EchoLedger};
use koji_core::micro;
use koji_core::transitions::{self, TransitionLookup};
use koji_core::{EmotionalState, Event, EventContext, Intensity, Mood, VariationEngine};

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

fn arb_mood() -> impl Strategy<Value = Mood> {
    prop::sample::select(Mood::ALL.to_vec())
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop::sample::select(Event::ALL.to_vec())
}

fn arb_intensity() -> impl Strategy<Value = Intensity> {
    (0.0..=1.0f64).prop_map(Intensity::new)
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn missing_rule_is_a_no_op(mood in arb_mood(), event in arb_event(), hint in 0.0..=1.0f64, intensity in arb_intensity()) {
        prop_assume!(matches!(transitions::lookup(event, mood), TransitionLookup::NoRule));
        let mut state = EmotionalState::new();
        let t0 = Utc::now();
        state.set_mood_at(mood, intensity, t0);

        let changed = state.process_event_at(&EventContext::new(event).with_intensity(hint), t0 + TimeDelta::seconds(1));
        prop_assert!(!changed);
        prop_assert_eq!(state.mood(), mood);
        prop_assert_eq!(state.intensity(), intensity);
        prop_assert_eq!(state.entered_at(), t0);
    }

    #[test]
    fn matching_rule_commits_table_mood(mood in arb_mood(), event in arb_event(), hint in 0.0..=1.0f64) {
        let Some(rule) = transitions::transition(event, mood) else {
            return Ok(());
        };
        let mut state = EmotionalState::new();
        state.set_mood(mood, Intensity::MEDIUM);
        let changed = state.process_event(&EventContext::new(event).with_intensity(hint));

        prop_assert_eq!(state.mood(), rule.new_mood);
        prop_assert_eq!(changed, rule.new_mood != mood);
        let expected = if hint > 0.7 {
            Intensity::HIGH
        } else if hint < 0.3 {
            Intensity::LOW
        } else {
            rule.tier.intensity()
        };
        prop_assert_eq!(state.intensity(), expected);
    }
}

// ---------------------------------------------------------------------------
// Decay
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn decay_respects_dwell_time(mood in arb_mood(), intensity in arb_intensity(), elapsed_ms in 0i64..120_000) {
        let mut state = EmotionalState::new();
        let t0 = Utc::now();
        state.set_mood_at(mood, intensity, t0);

        let changed = state.decay_at(t0 + TimeDelta::milliseconds(elapsed_ms));
        match transitions::decay_dwell_time(mood) {
            None => {
                prop_assert!(!changed);
                prop_assert_eq!(state.mood(), mood);
            }
            Some(dwell) if (elapsed_ms as u128) < dwell.as_millis() => {
                prop_assert!(!changed);
                prop_assert_eq!(state.mood(), mood);
                prop_assert_eq!(state.intensity(), intensity);
            }
            Some(_) => {
                prop_assert!(changed);
                prop_assert_eq!(state.mood(), transitions::decay_successor(mood));
                prop_assert!(state.intensity() >= Intensity::LOW);
                let ceiling = if intensity < Intensity::LOW { Intensity::LOW } else { intensity };
                prop_assert!(state.intensity() <= ceiling);
            }
        }
    }

    #[test]
    fn decay_always_terminates_at_baseline(mood in arb_mood()) {
        let mut state = EmotionalState::new();
        let mut now = Utc::now();
        state.set_mood_at(mood, Intensity::HIGH, now);
        for _ in 0..transitions::steps_to_baseline(mood) {
            now += TimeDelta::seconds(61);
            state.decay_at(now);
        }
        prop_assert!(state.is_baseline());
    }
}

// ---------------------------------------------------------------------------
// Echoes
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn echo_strength_never_increases(mood in arb_mood(), a_ms in 0i64..70_000, b_ms in 0i64..70_000) {
        let (early, late) = if a_ms <= b_ms { (a_ms, b_ms) } else { (b_ms, a_ms) };
        let mut ledger = EchoLedger::default();
        let t0 = Utc::now();
        ledger.record_at(mood, t0);

        let strength = |ms: i64| {
            ledger
                .active_at(t0 + TimeDelta::milliseconds(ms))
                .first()
                .map_or(0.0, |e| e.strength)
        };
        let (s_early, s_late) = (strength(early), strength(late));
        prop_assert!(s_late <= s_early);
        prop_assert!((0.0..=1.0).contains(&s_early));

        if let Some(window) = echo::echo_window(mood) {
            if (late as u128) >= window.as_millis() {
                prop_assert!(ledger.active_at(t0 + TimeDelta::milliseconds(late)).is_empty());
            }
        }
    }

    #[test]
    fn ledger_never_exceeds_capacity(capacity in 1usize..16, moods in prop::collection::vec(arb_mood(), 0..40)) {
        let mut ledger = EchoLedger::new(capacity);
        for mood in &moods {
            ledger.record(*mood);
        }
        prop_assert_eq!(ledger.len(), moods.len().min(capacity));
    }
}

// ---------------------------------------------------------------------------
// Variation
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn selection_without_echoes_stays_in_table(seed in any::<u64>(), mood in arb_mood(), intensity in arb_intensity()) {
        let mut engine = VariationEngine::with_seed(seed);
        let picked = engine.select_action_at(mood, intensity, Utc::now());
        let table = koji_core::actions::weighted_actions(mood);
        prop_assert!(table.iter().any(|wa| wa.action == picked.action));
    }

    #[test]
    fn micro_behavior_is_none_or_from_table(seed in any::<u64>(), mood in arb_mood()) {
        let mut engine = VariationEngine::with_seed(seed);
        if let Some(behavior) = engine.select_micro_behavior(mood) {
            prop_assert!(micro::micro_behaviors(mood).iter().any(|mb| mb.behavior == behavior));
        }
    }
}
