//! Integration tests: event → mood → echo → action flows.

use std::time::Duration;

use chrono::{TimeDelta, Utc};

use koji_core::actions;
use koji_core::history::EventHistory;
use koji_core::strategy::{self, ActionRequest, DefaultStrategy};
use koji_core::transitions;
use koji_core::{
    Action, EmotionalState, Event, EventContext, Intensity, KojiConfig, Mood, VariationEngine,
};

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn loud_noise_escalates_to_fright() {
    let mut state = EmotionalState::new();
    assert_eq!(state.mood(), Mood::Curious);
    assert_eq!(state.intensity(), Intensity::MEDIUM);

    assert!(state.process_event(&EventContext::new(Event::LoudNoise)));
    assert_eq!(state.mood(), Mood::Startled);

    assert!(state.process_event(&EventContext::new(Event::LoudNoise)));
    assert_eq!(state.mood(), Mood::Frightened);
}

#[test]
fn fright_decays_back_to_baseline() {
    let mut state = EmotionalState::new();
    let t0 = Utc::now();
    state.set_mood_at(Mood::Frightened, Intensity::HIGH, t0);

    let t1 = t0 + TimeDelta::seconds(16);
    assert!(state.decay_at(t1));
    assert_eq!(state.mood(), Mood::Cautious);
    assert!((state.intensity().value() - 0.7).abs() < 1e-9);

    // Cautious dwells 20s before returning to curious.
    assert!(!state.decay_at(t1 + TimeDelta::seconds(19)));
    assert!(state.decay_at(t1 + TimeDelta::seconds(20)));
    assert_eq!(state.mood(), Mood::Curious);
    assert!(state.is_baseline());
}

#[test]
fn scare_leaves_an_echo_in_later_curiosity() {
    let mut state = EmotionalState::new();
    let mut engine = VariationEngine::with_seed(21);
    let t0 = Utc::now();
    state.set_mood_at(Mood::Frightened, Intensity::HIGH, t0);

    let t1 = t0 + TimeDelta::seconds(15);
    let before = state.mood();
    assert!(state.decay_at(t1));
    engine.record_mood_change_at(before, t1);

    let echoes = engine.active_echoes_at(t1 + TimeDelta::seconds(22));
    assert_eq!(echoes.len(), 1);
    assert_eq!(echoes[0].from_mood, Mood::Frightened);
    assert!((echoes[0].strength - 0.51).abs() < 0.1);

    assert!(engine.active_echoes_at(t1 + TimeDelta::seconds(46)).is_empty());
}

#[test]
fn unmatched_events_change_nothing() {
    for mood in Mood::ALL {
        for event in Event::ALL {
            if transitions::transition(event, mood).is_some() {
                continue;
            }
            let mut state = EmotionalState::new();
            let t0 = Utc::now() - TimeDelta::seconds(3);
            state.set_mood_at(mood, Intensity::LOW, t0);
            assert!(!state.process_event(&EventContext::new(event).with_intensity(0.95)));
            assert_eq!(state.mood(), mood);
            assert_eq!(state.intensity(), Intensity::LOW);
            assert_eq!(state.entered_at(), t0);
        }
    }
}

#[test]
fn every_mood_reaches_baseline_within_its_path_length() {
    for mood in Mood::ALL {
        let mut state = EmotionalState::new();
        let mut now = Utc::now();
        state.set_mood_at(mood, Intensity::HIGH, now);

        let limit = transitions::steps_to_baseline(mood);
        let mut steps = 0;
        while !state.is_baseline() {
            now += TimeDelta::minutes(2);
            assert!(state.decay_at(now), "{mood} stuck at {}", state.mood());
            steps += 1;
            assert!(steps <= limit, "{mood} took more than {limit} steps");
        }
    }
}

#[test]
fn configured_decay_step_is_used() {
    let config = KojiConfig::from_toml("[state]\ndecay_step = 0.5\n").expect("valid config");
    let mut state = EmotionalState::with_config(config.state);
    let t0 = Utc::now();
    state.set_mood_at(Mood::Happy, Intensity::HIGH, t0);
    assert!(state.decay_at(t0 + TimeDelta::seconds(45)));
    assert!((state.intensity().value() - 0.4).abs() < 1e-9);
}

// ---------------------------------------------------------------------------
// Action selection
// ---------------------------------------------------------------------------

#[test]
fn weighted_selection_matches_table_distribution() {
    let mut engine = VariationEngine::with_seed(1234);
    let now = Utc::now();
    let draws = 1000;

    for mood in [Mood::Curious, Mood::Frightened, Mood::Happy] {
        let table = actions::weighted_actions(mood);
        let total = actions::total_weight(table);
        let mut counts = std::collections::HashMap::<Action, u32>::new();
        for _ in 0..draws {
            let picked = engine.select_action_at(mood, Intensity::MEDIUM, now);
            *counts.entry(picked.action).or_default() += 1;
        }
        for wa in table {
            let expected = wa.weight / total;
            let observed = f64::from(counts.get(&wa.action).copied().unwrap_or(0)) / f64::from(draws);
            assert!(
                (observed - expected).abs() < 0.06,
                "{mood}/{}: expected {expected:.3}, got {observed:.3}",
                wa.action
            );
        }
    }
}

#[tokio::test]
async fn default_strategy_with_history() {
    let mut state = EmotionalState::new();
    let mut history = EventHistory::default();

    for event in [Event::Music, Event::Rhythm, Event::Petted] {
        let ctx = EventContext::new(event);
        history.push(event);
        state.process_event(&ctx);
    }
    assert_eq!(state.mood(), Mood::Happy);

    let request = ActionRequest {
        state: state.snapshot(),
        event: EventContext::new(Event::Petted).with_source("hand"),
        recent_events: history.as_vec(),
    };
    let decision =
        strategy::select_with_fallback(&DefaultStrategy, &request, Duration::from_millis(50)).await;
    assert_eq!(decision.action, Action::Stay);
    assert!(!decision.is_fallback());
}
