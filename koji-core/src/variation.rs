//! Variation engine — turns a mood into one concrete, slightly different
//! action every time.
//!
//! ```text
//!   weighted_actions(mood) ──┐
//!                            ├─► candidates ─► weighted draw ─► Action
//!   active echoes × effects ─┘                                    │
//!   intensity ± jitter ─► per-mood thresholds ─► ActionModifier ──┴─► ModifiedAction
//! ```
//!
//! Each engine owns its random source. Use [`VariationEngine::with_seed`]
//! for reproducible sequences.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::trace;

use crate::actions::{self, WeightedAction};
use crate::config::VariationConfig;
use crate::echo::{self, EchoLedger, MoodEcho};
use crate::micro::{self, MicroBehavior};
use crate::state::EmotionalState;
use crate::types::{Action, ActionModifier, Intensity, Mood};

/// An action together with how it should be performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModifiedAction {
    /// What to do.
    pub action: Action,
    /// How to do it.
    pub modifier: ActionModifier,
}

impl std::fmt::Display for ModifiedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.action, self.modifier)
    }
}

/// Adds controlled randomness to Koji's behavior.
#[derive(Debug)]
pub struct VariationEngine {
    rng: StdRng,
    ledger: EchoLedger,
    config: VariationConfig,
}

impl Default for VariationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl VariationEngine {
    /// Engine with default tuning, seeded from the wall clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(VariationConfig::default())
    }

    /// Engine with default tuning and a fixed seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::build(VariationConfig::default(), seed)
    }

    /// Engine with custom tuning, seeded from the wall clock.
    #[must_use]
    pub fn with_config(config: VariationConfig) -> Self {
        Self::build(config, clock_seed())
    }

    /// Engine with custom tuning and a fixed seed.
    #[must_use]
    pub fn with_config_and_seed(config: VariationConfig, seed: u64) -> Self {
        Self::build(config, seed)
    }

    fn build(config: VariationConfig, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            ledger: EchoLedger::new(config.echo_capacity),
            config,
        }
    }

    /// Remember that Koji just left `from_mood`.
    pub fn record_mood_change(&mut self, from_mood: Mood) {
        self.record_mood_change_at(from_mood, Utc::now());
    }

    /// Remember that Koji left `from_mood` at `at`.
    pub fn record_mood_change_at(&mut self, from_mood: Mood, at: DateTime<Utc>) {
        trace!(from = %from_mood, "echo recorded");
        self.ledger.record_at(from_mood, at);
    }

    /// Echoes currently influencing behavior.
    #[must_use]
    pub fn active_echoes(&self) -> Vec<MoodEcho> {
        self.ledger.active()
    }

    /// Echoes influencing behavior at `now`.
    #[must_use]
    pub fn active_echoes_at(&self, now: DateTime<Utc>) -> Vec<MoodEcho> {
        self.ledger.active_at(now)
    }

    /// The underlying echo ledger.
    #[must_use]
    pub fn ledger(&self) -> &EchoLedger {
        &self.ledger
    }

    /// Pick an action and modifier for the current state.
    pub fn select_action(&mut self, state: &EmotionalState) -> ModifiedAction {
        self.select_action_at(state.mood(), state.intensity(), Utc::now())
    }

    /// Pick an action and modifier for `mood` at `intensity`, with echoes as of `now`.
    pub fn select_action_at(
        &mut self,
        mood: Mood,
        intensity: Intensity,
        now: DateTime<Utc>,
    ) -> ModifiedAction {
        let candidates = self.candidates_at(mood, now);
        let action = weighted_choice(&mut self.rng, &candidates, |wa| wa.weight)
            .map_or(Action::NEUTRAL, |wa| wa.action);
        let modifier = self.intensity_to_modifier(mood, intensity);
        trace!(mood = %mood, %action, %modifier, candidates = candidates.len(), "action selected");
        ModifiedAction { action, modifier }
    }

    /// Base table for `mood` plus echo-injected candidates scaled by strength.
    #[must_use]
    pub fn candidates_at(&self, mood: Mood, now: DateTime<Utc>) -> Vec<WeightedAction> {
        let base = actions::weighted_actions(mood);
        let base = if base.is_empty() {
            actions::weighted_actions(Mood::BASELINE)
        } else {
            base
        };

        let mut candidates = base.to_vec();
        for echo in self.ledger.active_at(now) {
            candidates.extend(
                echo::echo_effects(echo.from_mood, mood)
                    .iter()
                    .map(|wa| WeightedAction::new(wa.action, wa.weight * echo.strength)),
            );
        }
        candidates
    }

    /// Map intensity plus jitter onto a modifier using per-mood thresholds.
    pub fn intensity_to_modifier(&mut self, mood: Mood, intensity: Intensity) -> ActionModifier {
        let jitter = (self.rng.r#gen::<f64>() - 0.5) * 2.0 * self.config.modifier_jitter;
        modifier_for(mood, intensity.value() + jitter)
    }

    /// An idle micro-behavior for `mood`, or `None` for a pause.
    pub fn select_micro_behavior(&mut self, mood: Mood) -> Option<MicroBehavior> {
        if self.rng.r#gen::<f64>() < self.config.micro_pause_probability {
            return None;
        }
        weighted_choice(&mut self.rng, micro::micro_behaviors(mood), |mb| mb.weight)
            .map(|mb| mb.behavior)
    }
}

/// Modifier for an already-jittered intensity value.
#[must_use]
pub fn modifier_for(mood: Mood, value: f64) -> ActionModifier {
    use ActionModifier::{Eager, Fast, Frantic, Gentle, Hesitant, Normal, Slow};

    match mood {
        Mood::Frightened | Mood::Startled => {
            if value > 0.8 {
                Frantic
            } else if value > 0.5 {
                Fast
            } else {
                Hesitant
            }
        }
        Mood::Excited => {
            if value > 0.8 {
                Frantic
            } else if value > 0.5 {
                Eager
            } else {
                Fast
            }
        }
        Mood::Sleepy => {
            if value > 0.7 { Slow } else { Gentle }
        }
        Mood::Cautious => {
            if value > 0.6 { Hesitant } else { Slow }
        }
        Mood::Happy => {
            if value > 0.7 { Eager } else { Normal }
        }
        Mood::Curious => {
            if value > 0.7 {
                Eager
            } else if value < 0.3 {
                Gentle
            } else {
                Normal
            }
        }
    }
}

/// Draw one item with probability proportional to its weight.
///
/// Items with non-positive weight are never chosen. Returns `None` when the
/// list is empty or the total weight is not positive.
pub fn weighted_choice<'a, T, R, F>(rng: &mut R, items: &'a [T], weight: F) -> Option<&'a T>
where
    R: Rng + ?Sized,
    F: Fn(&T) -> f64,
{
    let total: f64 = items.iter().map(&weight).filter(|w| *w > 0.0).sum();
    if total <= 0.0 {
        return None;
    }

    let r = rng.r#gen::<f64>() * total;
    let mut cumulative = 0.0;
    let mut last_positive = None;
    for item in items {
        let w = weight(item);
        if w <= 0.0 {
            continue;
        }
        cumulative += w;
        last_positive = Some(item);
        if r < cumulative {
            return Some(item);
        }
    }
    // Float rounding can leave r just above the final cumulative sum.
    last_positive
}

#[allow(clippy::cast_possible_truncation)]
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos() as u64)
}
