//! Mood echoes — lingering influence of recently held moods.
//!
//! When Koji leaves a mood, the caller may record it here. For a while
//! afterwards that mood keeps biasing action selection with linearly
//! fading strength: a pet that was just frightened still peeks around
//! nervously after it has calmed down to curious.
//!
//! Strength is never stored; it is recomputed from the echo's age on every
//! query:
//!
//! ```text
//! strength(t) = 1 − (t − started_at) / window     for t < started_at + window
//!             = absent                             otherwise
//! ```

use std::collections::VecDeque;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::actions::WeightedAction;
use crate::types::{Action, Mood};

/// Default number of echoes retained.
pub const DEFAULT_ECHO_CAPACITY: usize = 8;

/// A lingering effect from a previous mood.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoodEcho {
    /// The mood that was left.
    pub from_mood: Mood,
    /// 0.0 to 1.0, how much it still affects behavior.
    pub strength: f64,
    /// When the mood was left.
    pub started_at: DateTime<Utc>,
}

/// How long an echo of `mood` lasts, or `None` if that mood leaves no echo.
#[must_use]
pub fn echo_window(mood: Mood) -> Option<Duration> {
    let secs = match mood {
        Mood::Frightened => 45,
        Mood::Startled => 20,
        Mood::Excited => 30,
        Mood::Happy => 60,
        Mood::Curious | Mood::Sleepy | Mood::Cautious => return None,
    };
    Some(Duration::from_secs(secs))
}

/// Extra candidates an echo of `past` injects while Koji is in `current`.
///
/// Weights here are at full strength and get scaled by the echo's current
/// strength. Some of these fall outside `current`'s declared vocabulary.
#[must_use]
pub fn echo_effects(past: Mood, current: Mood) -> &'static [WeightedAction] {
    match (past, current) {
        (Mood::Frightened, Mood::Curious) => FRIGHTENED_IN_CURIOUS,
        (Mood::Frightened, Mood::Cautious) => FRIGHTENED_IN_CAUTIOUS,
        (Mood::Frightened, Mood::Happy) => FRIGHTENED_IN_HAPPY,
        (Mood::Startled, Mood::Curious) => STARTLED_IN_CURIOUS,
        (Mood::Startled, Mood::Cautious) => STARTLED_IN_CAUTIOUS,
        (Mood::Excited, Mood::Happy) => EXCITED_IN_HAPPY,
        (Mood::Excited, Mood::Curious) => EXCITED_IN_CURIOUS,
        (Mood::Happy, Mood::Curious) => HAPPY_IN_CURIOUS,
        _ => &[],
    }
}

const fn wa(action: Action, weight: f64) -> WeightedAction {
    WeightedAction::new(action, weight)
}

// Stays jumpy for a while.
const FRIGHTENED_IN_CURIOUS: &[WeightedAction] = &[
    wa(Action::Peek, 2.0),
    wa(Action::FlattenEars, 1.5),
    wa(Action::Freeze, 1.0),
];
const FRIGHTENED_IN_CAUTIOUS: &[WeightedAction] =
    &[wa(Action::Whimper, 1.5), wa(Action::Crouch, 1.0)];
const FRIGHTENED_IN_HAPPY: &[WeightedAction] = &[wa(Action::Peek, 1.0)];

const STARTLED_IN_CURIOUS: &[WeightedAction] =
    &[wa(Action::PerkEars, 2.0), wa(Action::Freeze, 1.0)];
const STARTLED_IN_CAUTIOUS: &[WeightedAction] = &[wa(Action::Flinch, 1.5)];

const EXCITED_IN_HAPPY: &[WeightedAction] =
    &[wa(Action::Bounce, 2.0), wa(Action::WagTail, 1.5)];
const EXCITED_IN_CURIOUS: &[WeightedAction] = &[wa(Action::Bounce, 1.0)];

const HAPPY_IN_CURIOUS: &[WeightedAction] = &[wa(Action::WagTail, 1.5), wa(Action::Chirp, 1.0)];

/// Bounded FIFO of recorded mood changes.
#[derive(Debug, Clone)]
pub struct EchoLedger {
    echoes: VecDeque<MoodEcho>,
    capacity: usize,
}

impl Default for EchoLedger {
    fn default() -> Self {
        Self::new(DEFAULT_ECHO_CAPACITY)
    }
}

impl EchoLedger {
    /// Create a ledger holding at most `capacity` echoes (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            echoes: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record that Koji just left `from_mood`.
    pub fn record(&mut self, from_mood: Mood) {
        self.record_at(from_mood, Utc::now());
    }

    /// Record that Koji left `from_mood` at `at`, evicting the oldest echo when full.
    pub fn record_at(&mut self, from_mood: Mood, at: DateTime<Utc>) {
        while self.echoes.len() >= self.capacity {
            self.echoes.pop_front();
        }
        self.echoes.push_back(MoodEcho {
            from_mood,
            strength: 1.0,
            started_at: at,
        });
    }

    /// Echoes still affecting behavior right now.
    #[must_use]
    pub fn active(&self) -> Vec<MoodEcho> {
        self.active_at(Utc::now())
    }

    /// Echoes still affecting behavior at `now`, oldest first, with fresh strengths.
    #[must_use]
    pub fn active_at(&self, now: DateTime<Utc>) -> Vec<MoodEcho> {
        self.echoes
            .iter()
            .filter_map(|echo| {
                let window = echo_window(echo.from_mood)?;
                let elapsed = (now - echo.started_at).to_std().unwrap_or(Duration::ZERO);
                if elapsed >= window {
                    return None;
                }
                let strength = 1.0 - elapsed.as_secs_f64() / window.as_secs_f64();
                Some(MoodEcho {
                    strength,
                    ..*echo
                })
            })
            .collect()
    }

    /// Number of stored echoes, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.echoes.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.echoes.is_empty()
    }

    /// Maximum number of stored echoes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Forget every echo.
    pub fn clear(&mut self) {
        self.echoes.clear();
    }
}
