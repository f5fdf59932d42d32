//! Emotional state — Koji's current mood, how strongly it is felt, and
//! since when.
//!
//! The state is owned by a single caller and mutated in place. Events move
//! it through the [transition table](crate::transitions); a periodic,
//! caller-driven tick calls [`EmotionalState::decay`] to drift it back to
//! the baseline. Neither operation reads a timer of its own: both compare
//! the stored entry time against `now`.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::actions;
use crate::config::StateConfig;
use crate::event::EventContext;
use crate::transitions::{self, TransitionLookup};
use crate::types::{Action, ActionSet, Intensity, Mood};

/// Tracks Koji's current mood and how it changes over time.
#[derive(Debug, Clone)]
pub struct EmotionalState {
    mood: Mood,
    intensity: Intensity,
    entered_at: DateTime<Utc>,
    baseline: Mood,
    config: StateConfig,
}

impl Default for EmotionalState {
    fn default() -> Self {
        Self::new()
    }
}

impl EmotionalState {
    /// Start at the baseline mood with medium intensity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(StateConfig::default())
    }

    /// Start at the baseline mood with custom tuning.
    #[must_use]
    pub fn with_config(config: StateConfig) -> Self {
        Self {
            mood: Mood::BASELINE,
            intensity: Intensity::MEDIUM,
            entered_at: Utc::now(),
            baseline: Mood::BASELINE,
            config,
        }
    }

    /// Current mood.
    #[must_use]
    pub fn mood(&self) -> Mood {
        self.mood
    }

    /// Current intensity.
    #[must_use]
    pub fn intensity(&self) -> Intensity {
        self.intensity
    }

    /// When the current mood was entered (or last refreshed by an event).
    #[must_use]
    pub fn entered_at(&self) -> DateTime<Utc> {
        self.entered_at
    }

    /// Whether Koji is at the baseline mood.
    #[must_use]
    pub fn is_baseline(&self) -> bool {
        self.mood == self.baseline
    }

    /// Force a mood and intensity, entered now.
    pub fn set_mood(&mut self, mood: Mood, intensity: Intensity) {
        self.set_mood_at(mood, intensity, Utc::now());
    }

    /// Force a mood and intensity with an explicit entry time.
    pub fn set_mood_at(&mut self, mood: Mood, intensity: Intensity, at: DateTime<Utc>) {
        self.mood = mood;
        self.intensity = intensity;
        self.entered_at = at;
    }

    /// How long the current mood has been held.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration_at(Utc::now())
    }

    /// How long the current mood has been held as of `now`.
    ///
    /// A `now` earlier than the entry time counts as zero.
    #[must_use]
    pub fn duration_at(&self, now: DateTime<Utc>) -> Duration {
        (now - self.entered_at).to_std().unwrap_or(Duration::ZERO)
    }

    /// Apply an event. Returns `true` if the mood value changed.
    pub fn process_event(&mut self, ctx: &EventContext) -> bool {
        self.process_event_at(ctx, Utc::now())
    }

    /// Apply an event as of `now`. Returns `true` if the mood value changed.
    ///
    /// With no matching rule nothing is touched. A matching rule always
    /// commits mood, intensity and entry time, even when it maps the mood
    /// onto itself; intensity-only changes still report `false`.
    pub fn process_event_at(&mut self, ctx: &EventContext, now: DateTime<Utc>) -> bool {
        let TransitionLookup::Rule(rule) = transitions::lookup(ctx.event, self.mood) else {
            debug!(event = %ctx.event, mood = %self.mood, "no transition rule");
            return false;
        };

        let intensity = if ctx.intensity > self.config.high_hint_threshold {
            Intensity::HIGH
        } else if ctx.intensity < self.config.low_hint_threshold {
            Intensity::LOW
        } else {
            rule.tier.intensity()
        };

        let old_mood = self.mood;
        self.set_mood_at(rule.new_mood, intensity, now);
        debug!(
            event = %ctx.event,
            from = %old_mood,
            to = %self.mood,
            intensity = %intensity,
            "mood transition"
        );
        old_mood != self.mood
    }

    /// Decay one step toward baseline if the dwell time has elapsed.
    /// Returns `true` if the mood changed.
    pub fn decay(&mut self) -> bool {
        self.decay_at(Utc::now())
    }

    /// Decay one step toward baseline as of `now`.
    pub fn decay_at(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_baseline() {
            return false;
        }

        let path = transitions::decay_path(self.mood);
        let Some(dwell) = path.dwell else {
            return false;
        };
        if self.duration_at(now) < dwell {
            return false;
        }
        if path.successor == self.mood {
            return false;
        }

        let old_mood = self.mood;
        let intensity = self.intensity.reduced_by(self.config.decay_step);
        self.set_mood_at(path.successor, intensity, now);
        debug!(from = %old_mood, to = %self.mood, intensity = %intensity, "mood decayed");
        true
    }

    /// Actions appropriate for the current mood.
    #[must_use]
    pub fn available_actions(&self) -> &'static [Action] {
        actions::available_actions(self.mood)
    }

    /// Deterministic reaction for the current mood.
    #[must_use]
    pub fn suggest_default_action(&self) -> ActionSet {
        actions::default_action_set(self.mood)
    }

    /// Read-only view handed to external action selectors.
    #[must_use]
    pub fn snapshot(&self) -> StateSnapshot {
        self.snapshot_at(Utc::now())
    }

    /// Read-only view as of `now`.
    #[must_use]
    pub fn snapshot_at(&self, now: DateTime<Utc>) -> StateSnapshot {
        StateSnapshot {
            mood: self.mood,
            intensity: self.intensity,
            time_in_mood: self.duration_at(now),
            available_actions: self.available_actions().to_vec(),
        }
    }
}

/// Immutable copy of the emotional state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateSnapshot {
    /// Mood at snapshot time.
    pub mood: Mood,
    /// Intensity at snapshot time.
    pub intensity: Intensity,
    /// How long the mood had been held.
    pub time_in_mood: Duration,
    /// The mood's declared repertoire.
    pub available_actions: Vec<Action>,
}

impl StateSnapshot {
    /// Whether `action` belongs to the snapshot's repertoire.
    #[must_use]
    pub fn allows(&self, action: Action) -> bool {
        self.available_actions.contains(&action)
    }

    /// Deterministic reaction for the snapshot's mood.
    #[must_use]
    pub fn default_action(&self) -> ActionSet {
        actions::default_action_set(self.mood)
    }
}
