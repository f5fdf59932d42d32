//! Mood transition table and decay policy.
//!
//! The transition table is hand-authored and deliberately asymmetric: the
//! same stimulus can produce a mild reaction from one mood and skip straight
//! to a severe one from another (a loud noise startles a curious Koji but
//! frightens a sleepy one). Combinations not listed here leave the mood alone.
//!
//! Decay walks every non-baseline mood back toward [`Mood::BASELINE`] one
//! step at a time, each step gated by a per-mood dwell time:
//!
//! ```text
//! frightened ─15s─▶ cautious ─20s─▶ curious
//! startled   ─5s──▶ cautious
//! excited    ─30s─▶ happy ────45s─▶ curious
//! sleepy     ─60s─▶ curious
//! ```

use std::time::Duration;

use crate::types::{Event, IntensityTier, Mood};

/// Result of a matching transition rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodTransition {
    /// Mood to move to (may equal the current mood).
    pub new_mood: Mood,
    /// Intensity tier the rule assigns.
    pub tier: IntensityTier,
}

/// Outcome of a transition-table lookup.
///
/// `NoRule` and a rule that maps a mood onto itself both leave the mood
/// unchanged, but only the latter refreshes intensity and the entry time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionLookup {
    /// The table has no entry for this (event, mood) pair.
    NoRule,
    /// A rule matched.
    Rule(MoodTransition),
}

impl TransitionLookup {
    /// The matched rule, if any.
    #[must_use]
    pub fn rule(self) -> Option<MoodTransition> {
        match self {
            Self::NoRule => None,
            Self::Rule(t) => Some(t),
        }
    }
}

/// Look up the transition for `event` while in `mood`.
#[must_use]
pub fn lookup(event: Event, mood: Mood) -> TransitionLookup {
    transition(event, mood).map_or(TransitionLookup::NoRule, TransitionLookup::Rule)
}

/// Look up the transition for `event` while in `mood`.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn transition(event: Event, mood: Mood) -> Option<MoodTransition> {
    use IntensityTier::{High, Low, Medium};
    use Mood::{Cautious, Curious, Excited, Frightened, Happy, Sleepy, Startled};

    let (new_mood, tier) = match event {
        // Startles, and escalates if already on edge.
        Event::LoudNoise => match mood {
            Curious => (Startled, High),
            Happy => (Startled, Medium),
            Sleepy => (Frightened, High),
            Startled => (Frightened, High),
            Cautious => (Frightened, High),
            Excited => (Startled, Medium),
            Frightened => (Frightened, High),
        },

        // Cheers up and helps recover from fear.
        Event::Music => match mood {
            Curious => (Happy, Medium),
            Sleepy => (Curious, Low),
            Cautious => (Curious, Medium),
            Startled => (Cautious, Medium),
            Frightened => (Cautious, Medium),
            Happy => (Happy, High),
            Excited => (Happy, High),
        },

        Event::Rhythm => match mood {
            Curious => (Happy, Medium),
            Happy => (Excited, High),
            Excited => (Excited, High),
            _ => return None,
        },

        Event::FamiliarFace => match mood {
            Curious => (Happy, Medium),
            Cautious => (Happy, Medium),
            Frightened => (Cautious, Medium),
            Startled => (Cautious, Low),
            Sleepy => (Happy, Low),
            Happy => (Excited, High),
            Excited => (Excited, High),
        },

        Event::UnknownFace => match mood {
            Curious => (Cautious, Medium),
            Happy => (Cautious, Low),
            Sleepy => (Cautious, Medium),
            Cautious => (Cautious, High),
            Frightened => (Frightened, High),
            Startled => (Frightened, High),
            Excited => (Cautious, Medium),
        },

        Event::MotionDetected => match mood {
            Curious => (Excited, Medium),
            Sleepy => (Curious, Low),
            Happy => (Excited, Medium),
            _ => return None,
        },

        Event::UnknownObject => match mood {
            Curious => (Excited, High),
            Happy => (Excited, High),
            Sleepy => (Curious, Medium),
            Excited => (Excited, High),
            Cautious => (Curious, Medium),
            Startled => (Cautious, High),
            Frightened => (Cautious, High),
        },

        Event::Petted => match mood {
            Curious => (Happy, Medium),
            Cautious => (Happy, Medium),
            Frightened => (Cautious, Low),
            Startled => (Cautious, Low),
            Happy => (Happy, High),
            Excited => (Happy, High),
            Sleepy => (Sleepy, Medium),
        },

        Event::Poked => match mood {
            Curious => (Startled, Medium),
            Sleepy => (Startled, High),
            Happy => (Curious, Medium),
            Cautious => (Startled, Medium),
            _ => return None,
        },

        Event::Silence => match mood {
            Curious => (Sleepy, Low),
            Happy => (Curious, Low),
            Cautious => (Curious, Low),
            Excited => (Happy, Medium),
            _ => return None,
        },

        Event::TimePassedLong => match mood {
            Curious => (Sleepy, Medium),
            Cautious => (Curious, Medium),
            Happy => (Curious, Medium),
            Excited => (Happy, Medium),
            _ => return None,
        },

        // Sensed but not yet tuned.
        Event::Speech
        | Event::NoMotion
        | Event::PickedUp
        | Event::TimePassedShort
        | Event::TimePassedMedium => return None,
    };

    Some(MoodTransition { new_mood, tier })
}

/// One edge of the decay graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecayPath {
    /// Mood reached when the dwell time elapses.
    pub successor: Mood,
    /// How long the mood must be held before decaying. `None` at baseline.
    pub dwell: Option<Duration>,
}

/// The decay edge for `mood`. The baseline loops onto itself and never fires.
#[must_use]
pub fn decay_path(mood: Mood) -> DecayPath {
    DecayPath {
        successor: decay_successor(mood),
        dwell: decay_dwell_time(mood),
    }
}

/// Next mood on the way back to baseline.
#[must_use]
pub fn decay_successor(mood: Mood) -> Mood {
    match mood {
        Mood::Frightened | Mood::Startled => Mood::Cautious,
        Mood::Excited => Mood::Happy,
        Mood::Cautious | Mood::Happy | Mood::Sleepy | Mood::Curious => Mood::Curious,
    }
}

/// How long `mood` is held before it decays, or `None` for the baseline.
#[must_use]
pub fn decay_dwell_time(mood: Mood) -> Option<Duration> {
    let secs = match mood {
        Mood::Frightened => 15,
        Mood::Startled => 5,
        Mood::Cautious => 20,
        Mood::Excited => 30,
        Mood::Happy => 45,
        Mood::Sleepy => 60,
        Mood::Curious => return None,
    };
    Some(Duration::from_secs(secs))
}

/// Number of decay steps from `mood` to the baseline.
#[must_use]
pub fn steps_to_baseline(mood: Mood) -> usize {
    let mut current = mood;
    let mut steps = 0;
    while current != Mood::BASELINE && steps <= Mood::ALL.len() {
        current = decay_successor(current);
        steps += 1;
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loud_noise_is_asymmetric() {
        let from_curious = transition(Event::LoudNoise, Mood::Curious).unwrap();
        assert_eq!(from_curious.new_mood, Mood::Startled);

        // Sleepy skips startled entirely.
        let from_sleepy = transition(Event::LoudNoise, Mood::Sleepy).unwrap();
        assert_eq!(from_sleepy.new_mood, Mood::Frightened);
        assert_eq!(from_sleepy.tier, IntensityTier::High);
    }

    #[test]
    fn missing_rules_are_no_rule() {
        assert_eq!(lookup(Event::Speech, Mood::Curious), TransitionLookup::NoRule);
        assert_eq!(lookup(Event::Rhythm, Mood::Frightened), TransitionLookup::NoRule);
        assert!(lookup(Event::Poked, Mood::Excited).rule().is_none());
    }

    #[test]
    fn self_mapping_rule_is_distinct_from_no_rule() {
        let lookup = lookup(Event::LoudNoise, Mood::Frightened);
        assert_eq!(
            lookup,
            TransitionLookup::Rule(MoodTransition {
                new_mood: Mood::Frightened,
                tier: IntensityTier::High,
            })
        );
    }

    #[test]
    fn every_mood_has_a_decay_edge() {
        for mood in Mood::ALL {
            let path = decay_path(mood);
            if mood == Mood::BASELINE {
                assert_eq!(path.successor, mood);
                assert!(path.dwell.is_none());
            } else {
                assert_ne!(path.successor, mood);
                assert!(path.dwell.is_some());
            }
        }
    }

    #[test]
    fn decay_paths_reach_baseline() {
        assert_eq!(steps_to_baseline(Mood::Curious), 0);
        assert_eq!(steps_to_baseline(Mood::Frightened), 2);
        assert_eq!(steps_to_baseline(Mood::Startled), 2);
        assert_eq!(steps_to_baseline(Mood::Excited), 2);
        assert_eq!(steps_to_baseline(Mood::Sleepy), 1);
        for mood in Mood::ALL {
            assert!(steps_to_baseline(mood) <= 2);
        }
    }

    #[test]
    fn dwell_times() {
        assert_eq!(decay_dwell_time(Mood::Frightened), Some(Duration::from_secs(15)));
        assert_eq!(decay_dwell_time(Mood::Startled), Some(Duration::from_secs(5)));
        assert_eq!(decay_dwell_time(Mood::Curious), None);
    }
}
