//! Per-mood action vocabulary.
//!
//! Three views of the same vocabulary:
//!
//! - [`available_actions`] — the declared repertoire of a mood, handed to
//!   external selectors as the list they must choose from.
//! - [`default_action_set`] — a deterministic movement/expression/sound
//!   triple used for immediate reactions and as the strategy fallback.
//! - [`weighted_actions`] — relative likelihoods used by the
//!   [`VariationEngine`](crate::variation::VariationEngine).

use serde::{Deserialize, Serialize};

use crate::types::{Action, ActionSet, Mood};

/// An action paired with a relative selection weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedAction {
    /// The candidate action.
    pub action: Action,
    /// Relative weight; does not need to sum to 1 across a table.
    pub weight: f64,
}

impl WeightedAction {
    /// Create a weighted action.
    #[must_use]
    pub const fn new(action: Action, weight: f64) -> Self {
        Self { action, weight }
    }
}

const fn wa(action: Action, weight: f64) -> WeightedAction {
    WeightedAction::new(action, weight)
}

/// The declared repertoire of `mood`.
#[must_use]
pub fn available_actions(mood: Mood) -> &'static [Action] {
    use Action::*;
    match mood {
        Mood::Curious => &[Explore, Approach, Stay, PerkEars, TiltHead, Chirp],
        Mood::Excited => &[Approach, Explore, Spin, WagTail, Bounce, PerkEars, Chirp, Bark],
        Mood::Happy => &[Stay, Approach, Explore, WagTail, Nuzzle, HeadBob, Chirp, Purr],
        Mood::Startled => &[Freeze, Retreat, Flee, PerkEars, Crouch, Whimper],
        Mood::Frightened => &[Flee, Retreat, Freeze, FlattenEars, Crouch, Peek, Whimper],
        Mood::Cautious => &[
            Freeze, Retreat, Stay, Peek, PerkEars, FlattenEars, Growl, Whimper,
        ],
        Mood::Sleepy => &[Stay, Curl, Yawn, Purr],
    }
}

/// Deterministic reaction for `mood`.
#[must_use]
pub fn default_action_set(mood: Mood) -> ActionSet {
    use Action::*;
    let (movement, expression, sound) = match mood {
        Mood::Curious => (Explore, PerkEars, Chirp),
        Mood::Excited => (Approach, WagTail, Chirp),
        Mood::Happy => (Stay, WagTail, Purr),
        Mood::Startled => (Freeze, PerkEars, Whimper),
        Mood::Frightened => (Flee, FlattenEars, Whimper),
        Mood::Cautious => (Freeze, PerkEars, Growl),
        Mood::Sleepy => (Curl, Curl, Yawn),
    };
    ActionSet {
        movement,
        expression,
        sound,
    }
}

/// Base weighted candidates for `mood`. Every table has positive total weight.
#[must_use]
pub fn weighted_actions(mood: Mood) -> &'static [WeightedAction] {
    match mood {
        Mood::Curious => &CURIOUS,
        Mood::Excited => &EXCITED,
        Mood::Happy => &HAPPY,
        Mood::Startled => &STARTLED,
        Mood::Frightened => &FRIGHTENED,
        Mood::Cautious => &CAUTIOUS,
        Mood::Sleepy => &SLEEPY,
    }
}

static CURIOUS: [WeightedAction; 7] = [
    wa(Action::Explore, 4.0),
    wa(Action::PerkEars, 3.0),
    wa(Action::TiltHead, 3.0),
    wa(Action::Approach, 2.0),
    wa(Action::Stay, 1.0),
    wa(Action::Chirp, 1.5),
    wa(Action::Sniff, 2.5),
];

static EXCITED: [WeightedAction; 8] = [
    wa(Action::Bounce, 4.0),
    wa(Action::WagTail, 4.0),
    wa(Action::Spin, 3.0),
    wa(Action::Approach, 3.0),
    wa(Action::Bark, 2.0),
    wa(Action::PerkEars, 2.0),
    wa(Action::Chirp, 2.5),
    wa(Action::Explore, 1.5),
];

static HAPPY: [WeightedAction; 8] = [
    wa(Action::WagTail, 5.0),
    wa(Action::Nuzzle, 3.0),
    wa(Action::Purr, 3.0),
    wa(Action::Stay, 2.5),
    wa(Action::HeadBob, 2.0),
    wa(Action::Chirp, 2.0),
    wa(Action::Approach, 1.5),
    wa(Action::Explore, 1.0),
];

static STARTLED: [WeightedAction; 7] = [
    wa(Action::Freeze, 5.0),
    wa(Action::PerkEars, 4.0),
    wa(Action::Crouch, 3.0),
    wa(Action::Retreat, 2.5),
    wa(Action::Whimper, 2.0),
    wa(Action::Flee, 1.5),
    wa(Action::FlattenEars, 2.0),
];

static FRIGHTENED: [WeightedAction; 7] = [
    wa(Action::Flee, 5.0),
    wa(Action::Crouch, 4.0),
    wa(Action::Whimper, 4.0),
    wa(Action::FlattenEars, 3.5),
    wa(Action::Retreat, 3.0),
    wa(Action::Peek, 2.0),
    wa(Action::Freeze, 1.5),
];

static CAUTIOUS: [WeightedAction; 8] = [
    wa(Action::Peek, 4.0),
    wa(Action::PerkEars, 4.0),
    wa(Action::Freeze, 3.0),
    wa(Action::Stay, 3.0),
    wa(Action::Retreat, 2.5),
    wa(Action::Growl, 2.0),
    wa(Action::FlattenEars, 1.5),
    wa(Action::Whimper, 1.0),
];

static SLEEPY: [WeightedAction; 4] = [
    wa(Action::Curl, 5.0),
    wa(Action::Yawn, 4.0),
    wa(Action::Stay, 3.5),
    wa(Action::Purr, 2.0),
];

/// Sum of weights in a candidate list.
#[must_use]
pub fn total_weight(actions: &[WeightedAction]) -> f64 {
    actions.iter().map(|wa| wa.weight).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mood_has_positive_weight() {
        for mood in Mood::ALL {
            let table = weighted_actions(mood);
            assert!(!table.is_empty(), "{mood} has no weighted actions");
            assert!(total_weight(table) > 0.0);
            assert!(table.iter().all(|wa| wa.weight >= 0.0));
        }
    }

    #[test]
    fn default_movement_is_available() {
        for mood in Mood::ALL {
            let defaults = default_action_set(mood);
            assert!(
                available_actions(mood).contains(&defaults.movement),
                "{mood} default {} not in vocabulary",
                defaults.movement
            );
        }
    }

    #[test]
    fn sleepy_curls() {
        let set = default_action_set(Mood::Sleepy);
        assert_eq!(set.movement, Action::Curl);
        assert_eq!(set.sound, Action::Yawn);
        assert_eq!(available_actions(Mood::Sleepy).len(), 4);
    }
}
