//! Idle micro-behaviors: ear twitches, sniffs, slow blinks.

use std::time::Duration;

use serde::Serialize;

use crate::types::Mood;

/// A small idle animation or twitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MicroBehavior {
    /// Animation name understood by the actuator layer.
    pub name: &'static str,
    /// How long it plays.
    pub duration: Duration,
}

/// A micro-behavior with a relative selection weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedMicroBehavior {
    /// The behavior.
    pub behavior: MicroBehavior,
    /// Relative weight.
    pub weight: f64,
}

const fn mb(name: &'static str, millis: u64, weight: f64) -> WeightedMicroBehavior {
    WeightedMicroBehavior {
        behavior: MicroBehavior {
            name,
            duration: Duration::from_millis(millis),
        },
        weight,
    }
}

/// Idle animations available in `mood`. Empty when the mood has none.
#[must_use]
pub fn micro_behaviors(mood: Mood) -> &'static [WeightedMicroBehavior] {
    match mood {
        Mood::Curious => CURIOUS,
        Mood::Happy => HAPPY,
        Mood::Excited => EXCITED,
        Mood::Sleepy => SLEEPY,
        Mood::Cautious => CAUTIOUS,
        Mood::Startled => STARTLED,
        Mood::Frightened => FRIGHTENED,
    }
}

const CURIOUS: &[WeightedMicroBehavior] = &[
    mb("ear_twitch", 200, 3.0),
    mb("look_around", 500, 2.0),
    mb("sniff", 300, 2.0),
    mb("weight_shift", 400, 1.5),
    mb("tail_flick", 150, 1.0),
];

const HAPPY: &[WeightedMicroBehavior] = &[
    mb("tail_wag_small", 300, 4.0),
    mb("ear_perk", 200, 2.0),
    mb("wiggle", 400, 2.0),
    mb("happy_sigh", 500, 1.0),
];

const EXCITED: &[WeightedMicroBehavior] = &[
    mb("bounce_small", 250, 4.0),
    mb("tail_wag_fast", 200, 3.0),
    mb("spin_partial", 400, 2.0),
    mb("eager_lean", 300, 2.0),
];

const SLEEPY: &[WeightedMicroBehavior] = &[
    mb("slow_blink", 800, 4.0),
    mb("yawn_small", 600, 2.0),
    mb("head_droop", 700, 2.0),
    mb("sleepy_sigh", 500, 1.5),
    mb("ear_droop", 300, 1.0),
];

const CAUTIOUS: &[WeightedMicroBehavior] = &[
    mb("ear_swivel", 250, 4.0),
    mb("freeze_brief", 400, 2.0),
    mb("low_crouch", 350, 2.0),
    mb("nervous_glance", 300, 3.0),
    mb("tail_tuck_partial", 200, 1.5),
];

const STARTLED: &[WeightedMicroBehavior] = &[
    mb("flinch", 150, 4.0),
    mb("ears_back_quick", 100, 3.0),
    mb("gasp", 200, 2.0),
    mb("freeze_tense", 300, 2.0),
];

const FRIGHTENED: &[WeightedMicroBehavior] = &[
    mb("tremble", 400, 4.0),
    mb("whimper_soft", 300, 3.0),
    mb("shrink", 350, 2.0),
    mb("eyes_dart", 250, 2.0),
    mb("tail_between_legs", 200, 1.5),
];
