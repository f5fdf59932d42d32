//! Core vocabulary for the Koji personality system.
//!
//! Moods, events, actions and modifiers are closed enumerations. Each one
//! has a stable snake_case name used for display, TOML/JSON and prompt text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::KojiError;

// ---------------------------------------------------------------------------
// Mood
// ---------------------------------------------------------------------------

/// Koji's current emotional state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    /// Baseline state.
    Curious,
    /// New person, play time.
    Excited,
    /// Sudden stimulus, brief.
    Startled,
    /// Escalated fear.
    Frightened,
    /// Music, familiar faces.
    Happy,
    /// Quiet environment.
    Sleepy,
    /// Wary, recovering from fear.
    Cautious,
}

impl Mood {
    /// The mood every other mood decays toward.
    pub const BASELINE: Mood = Mood::Curious;

    /// Every mood, in declaration order.
    pub const ALL: [Mood; 7] = [
        Mood::Curious,
        Mood::Excited,
        Mood::Startled,
        Mood::Frightened,
        Mood::Happy,
        Mood::Sleepy,
        Mood::Cautious,
    ];

    /// Stable snake_case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Curious => "curious",
            Self::Excited => "excited",
            Self::Startled => "startled",
            Self::Frightened => "frightened",
            Self::Happy => "happy",
            Self::Sleepy => "sleepy",
            Self::Cautious => "cautious",
        }
    }
}

impl Default for Mood {
    fn default() -> Self {
        Self::BASELINE
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = KojiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| KojiError::UnknownName {
                kind: "mood",
                name: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Intensity
// ---------------------------------------------------------------------------

/// How strongly a mood is felt, in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Intensity(f64);

impl Intensity {
    /// Low tier value.
    pub const LOW: Intensity = Intensity(0.3);
    /// Medium tier value.
    pub const MEDIUM: Intensity = Intensity(0.6);
    /// High tier value.
    pub const HIGH: Intensity = Intensity(0.9);

    /// Create an intensity, clamping into `[0.0, 1.0]`. NaN becomes 0.
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Raw numeric value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Reduce by `step`, never going below the low tier.
    #[must_use]
    pub fn reduced_by(self, step: f64) -> Self {
        let lowered = Self::new(self.0 - step);
        if lowered < Self::LOW { Self::LOW } else { lowered }
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Self::MEDIUM
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// Discrete intensity tier used by the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntensityTier {
    /// 0.3
    Low,
    /// 0.6
    Medium,
    /// 0.9
    High,
}

impl IntensityTier {
    /// Numeric intensity for this tier.
    #[must_use]
    pub fn intensity(self) -> Intensity {
        match self {
            Self::Low => Intensity::LOW,
            Self::Medium => Intensity::MEDIUM,
            Self::High => Intensity::HIGH,
        }
    }
}

impl From<IntensityTier> for Intensity {
    fn from(tier: IntensityTier) -> Self {
        tier.intensity()
    }
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// Something that happened in the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// Sudden loud sound.
    LoudNoise,
    /// Music playing.
    Music,
    /// Someone talking.
    Speech,
    /// Sustained quiet.
    Silence,
    /// Beat detected.
    Rhythm,
    /// A recognised person.
    FamiliarFace,
    /// A face Koji does not know.
    UnknownFace,
    /// Something moved.
    MotionDetected,
    /// Nothing has moved for a while.
    NoMotion,
    /// An object Koji has not seen before.
    UnknownObject,
    /// Touch sensor triggered gently.
    Petted,
    /// Touch sensor triggered sharply.
    Poked,
    /// Accelerometer detects a lift.
    PickedUp,
    /// About 10s of nothing.
    TimePassedShort,
    /// About 30s of nothing.
    TimePassedMedium,
    /// About 2min of nothing.
    TimePassedLong,
}

impl Event {
    /// Every event, in declaration order.
    pub const ALL: [Event; 16] = [
        Event::LoudNoise,
        Event::Music,
        Event::Speech,
        Event::Silence,
        Event::Rhythm,
        Event::FamiliarFace,
        Event::UnknownFace,
        Event::MotionDetected,
        Event::NoMotion,
        Event::UnknownObject,
        Event::Petted,
        Event::Poked,
        Event::PickedUp,
        Event::TimePassedShort,
        Event::TimePassedMedium,
        Event::TimePassedLong,
    ];

    /// Stable snake_case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LoudNoise => "loud_noise",
            Self::Music => "music",
            Self::Speech => "speech",
            Self::Silence => "silence",
            Self::Rhythm => "rhythm",
            Self::FamiliarFace => "familiar_face",
            Self::UnknownFace => "unknown_face",
            Self::MotionDetected => "motion_detected",
            Self::NoMotion => "no_motion",
            Self::UnknownObject => "unknown_object",
            Self::Petted => "petted",
            Self::Poked => "poked",
            Self::PickedUp => "picked_up",
            Self::TimePassedShort => "time_passed_short",
            Self::TimePassedMedium => "time_passed_medium",
            Self::TimePassedLong => "time_passed_long",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Event {
    type Err = KojiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| KojiError::UnknownName {
                kind: "event",
                name: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// Something Koji can physically do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // Movement
    /// Don't move.
    Stay,
    /// Wander around.
    Explore,
    /// Run away from the stimulus.
    Flee,
    /// Move toward the stimulus.
    Approach,
    /// Back away slowly.
    Retreat,
    /// Stop and assess.
    Freeze,

    // Expressive
    /// Happy tail wag.
    WagTail,
    /// Alert, listening.
    PerkEars,
    /// Scared, submissive.
    FlattenEars,
    /// Curious, confused.
    TiltHead,
    /// Scared, defensive.
    Crouch,
    /// Excited hop.
    Bounce,
    /// Happy spin.
    Spin,
    /// Sleepy curl up.
    Curl,
    /// Cautious look around.
    Peek,
    /// Affectionate.
    Nuzzle,

    // Sound
    /// Scared sound.
    Whimper,
    /// Happy sound.
    Chirp,
    /// Alert or excited sound.
    Bark,
    /// Warning sound.
    Growl,
    /// Sleepy sound.
    Yawn,
    /// Content sound.
    Purr,
    /// Bobbing to music.
    HeadBob,

    // Variation-only
    /// Residual flinch left over from a startle.
    Flinch,
    /// Curious sniffing.
    Sniff,
}

impl Action {
    /// Every action, in declaration order.
    pub const ALL: [Action; 25] = [
        Action::Stay,
        Action::Explore,
        Action::Flee,
        Action::Approach,
        Action::Retreat,
        Action::Freeze,
        Action::WagTail,
        Action::PerkEars,
        Action::FlattenEars,
        Action::TiltHead,
        Action::Crouch,
        Action::Bounce,
        Action::Spin,
        Action::Curl,
        Action::Peek,
        Action::Nuzzle,
        Action::Whimper,
        Action::Chirp,
        Action::Bark,
        Action::Growl,
        Action::Yawn,
        Action::Purr,
        Action::HeadBob,
        Action::Flinch,
        Action::Sniff,
    ];

    /// Fallback when weighted sampling has nothing to choose from.
    pub const NEUTRAL: Action = Action::Stay;

    /// Stable snake_case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stay => "stay",
            Self::Explore => "explore",
            Self::Flee => "flee",
            Self::Approach => "approach",
            Self::Retreat => "retreat",
            Self::Freeze => "freeze",
            Self::WagTail => "wag_tail",
            Self::PerkEars => "perk_ears",
            Self::FlattenEars => "flatten_ears",
            Self::TiltHead => "tilt_head",
            Self::Crouch => "crouch",
            Self::Bounce => "bounce",
            Self::Spin => "spin",
            Self::Curl => "curl",
            Self::Peek => "peek",
            Self::Nuzzle => "nuzzle",
            Self::Whimper => "whimper",
            Self::Chirp => "chirp",
            Self::Bark => "bark",
            Self::Growl => "growl",
            Self::Yawn => "yawn",
            Self::Purr => "purr",
            Self::HeadBob => "head_bob",
            Self::Flinch => "flinch",
            Self::Sniff => "sniff",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = KojiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| KojiError::UnknownName {
                kind: "action",
                name: s.to_string(),
            })
    }
}

/// A movement, expression and sound performed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSet {
    /// Body movement.
    pub movement: Action,
    /// Ears, tail, posture.
    pub expression: Action,
    /// Vocalisation.
    pub sound: Action,
}

impl fmt::Display for ActionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "movement={}, expression={}, sound={}",
            self.movement, self.expression, self.sound
        )
    }
}

// ---------------------------------------------------------------------------
// Modifier
// ---------------------------------------------------------------------------

/// How an action is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionModifier {
    /// Unhurried.
    Slow,
    /// Nothing special.
    Normal,
    /// Quick.
    Fast,
    /// Panicked.
    Frantic,
    /// Soft.
    Gentle,
    /// Unsure, half-committed.
    Hesitant,
    /// Keen.
    Eager,
}

impl ActionModifier {
    /// Stable snake_case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Normal => "normal",
            Self::Fast => "fast",
            Self::Frantic => "frantic",
            Self::Gentle => "gentle",
            Self::Hesitant => "hesitant",
            Self::Eager => "eager",
        }
    }
}

impl fmt::Display for ActionModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
