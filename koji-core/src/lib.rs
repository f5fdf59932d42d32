//! # Koji Core Library
//!
//! Emotional state machine and behavior variation for Koji, a small robot pet.
//!
//! Environmental stimuli ([`Event`]) move Koji between a closed set of moods
//! ([`Mood`]) through a hand-authored transition table. Moods drift back toward
//! the curious baseline over time, and a [`VariationEngine`] turns the current
//! mood into one concrete [`ModifiedAction`] so the same stimulus never plays out
//! exactly the same way twice:
//!
//! - **Transitions** — asymmetric (event, mood) → (mood, intensity) rules
//! - **Decay** — pull-based dwell timers walking each mood back to baseline
//! - **Echoes** — fading residue of recent moods ("still jumpy after a scare")
//! - **Variation** — weighted sampling, intensity modifiers, idle micro-behaviors
//! - **Strategy boundary** — plug-in selectors (e.g. an LLM) with a
//!   deterministic fallback
//!
//! ## Timekeeping
//!
//! Nothing in this crate runs a timer. Every time-dependent operation has an
//! `*_at(now)` form taking a caller-supplied [`chrono::DateTime`], and a
//! convenience form that reads the wall clock.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod actions;
pub mod config;
pub mod echo;
pub mod error;
pub mod event;
pub mod history;
pub mod micro;
pub mod state;
pub mod strategy;
pub mod transitions;
pub mod types;
pub mod variation;

pub use config::KojiConfig;
pub use error::KojiError;
pub use event::EventContext;
pub use history::EventHistory;
pub use state::{EmotionalState, StateSnapshot};
pub use types::*;
pub use variation::{ModifiedAction, VariationEngine};
