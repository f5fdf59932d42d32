//! # koji-llm — language-model action selection for Koji
//!
//! Lets a small local model (or any OpenAI-compatible endpoint) pick Koji's
//! next action from the current mood's repertoire:
//!   - **Ollama** (local, default)
//!   - **OpenAI-compatible API**
//!
//! The model is only ever asked to choose; it never changes mood. Every call
//! goes through [`koji_core::strategy::select_with_fallback`], so a slow,
//! offline or confused model degrades to the mood's default reaction.
//!
//! ```text
//! ActionRequest ─► prompt::build_action_prompt ─► LlmClient::generate (JSON mode)
//!                                                      │
//!              ActionChoice ◄─ parse_action_response ◄─┘
//! ```

#![deny(clippy::unwrap_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod error;
pub mod prompt;
pub mod strategy;
pub mod types;

pub use client::{LlmClient, LlmProvider};
pub use error::LlmError;
pub use strategy::LlmStrategy;
pub use types::{ActionResponse, LlmRequest, LlmResponse};
