//! Pluggable action selection with a deterministic fallback.
//!
//! An [`ActionStrategy`] may be slow or unreliable (a language model behind
//! an HTTP call, say). [`select_with_fallback`] bounds it with a timeout,
//! checks its answer against the mood's repertoire, and substitutes the
//! mood's default reaction on any failure. Callers always get a decision.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::event::EventContext;
use crate::state::StateSnapshot;
use crate::types::{Action, ActionSet, Event};

/// Everything a strategy gets to look at.
#[derive(Debug, Clone, Serialize)]
pub struct ActionRequest {
    /// Current emotional state.
    pub state: StateSnapshot,
    /// The event that triggered the decision.
    pub event: EventContext,
    /// Recent events, oldest first.
    pub recent_events: Vec<Event>,
}

/// A strategy's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionChoice {
    /// Chosen action.
    pub action: Action,
    /// Short free-text justification.
    pub reason: String,
}

/// Why a strategy could not produce a usable action.
#[derive(Debug, Error)]
pub enum StrategyError {
    /// The strategy did not answer in time.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The strategy named an action outside the mood's repertoire.
    #[error("action out of vocabulary: {0}")]
    OutOfVocabulary(String),

    /// Anything else.
    #[error("strategy failed: {0}")]
    Failed(String),
}

/// Final decision after timeout, validation and fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDecision {
    /// The action to perform.
    pub action: Action,
    /// Why: the strategy's reason, or a fallback diagnostic.
    pub reason: String,
    /// Set when the strategy was bypassed; the full default reaction.
    pub fallback: Option<ActionSet>,
}

impl ActionDecision {
    /// Whether the default reaction was substituted.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

/// Something that picks one action for a request.
pub trait ActionStrategy: Send + Sync {
    /// Short identifier for logs.
    fn name(&self) -> &str;

    /// Choose an action.
    fn select(
        &self,
        request: &ActionRequest,
    ) -> impl Future<Output = Result<ActionChoice, StrategyError>> + Send;
}

/// Always returns the mood's default movement.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStrategy;

impl ActionStrategy for DefaultStrategy {
    fn name(&self) -> &str {
        "default"
    }

    fn select(
        &self,
        request: &ActionRequest,
    ) -> impl Future<Output = Result<ActionChoice, StrategyError>> + Send {
        let action = request.state.default_action().movement;
        async move {
            Ok(ActionChoice {
                action,
                reason: "default reaction".to_string(),
            })
        }
    }
}

/// Run `strategy` with a deadline and fall back to the default reaction on
/// timeout, error or an action outside the snapshot's repertoire.
pub async fn select_with_fallback<S>(
    strategy: &S,
    request: &ActionRequest,
    timeout: Duration,
) -> ActionDecision
where
    S: ActionStrategy,
{
    let outcome = match tokio::time::timeout(timeout, strategy.select(request)).await {
        Ok(result) => result,
        Err(_) => Err(StrategyError::Timeout(timeout)),
    };

    let outcome = outcome.and_then(|choice| {
        if request.state.allows(choice.action) {
            Ok(choice)
        } else {
            Err(StrategyError::OutOfVocabulary(choice.action.to_string()))
        }
    });

    match outcome {
        Ok(choice) => {
            debug!(
                strategy = strategy.name(),
                action = %choice.action,
                reason = %choice.reason,
                "strategy chose action"
            );
            ActionDecision {
                action: choice.action,
                reason: choice.reason,
                fallback: None,
            }
        }
        Err(e) => {
            warn!(strategy = strategy.name(), error = %e, "falling back to default reaction");
            let set = request.state.default_action();
            ActionDecision {
                action: set.movement,
                reason: format!("fallback: {e}"),
                fallback: Some(set),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::EmotionalState;
    use crate::types::{Intensity, Mood};

    fn request(mood: Mood) -> ActionRequest {
        let mut state = EmotionalState::new();
        state.set_mood(mood, Intensity::MEDIUM);
        ActionRequest {
            state: state.snapshot(),
            event: EventContext::new(Event::Music),
            recent_events: vec![Event::Music],
        }
    }

    struct Fixed(Action);

    impl ActionStrategy for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn select(
            &self,
            _request: &ActionRequest,
        ) -> impl Future<Output = Result<ActionChoice, StrategyError>> + Send {
            let action = self.0;
            async move {
                Ok(ActionChoice {
                    action,
                    reason: "because".into(),
                })
            }
        }
    }

    struct Slow;

    impl ActionStrategy for Slow {
        fn name(&self) -> &str {
            "slow"
        }

        fn select(
            &self,
            _request: &ActionRequest,
        ) -> impl Future<Output = Result<ActionChoice, StrategyError>> + Send {
            async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(ActionChoice {
                    action: Action::Explore,
                    reason: "too late".into(),
                })
            }
        }
    }

    struct Broken;

    impl ActionStrategy for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn select(
            &self,
            _request: &ActionRequest,
        ) -> impl Future<Output = Result<ActionChoice, StrategyError>> + Send {
            async { Err(StrategyError::Failed("connection refused".into())) }
        }
    }

    #[tokio::test]
    async fn valid_choice_passes_through() {
        let req = request(Mood::Happy);
        let decision = select_with_fallback(&Fixed(Action::Nuzzle), &req, Duration::from_secs(1)).await;
        assert_eq!(decision.action, Action::Nuzzle);
        assert_eq!(decision.reason, "because");
        assert!(!decision.is_fallback());
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_falls_back() {
        let req = request(Mood::Frightened);
        let decision = select_with_fallback(&Slow, &req, Duration::from_millis(100)).await;
        assert_eq!(decision.action, Action::Flee);
        assert!(decision.reason.starts_with("fallback: timed out"));
        assert_eq!(decision.fallback, Some(req.state.default_action()));
    }

    #[tokio::test]
    async fn error_falls_back() {
        let req = request(Mood::Sleepy);
        let decision = select_with_fallback(&Broken, &req, Duration::from_secs(1)).await;
        assert_eq!(decision.action, Action::Curl);
        assert!(decision.reason.contains("connection refused"));
    }

    #[tokio::test]
    async fn out_of_vocabulary_falls_back() {
        let req = request(Mood::Sleepy);
        let decision = select_with_fallback(&Fixed(Action::Flee), &req, Duration::from_secs(1)).await;
        assert_eq!(decision.action, Action::Curl);
        assert!(decision.reason.contains("out of vocabulary"));
        assert!(decision.is_fallback());
    }

    #[tokio::test]
    async fn default_strategy_uses_default_movement() {
        let req = request(Mood::Cautious);
        let decision = select_with_fallback(&DefaultStrategy, &req, Duration::from_secs(1)).await;
        assert_eq!(decision.action, req.state.default_action().movement);
        assert!(!decision.is_fallback());
    }
}
