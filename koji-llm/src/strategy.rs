//! [`ActionStrategy`] backed by a language model.

use std::future::Future;

use koji_core::Action;
use koji_core::config::LlmConfig;
use koji_core::strategy::{ActionChoice, ActionRequest, ActionStrategy, StrategyError};
use tracing::debug;

use crate::client::LlmClient;
use crate::error::LlmError;
use crate::prompt;
use crate::types::{ActionResponse, LlmRequest};

/// Asks an LLM to pick one action from the current repertoire.
#[derive(Debug, Clone)]
pub struct LlmStrategy {
    client: LlmClient,
    temperature: f32,
    max_tokens: u32,
    timeout_ms: u64,
}

impl LlmStrategy {
    /// Wrap `client` with default sampling.
    #[must_use]
    pub fn new(client: LlmClient) -> Self {
        Self::with_config(client, &LlmConfig::default())
    }

    /// Wrap `client` with sampling and timeout from `config`.
    #[must_use]
    pub fn with_config(client: LlmClient, config: &LlmConfig) -> Self {
        Self {
            client,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout_ms: config.request_timeout_ms,
        }
    }

    /// The underlying client.
    #[must_use]
    pub fn client(&self) -> &LlmClient {
        &self.client
    }

    async fn choose(&self, request: &ActionRequest) -> Result<ActionChoice, StrategyError> {
        let llm_request = LlmRequest::new(prompt::SYSTEM_PROMPT, prompt::build_action_prompt(request))
            .json()
            .with_sampling(self.temperature, self.max_tokens)
            .with_timeout(self.timeout_ms);

        let response = self.client.generate(&llm_request).await?;
        debug!(
            model = %response.model,
            latency_ms = response.latency_ms,
            text = %response.text,
            "LLM answered"
        );

        let parsed = parse_action_response(&response.text)?;
        let action: Action = parsed
            .action
            .trim()
            .parse()
            .map_err(|_| StrategyError::OutOfVocabulary(parsed.action.clone()))?;
        if !request.state.allows(action) {
            return Err(StrategyError::OutOfVocabulary(parsed.action));
        }

        Ok(ActionChoice {
            action,
            reason: parsed.reason,
        })
    }
}

impl ActionStrategy for LlmStrategy {
    fn name(&self) -> &str {
        "llm"
    }

    fn select(
        &self,
        request: &ActionRequest,
    ) -> impl Future<Output = Result<ActionChoice, StrategyError>> + Send {
        self.choose(request)
    }
}

/// Parse `{"action": ..., "reason": ...}`, tolerating text around the object.
///
/// # Errors
/// Returns `LlmError::ParseError` if no JSON object can be recovered.
pub fn parse_action_response(text: &str) -> Result<ActionResponse, LlmError> {
    serde_json::from_str(text)
        .or_else(|_| serde_json::from_str(prompt::extract_json(text)))
        .map_err(|e| LlmError::ParseError(format!("{e}; raw text: '{text}'")))
}
