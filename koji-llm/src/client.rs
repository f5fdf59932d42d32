//! LLM Client — unified interface for Ollama and OpenAI-compatible backends.

use std::time::{Duration, Instant};

use koji_core::config::LlmConfig;
use reqwest::{Client, RequestBuilder};
use serde_json::json;
use tracing::{debug, warn};

use crate::error::LlmError;
use crate::types::{LlmRequest, LlmResponse};

/// Timeout for health checks and model listings.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Provider backend for LLM inference.
#[derive(Debug, Clone)]
pub enum LlmProvider {
    /// Ollama running locally (recommended).
    Ollama {
        /// e.g. `http://localhost:11434`.
        base_url: String,
    },
    /// OpenAI-compatible chat completions API.
    OpenAiCompatible {
        /// e.g. `https://api.openai.com`.
        base_url: String,
        /// Bearer token.
        api_key: String,
    },
    /// No LLM available — all calls return error, triggering the default reaction.
    None,
}

/// Routes requests to the configured backend.
#[derive(Debug, Clone)]
pub struct LlmClient {
    provider: LlmProvider,
    http: Client,
    model: String,
    max_retries: u32,
}

impl LlmClient {
    /// Create a new LLM client.
    #[must_use]
    pub fn new(provider: LlmProvider, model: impl Into<String>, max_retries: u32) -> Self {
        Self {
            provider,
            http: Client::new(),
            model: model.into(),
            max_retries,
        }
    }

    /// Create a client with no LLM backend.
    #[must_use]
    pub fn none() -> Self {
        Self::new(LlmProvider::None, String::new(), 0)
    }

    /// Build a client from the `[llm]` config section.
    ///
    /// A disabled section yields [`LlmProvider::None`].
    ///
    /// # Errors
    /// Returns `LlmError::ConfigError` for an unknown provider or an
    /// OpenAI-compatible provider without an API key.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        if !config.enabled {
            return Ok(Self::none());
        }
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let provider = match config.provider.as_str() {
            "ollama" => LlmProvider::Ollama { base_url },
            "openai" => {
                let api_key = config.api_key.clone().ok_or_else(|| {
                    LlmError::ConfigError("provider \"openai\" requires llm.api_key".into())
                })?;
                LlmProvider::OpenAiCompatible { base_url, api_key }
            }
            "none" => LlmProvider::None,
            other => {
                return Err(LlmError::ConfigError(format!("unknown provider: {other}")));
            }
        };
        Ok(Self::new(provider, config.model.clone(), config.max_retries))
    }

    /// Configured model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The backend in use.
    #[must_use]
    pub fn provider(&self) -> &LlmProvider {
        &self.provider
    }

    /// Check if the LLM client has a backend configured.
    #[must_use]
    pub fn is_available(&self) -> bool {
        !matches!(self.provider, LlmProvider::None)
    }

    /// Generate a response from the LLM.
    ///
    /// # Errors
    /// Returns `Err` if the LLM is unavailable or all retries fail.
    pub async fn generate(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        match &self.provider {
            LlmProvider::None => Err(LlmError::Unavailable("No LLM provider configured".into())),
            LlmProvider::Ollama { base_url } => self.generate_ollama(base_url, request).await,
            LlmProvider::OpenAiCompatible { base_url, api_key } => {
                self.generate_openai(base_url, api_key, request).await
            }
        }
    }

    /// Generate using Ollama's `/api/generate`.
    async fn generate_ollama(
        &self,
        base_url: &str,
        request: &LlmRequest,
    ) -> Result<LlmResponse, LlmError> {
        let url = format!("{base_url}/api/generate");
        let mut body = json!({
            "model": self.model,
            "prompt": format!("{}\n\n{}", request.system, request.user),
            "stream": false,
            "options": {
                "temperature": request.temperature,
                "num_predict": request.max_tokens,
            }
        });
        if request.json_mode {
            body["format"] = json!("json");
        }

        self.with_retries("Ollama", request, |http| http.post(&url).json(&body), |json| {
            let text = json["response"].as_str().unwrap_or_default().to_string();
            let tokens = json["eval_count"].as_u64().unwrap_or(0);
            (text, tokens)
        })
        .await
    }

    /// Generate using an OpenAI-compatible `/v1/chat/completions`.
    async fn generate_openai(
        &self,
        base_url: &str,
        api_key: &str,
        request: &LlmRequest,
    ) -> Result<LlmResponse, LlmError> {
        let url = format!("{base_url}/v1/chat/completions");
        let mut body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.user },
            ],
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
        });
        if request.json_mode {
            body["response_format"] = json!({ "type": "json_object" });
        }

        self.with_retries(
            "OpenAI",
            request,
            |http| http.post(&url).bearer_auth(api_key).json(&body),
            |json| {
                let text = json["choices"][0]["message"]["content"]
                    .as_str()
                    .unwrap_or_default()
                    .to_string();
                let tokens = json["usage"]["completion_tokens"].as_u64().unwrap_or(0);
                (text, tokens)
            },
        )
        .await
    }

    async fn with_retries<B, E>(
        &self,
        backend: &str,
        request: &LlmRequest,
        build: B,
        extract: E,
    ) -> Result<LlmResponse, LlmError>
    where
        B: Fn(&Client) -> RequestBuilder,
        E: Fn(&serde_json::Value) -> (String, u64),
    {
        let mut last_error = String::new();
        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                debug!("Retrying {backend} call (attempt {}/{})", attempt + 1, self.max_retries + 1);
            }

            let start = Instant::now();
            let result = build(&self.http)
                .timeout(Duration::from_millis(request.timeout_ms))
                .send()
                .await;
            let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

            match result {
                Ok(resp) if resp.status().is_success() => {
                    let json: serde_json::Value = resp
                        .json()
                        .await
                        .map_err(|e| LlmError::ParseError(e.to_string()))?;
                    let (text, tokens) = extract(&json);
                    return Ok(LlmResponse {
                        text,
                        tokens_generated: u32::try_from(tokens).unwrap_or(u32::MAX),
                        latency_ms,
                        model: self.model.clone(),
                    });
                }
                Ok(resp) => {
                    let status = resp.status();
                    last_error = format!("HTTP {status}: {}", resp.text().await.unwrap_or_default());
                    warn!("{backend} returned error: {last_error}");
                }
                Err(e) => {
                    last_error = e.to_string();
                    if e.is_timeout() {
                        warn!("{backend} request timed out after {}ms", request.timeout_ms);
                    } else {
                        warn!("{backend} request failed: {last_error}");
                    }
                }
            }
        }

        Err(LlmError::RetriesExhausted {
            attempts: self.max_retries + 1,
            last_error,
        })
    }

    /// Check that the backend is reachable.
    ///
    /// # Errors
    /// Returns `Err` when there is no backend, it cannot be reached, or it
    /// answers with a non-success status.
    pub async fn ping(&self) -> Result<(), LlmError> {
        self.list_models().await.map(|_| ())
    }

    /// Whether the configured model is installed, plus every model the
    /// backend reports.
    ///
    /// # Errors
    /// Same as [`LlmClient::ping`], plus `ParseError` for a malformed listing.
    pub async fn check_model(&self) -> Result<(bool, Vec<String>), LlmError> {
        let available = self.list_models().await?;
        let found = available.iter().any(|name| name == &self.model);
        Ok((found, available))
    }

    async fn list_models(&self) -> Result<Vec<String>, LlmError> {
        let (request, field, key) = match &self.provider {
            LlmProvider::None => {
                return Err(LlmError::Unavailable("No LLM provider configured".into()));
            }
            LlmProvider::Ollama { base_url } => {
                (self.http.get(format!("{base_url}/api/tags")), "models", "name")
            }
            LlmProvider::OpenAiCompatible { base_url, api_key } => (
                self.http.get(format!("{base_url}/v1/models")).bearer_auth(api_key),
                "data",
                "id",
            ),
        };

        let resp = request.timeout(PROBE_TIMEOUT).send().await?;
        if !resp.status().is_success() {
            return Err(LlmError::RequestFailed(format!("unexpected status: {}", resp.status())));
        }
        let json: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| LlmError::ParseError(e.to_string()))?;
        parse_model_list(&json, field, key)
    }
}

/// Names from a model listing such as `{"models":[{"name":"phi3:mini"}]}`.
fn parse_model_list(json: &serde_json::Value, field: &str, key: &str) -> Result<Vec<String>, LlmError> {
    let entries = json[field]
        .as_array()
        .ok_or_else(|| LlmError::ParseError(format!("model listing has no `{field}` array")))?;
    Ok(entries
        .iter()
        .filter_map(|m| m[key].as_str().map(str::to_string))
        .collect())
}
