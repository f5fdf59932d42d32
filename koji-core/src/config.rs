//! Configuration for the Koji personality system.
//!
//! Maps directly to `koji.toml`. Every section and key is optional; missing
//! values fall back to the tuning the behavior tables were authored against.
//!
//! ```toml
//! [state]
//! decay_step = 0.2
//!
//! [variation]
//! echo_capacity = 8
//! micro_pause_probability = 0.3
//!
//! [llm]
//! enabled = true
//! model = "llama3.2:1b"
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{KojiError, Result};

/// Top-level Koji configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KojiConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Emotional state tuning.
    #[serde(default)]
    pub state: StateConfig,
    /// Variation engine tuning.
    #[serde(default)]
    pub variation: VariationConfig,
    /// Recent-event history passed to action strategies.
    #[serde(default)]
    pub history: HistoryConfig,
    /// Network-backed action selection.
    #[serde(default)]
    pub llm: LlmConfig,
}

impl KojiConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `KojiError::Config` if the TOML is invalid or fails validation.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str).map_err(|e| KojiError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Check that every tunable is inside its meaningful range.
    ///
    /// # Errors
    /// Returns `KojiError::Config` naming the first offending key.
    pub fn validate(&self) -> Result<()> {
        self.state.validate()?;
        self.variation.validate()?;
        if self.history.recent_events == 0 {
            return Err(KojiError::Config(
                "history.recent_events must be at least 1".into(),
            ));
        }
        if self.llm.request_timeout_ms == 0 {
            return Err(KojiError::Config(
                "llm.request_timeout_ms must be positive".into(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Emotional state tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    /// Intensity lost on each decay step (floored at the low tier).
    #[serde(default = "default_decay_step")]
    pub decay_step: f64,
    /// Event intensity hints above this force the high tier.
    #[serde(default = "default_high_hint")]
    pub high_hint_threshold: f64,
    /// Event intensity hints below this force the low tier.
    #[serde(default = "default_low_hint")]
    pub low_hint_threshold: f64,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            decay_step: default_decay_step(),
            high_hint_threshold: default_high_hint(),
            low_hint_threshold: default_low_hint(),
        }
    }
}

impl StateConfig {
    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.decay_step) {
            return Err(KojiError::Config(format!(
                "state.decay_step must be in [0, 1], got {}",
                self.decay_step
            )));
        }
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        if !in_unit(self.low_hint_threshold)
            || !in_unit(self.high_hint_threshold)
            || self.low_hint_threshold > self.high_hint_threshold
        {
            return Err(KojiError::Config(format!(
                "state hint thresholds must satisfy 0 <= low ({}) <= high ({}) <= 1",
                self.low_hint_threshold, self.high_hint_threshold
            )));
        }
        Ok(())
    }
}

/// Variation engine tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariationConfig {
    /// Maximum number of mood echoes retained (oldest evicted first).
    #[serde(default = "default_echo_capacity")]
    pub echo_capacity: usize,
    /// Chance that a micro-behavior request yields an idle pause instead.
    #[serde(default = "default_micro_pause")]
    pub micro_pause_probability: f64,
    /// Half-width of the uniform jitter added to intensity before picking a modifier.
    #[serde(default = "default_jitter")]
    pub modifier_jitter: f64,
}

impl Default for VariationConfig {
    fn default() -> Self {
        Self {
            echo_capacity: default_echo_capacity(),
            micro_pause_probability: default_micro_pause(),
            modifier_jitter: default_jitter(),
        }
    }
}

impl VariationConfig {
    fn validate(&self) -> Result<()> {
        if self.echo_capacity == 0 {
            return Err(KojiError::Config(
                "variation.echo_capacity must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.micro_pause_probability) {
            return Err(KojiError::Config(format!(
                "variation.micro_pause_probability must be in [0, 1], got {}",
                self.micro_pause_probability
            )));
        }
        if !(0.0..=0.5).contains(&self.modifier_jitter) {
            return Err(KojiError::Config(format!(
                "variation.modifier_jitter must be in [0, 0.5], got {}",
                self.modifier_jitter
            )));
        }
        Ok(())
    }
}

/// Recent-event history settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// How many recent events are kept for strategy context.
    #[serde(default = "default_recent_events")]
    pub recent_events: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            recent_events: default_recent_events(),
        }
    }
}

/// LLM-backed action selection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Whether to consult the LLM at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Provider: "ollama", "openai", "none".
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Base URL for the LLM API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model name.
    #[serde(default = "default_model")]
    pub model: String,
    /// API key for OpenAI-compatible providers.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Hard timeout for an action decision in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Retries before the caller falls back to the default action.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            provider: default_provider(),
            base_url: default_base_url(),
            model: default_model(),
            api_key: None,
            request_timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_true() -> bool { true }
fn default_log_level() -> String { "info".to_string() }
fn default_decay_step() -> f64 { 0.2 }
fn default_high_hint() -> f64 { 0.7 }
fn default_low_hint() -> f64 { 0.3 }
fn default_echo_capacity() -> usize { 8 }
fn default_micro_pause() -> f64 { 0.3 }
fn default_jitter() -> f64 { 0.1 }
fn default_recent_events() -> usize { 5 }
fn default_provider() -> String { "ollama".to_string() }
fn default_base_url() -> String { "http://localhost:11434".to_string() }
fn default_model() -> String { "llama3.2:1b".to_string() }
fn default_timeout_ms() -> u64 { 30_000 }
fn default_max_retries() -> u32 { 0 }
fn default_temperature() -> f32 { 0.7 }
fn default_max_tokens() -> u32 { 64 }

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = KojiConfig::from_toml("").unwrap();
        assert!((config.state.decay_step - 0.2).abs() < f64::EPSILON);
        assert_eq!(config.variation.echo_capacity, 8);
        assert_eq!(config.history.recent_events, 5);
        assert_eq!(config.llm.base_url, "http://localhost:11434");
        assert!(config.llm.api_key.is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = KojiConfig::from_toml(
            r#"
            [variation]
            echo_capacity = 4

            [llm]
            enabled = false
            model = "phi3:mini"
            "#,
        )
        .unwrap();
        assert_eq!(config.variation.echo_capacity, 4);
        assert!((config.variation.micro_pause_probability - 0.3).abs() < f64::EPSILON);
        assert!(!config.llm.enabled);
        assert_eq!(config.llm.model, "phi3:mini");
        assert_eq!(config.llm.request_timeout_ms, 30_000);
    }

    #[test]
    fn rejects_inverted_hint_thresholds() {
        let err = KojiConfig::from_toml(
            r"
            [state]
            high_hint_threshold = 0.2
            low_hint_threshold = 0.8
            ",
        )
        .unwrap_err();
        assert!(matches!(err, KojiError::Config(_)));
    }

    #[test]
    fn rejects_zero_echo_capacity() {
        let err = KojiConfig::from_toml("[variation]\necho_capacity = 0\n").unwrap_err();
        assert!(err.to_string().contains("echo_capacity"));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(KojiConfig::from_toml("[state\ndecay_step = ").is_err());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[general]\nlog_level = \"debug\"").unwrap();
        let config = KojiConfig::from_file(file.path()).unwrap();
        assert_eq!(config.general.log_level, "debug");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = KojiConfig::from_file(std::path::Path::new("/nonexistent/koji.toml")).unwrap_err();
        assert!(matches!(err, KojiError::Io(_)));
    }
}
