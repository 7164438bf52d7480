use serde::{Deserialize, Serialize};

use crate::error::LlmError;

/// Which client [`build_client`](crate::build_client) constructs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmMode {
    /// OpenAI-compatible `/v1/chat/completions` endpoint.
    #[default]
    Api,
    /// Deterministic offline responses. For local development and demos.
    Stub,
}

/// Runtime configuration for the model client.
///
/// # Example
/// ```
/// use llm::{LlmConfig, LlmMode};
///
/// let cfg = LlmConfig {
///     mode: LlmMode::Api,
///     base_url: "http://localhost:11434".into(),
///     model: "qwen2.5:7b".into(),
///     ..Default::default()
/// };
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LlmConfig {
    /// Client selector.
    pub mode: LlmMode,
    /// Base URL of the OpenAI-compatible server, without the `/v1/...` path.
    pub base_url: String,
    /// Bearer token. Omitted from requests when `None` or empty.
    pub api_key: Option<String>,
    /// Model name sent with every request.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Upper bound on generated tokens; the server default applies when `None`.
    pub max_tokens: Option<u32>,
    /// HTTP transport timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum number of model calls in flight across the whole process.
    pub max_concurrency: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            mode: LlmMode::Api,
            base_url: "http://127.0.0.1:8000".into(),
            api_key: None,
            model: "qwen_2_7b_chat".into(),
            temperature: 0.7,
            max_tokens: None,
            timeout_secs: 300,
            max_concurrency: 8,
        }
    }
}

impl LlmConfig {
    pub fn validate(&self) -> Result<(), LlmError> {
        if self.max_concurrency == 0 {
            return Err(LlmError::InvalidConfig(
                "max_concurrency must be >= 1".into(),
            ));
        }
        if self.mode == LlmMode::Api {
            if self.base_url.trim().is_empty() {
                return Err(LlmError::InvalidConfig(
                    "base_url is required for api mode".into(),
                ));
            }
            if self.model.trim().is_empty() {
                return Err(LlmError::InvalidConfig(
                    "model is required for api mode".into(),
                ));
            }
        }
        Ok(())
    }

    /// Full chat-completions URL derived from [`base_url`](Self::base_url).
    pub fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = LlmConfig::default();
        assert_eq!(cfg.mode, LlmMode::Api);
        assert_eq!(cfg.model, "qwen_2_7b_chat");
        assert_eq!(cfg.timeout_secs, 300);
        assert_eq!(cfg.max_concurrency, 8);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_concurrency_is_invalid() {
        let cfg = LlmConfig {
            max_concurrency: 0,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(LlmError::InvalidConfig(_))));
    }

    #[test]
    fn stub_mode_ignores_endpoint() {
        let cfg = LlmConfig {
            mode: LlmMode::Stub,
            base_url: String::new(),
            ..Default::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn completions_url_strips_trailing_slash() {
        let cfg = LlmConfig {
            base_url: "http://host:1234/".into(),
            ..Default::default()
        };
        assert_eq!(cfg.completions_url(), "http://host:1234/v1/chat/completions");
    }

    #[test]
    fn mode_deserializes_lowercase() {
        let cfg: LlmConfig = serde_json::from_str(r#"{"mode":"stub"}"#).unwrap();
        assert_eq!(cfg.mode, LlmMode::Stub);
        assert_eq!(cfg.max_concurrency, 8);
    }
}
