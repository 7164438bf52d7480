//! OpenAI-compatible chat-completions client.
//!
//! Works with anything that speaks `/v1/chat/completions`: vLLM, Ollama in
//! OpenAI mode, LM Studio, hosted providers. The rendered prompt is sent as a
//! single user message and the first choice's content is returned.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::{LanguageModel, LlmConfig, LlmError, Prompt};

/// HTTP client for an OpenAI-compatible endpoint.
pub struct ApiClient {
    client: reqwest::Client,
    url: String,
    config: LlmConfig,
}

impl ApiClient {
    /// Builds a client with connection pooling and the configured transport timeout.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(32)
            .build()
            .map_err(|err| LlmError::InvalidConfig(format!("http client: {err}")))?;

        Ok(Self {
            client,
            url: config.completions_url(),
            config: config.clone(),
        })
    }

    fn build_payload(&self, prompt: &Prompt<'_>) -> Value {
        let mut body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "user", "content": prompt.render() }
            ],
            "stream": false,
            "temperature": self.config.temperature,
        });
        if let Some(max_tokens) = self.config.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        body
    }
}

#[async_trait]
impl LanguageModel for ApiClient {
    async fn generate(&self, prompt: &Prompt<'_>) -> Result<String, LlmError> {
        let start = Instant::now();
        let mut request = self.client.post(&self.url).json(&self.build_payload(prompt));

        let key = self.config.api_key.as_deref().unwrap_or("");
        if !key.is_empty() {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(kind = %prompt.kind(), status = status.as_u16(), "llm_status_error");
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let json: Value = response
            .json()
            .await
            .map_err(|err| LlmError::Parse(err.to_string()))?;
        let content = parse_content(&json)?;

        debug!(
            kind = %prompt.kind(),
            input_chars = prompt.text().chars().count(),
            output_chars = content.chars().count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "llm_call_success"
        );
        Ok(content)
    }

    fn name(&self) -> &str {
        &self.config.model
    }
}

/// Reads `choices[0].message.content` as the model wrote it.
///
/// Leading whitespace is part of a continuation, and an empty answer is still
/// an answer; only a missing field is an error.
fn parse_content(json: &Value) -> Result<String, LlmError> {
    json["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| LlmError::Parse("missing choices[0].message.content".into()))
}
