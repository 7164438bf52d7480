//! Quill LLM client
//!
//! Everything that talks to a language model goes through the
//! [`LanguageModel`] trait. The client is built once at startup, shared as
//! `Arc<dyn LanguageModel>` and handed to whoever needs it; there is no global
//! client.
//!
//! We ship two implementations:
//!
//! - **API mode** - [`ApiClient`], any OpenAI-compatible chat-completions server.
//! - **Stub mode** - [`StubClient`], deterministic canned answers for running
//!   the service without a model.
//!
//! [`build_client`] wraps whichever one is configured in a [`ConcurrencyLimit`]
//! so the process never has more than `max_concurrency` calls in flight.
//!
//! Requests are typed: a [`Prompt`] names the strategy (quick continuation,
//! fill-in-the-middle, translation, ...) and renders its own template. Tagged
//! strategies are parsed with [`extract_completions`].
//!
//! ## Quick example
//!
//! ```no_run
//! use llm::{build_client, extract_completions, LlmConfig, Prompt};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), llm::LlmError> {
//!     let model = build_client(&LlmConfig::default())?;
//!     let raw = model
//!         .generate(&Prompt::Continuation { text: "Dear team,", context: "{}" })
//!         .await?;
//!     println!("{:?}", extract_completions(&raw));
//!     Ok(())
//! }
//! ```
//!
//! No retries, backoff or timeouts beyond the HTTP transport timeout: a call
//! either succeeds or its error goes straight back to the caller.

use std::sync::Arc;

use async_trait::async_trait;

pub mod config;
pub mod error;
pub mod prompt;

mod api;
mod completion;
mod limit;
mod stub;

pub use crate::api::ApiClient;
pub use crate::completion::{extract_completions, MAX_COMPLETIONS};
pub use crate::config::{LlmConfig, LlmMode};
pub use crate::error::LlmError;
pub use crate::limit::ConcurrencyLimit;
pub use crate::prompt::{Prompt, PromptKind};
pub use crate::stub::StubClient;

/// A text-generation backend.
///
/// Implementors must be `Send + Sync` so one instance can be shared across
/// request handlers and worker tasks.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Runs one generation for `prompt` and returns the raw model output.
    async fn generate(&self, prompt: &Prompt<'_>) -> Result<String, LlmError>;

    /// Label used in logs.
    fn name(&self) -> &str {
        "unnamed"
    }
}

/// Builds the configured client behind a shared [`ConcurrencyLimit`].
pub fn build_client(cfg: &LlmConfig) -> Result<Arc<dyn LanguageModel>, LlmError> {
    cfg.validate()?;
    let inner: Arc<dyn LanguageModel> = match cfg.mode {
        LlmMode::Api => Arc::new(ApiClient::from_config(cfg)?),
        LlmMode::Stub => Arc::new(StubClient::new()),
    };
    tracing::info!(
        mode = ?cfg.mode,
        model = inner.name(),
        max_concurrency = cfg.max_concurrency,
        "llm_client_ready"
    );
    Ok(Arc::new(ConcurrencyLimit::new(inner, cfg.max_concurrency)))
}
