//! Process-wide admission gate for model calls.
//!
//! Every caller shares one [`ConcurrencyLimit`], so no matter how many HTTP
//! requests and translation workers are active, at most `max_concurrency`
//! model calls are in flight. Callers past the limit wait for a permit; there
//! is no timeout on that wait.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Semaphore;

use crate::{LanguageModel, LlmError, Prompt};

/// Wraps a model so that calls queue on a shared semaphore.
pub struct ConcurrencyLimit {
    inner: Arc<dyn LanguageModel>,
    permits: Arc<Semaphore>,
    max_concurrency: usize,
}

impl ConcurrencyLimit {
    pub fn new(inner: Arc<dyn LanguageModel>, max_concurrency: usize) -> Self {
        let max_concurrency = max_concurrency.max(1);
        Self {
            inner,
            permits: Arc::new(Semaphore::new(max_concurrency)),
            max_concurrency,
        }
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Permits not currently held by an in-flight call.
    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }
}

#[async_trait]
impl LanguageModel for ConcurrencyLimit {
    async fn generate(&self, prompt: &Prompt<'_>) -> Result<String, LlmError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|err| LlmError::Unavailable(err.to_string()))?;
        self.inner.generate(prompt).await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
