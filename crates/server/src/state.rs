use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use llm::LanguageModel;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use quill::{JobStore, SuggestionEngine, SuggestionLog, Translator};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Background translation jobs and their results
    pub translator: Translator,

    /// Inline suggestion assembly
    pub suggestions: Arc<SuggestionEngine>,

    /// Renders `/metrics`; `None` when metrics are disabled
    pub metrics: Option<PrometheusHandle>,

    model: Arc<dyn LanguageModel>,
}

impl ServerState {
    /// Create new server state with the model client described by `config.llm`
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let model = llm::build_client(&config.llm).map_err(|e| ServerError::Config(e.to_string()))?;
        Self::with_model(config, model)
    }

    /// Create new server state around an existing model client
    pub fn with_model(config: ServerConfig, model: Arc<dyn LanguageModel>) -> ServerResult<Self> {
        config
            .pipeline
            .validate()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        let jobs = JobStore::file(&config.result_dir);
        let log = Arc::new(SuggestionLog::new(&config.suggestion_log));
        let translator = Translator::new(model.clone(), jobs, config.pipeline);
        let suggestions = Arc::new(SuggestionEngine::new(model.clone()).with_log(log));

        let metrics = if config.metrics_enabled {
            Some(prometheus_handle()?)
        } else {
            None
        };

        Ok(Self {
            config: Arc::new(config),
            translator,
            suggestions,
            metrics,
            model,
        })
    }

    /// Label of the configured model
    pub fn model_name(&self) -> &str {
        self.model.name()
    }
}

/// The Prometheus recorder is process-global; install it once and share the handle.
fn prometheus_handle() -> ServerResult<PrometheusHandle> {
    static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();
    HANDLE
        .get_or_try_init(|| PrometheusBuilder::new().install_recorder())
        .cloned()
        .map_err(|e| ServerError::Config(format!("metrics recorder: {e}")))
}

/// Server metadata for health checks
#[derive(Debug, serde::Serialize)]
pub struct ServerMetadata {
    pub version: String,
    pub uptime_seconds: u64,
    pub model: String,
}
