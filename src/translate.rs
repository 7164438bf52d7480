//! Background document translation.
//!
//! A job runs in four steps: resolve the input into text (decoding
//! PDF/DOCX uploads on a blocking thread), split it into chunks, translate the
//! chunks with at most `max_workers` calls in flight, then store the joined
//! result under the job id. Nothing is stored unless every chunk succeeds.

use std::sync::Arc;
use std::time::Instant;

use chunk::Chunk;
use futures::stream::{self, StreamExt};
use llm::{LanguageModel, Prompt};
use store::{JobId, JobStore};
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, error, info, info_span};

use crate::config::PipelineConfig;
use crate::{PipelineError, telemetry};

/// Everything needed to start a translation job.
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    /// Plain text or a `data:application/{pdf,docx};base64,...` URI.
    pub input: String,
    /// Target language, passed to the model as written.
    pub language: String,
    /// Caller identity, used only in logs.
    pub user: String,
}

/// Handle to a submitted job.
///
/// The task is detached: dropping `handle` does not cancel it.
#[derive(Debug)]
pub struct TranslationJob {
    pub id: JobId,
    pub handle: JoinHandle<Result<(), PipelineError>>,
}

#[derive(Clone)]
pub struct Translator {
    model: Arc<dyn LanguageModel>,
    jobs: JobStore,
    config: PipelineConfig,
}

impl Translator {
    pub fn new(model: Arc<dyn LanguageModel>, jobs: JobStore, config: PipelineConfig) -> Self {
        Self {
            model,
            jobs,
            config,
        }
    }

    pub fn jobs(&self) -> &JobStore {
        &self.jobs
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Allocates a job id and starts the job in the background.
    ///
    /// Returns as soon as the task is spawned. Failures are logged by the task
    /// itself; callers that poll only ever see the result or its absence.
    pub fn submit(&self, request: TranslationRequest) -> TranslationJob {
        let id = self.jobs.create();
        telemetry::record_job("submitted");
        let span = info_span!("translation_job", job_id = %id, user = %request.user);
        let translator = self.clone();
        let job_id = id.clone();
        let handle = tokio::spawn(
            async move { translator.run_job(&job_id, &request).await }.instrument(span),
        );
        TranslationJob { id, handle }
    }

    async fn run_job(&self, id: &JobId, request: &TranslationRequest) -> Result<(), PipelineError> {
        let start = Instant::now();
        info!(
            language = %request.language,
            input_bytes = request.input.len(),
            input_tail = telemetry::tail(&request.input),
            "translation_started"
        );

        let result = match self
            .translate_document(request.input.clone(), &request.language)
            .await
        {
            Ok(text) => self.jobs.complete(id, &text).await.map_err(PipelineError::from),
            Err(err) => Err(err),
        };

        let elapsed_micros = start.elapsed().as_micros() as u64;
        match &result {
            Ok(()) => {
                telemetry::record_job("completed");
                info!(elapsed_micros, "translation_success");
            }
            Err(err) => {
                telemetry::record_job("failed");
                error!(error = %err, elapsed_micros, "translation_failure");
            }
        }
        result
    }

    /// Resolves, chunks and translates `input` without touching the store.
    pub async fn translate_document(
        &self,
        input: String,
        language: &str,
    ) -> Result<String, PipelineError> {
        let text = tokio::task::spawn_blocking(move || extract::resolve_text(&input)).await??;
        let chunks = chunk::chunk_text(&text, &self.config.chunk_config())?;
        debug!(
            text_chars = text.chars().count(),
            chunks = chunks.len(),
            "document_chunked"
        );
        self.translate_chunks(&chunks, language).await
    }

    /// Translates every chunk and joins the results with `\n` in chunk order,
    /// whatever order the calls finish in. The first failure aborts the rest.
    pub async fn translate_chunks(
        &self,
        chunks: &[Chunk],
        language: &str,
    ) -> Result<String, PipelineError> {
        let total = chunks.len();
        let mut slots: Vec<Option<String>> = vec![None; total];
        let model = self.model.as_ref();

        // Collect before streaming: a lazy `Map` over borrowed chunks makes the
        // job future fail the higher-ranked `Send` check in `tokio::spawn`.
        let calls: Vec<_> = chunks
            .iter()
            .enumerate()
            .map(|(index, chunk)| async move {
                let prompt = Prompt::Translate {
                    text: &chunk.text,
                    language,
                };
                let result = telemetry::generate(model, &prompt).await;
                (index, chunk.char_len(), result)
            })
            .collect();
        let mut pending = stream::iter(calls).buffer_unordered(self.config.max_workers.max(1));

        while let Some((index, input_chars, result)) = pending.next().await {
            let translated =
                result.map_err(|source| PipelineError::Translation { index, source })?;
            telemetry::record_chunk();
            debug!(
                chunk = index + 1,
                total,
                input_chars,
                output_chars = translated.chars().count(),
                "chunk_translated"
            );
            slots[index] = Some(translated);
        }

        Ok(slots.into_iter().flatten().collect::<Vec<_>>().join("\n"))
    }
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("model", &self.model.name())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
