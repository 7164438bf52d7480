//! Inline suggestions for the editor.
//!
//! Every request makes two concurrent model calls. The quick continuation is
//! used verbatim and always comes first; the second call asks for tagged
//! candidates, either a plain continuation (nothing after the cursor) or a
//! fill-in-the-middle completion (text after the cursor). At most
//! [`MAX_SUGGESTIONS`] strings are returned.

use std::sync::Arc;
use std::time::Instant;

use llm::{LanguageModel, Prompt, extract_completions};
use serde::{Deserialize, Serialize};
use store::SuggestionLog;
use tracing::{info, warn};

use crate::{PipelineError, telemetry};

/// Upper bound on suggestions per response.
pub const MAX_SUGGESTIONS: usize = 3;

/// Editors pad empty regions with zero-width spaces; they do not count as text.
pub const ZERO_WIDTH_SPACE: char = '\u{200B}';

/// Context sent when the editor has none.
pub const EMPTY_CONTEXT: &str = "{}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    /// Text before the cursor.
    pub text: String,
    /// Text after the cursor.
    #[serde(default)]
    pub suffix_text: String,
    /// Free-form JSON describing the input box.
    #[serde(default = "default_context")]
    pub context: String,
}

impl SuggestionRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            suffix_text: String::new(),
            context: default_context(),
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix_text = suffix.into();
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    pub fn mode(&self) -> SuggestionMode {
        if effective_suffix(&self.suffix_text).is_empty() {
            SuggestionMode::Continuation
        } else {
            SuggestionMode::FillInMiddle
        }
    }
}

fn default_context() -> String {
    EMPTY_CONTEXT.to_string()
}

/// Which tagged strategy accompanies the quick continuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionMode {
    Continuation,
    FillInMiddle,
}

impl SuggestionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionMode::Continuation => "continuation",
            SuggestionMode::FillInMiddle => "fill_in_middle",
        }
    }
}

/// The suffix with every zero-width space removed, then trimmed.
pub fn effective_suffix(raw: &str) -> String {
    raw.replace(ZERO_WIDTH_SPACE, "").trim().to_string()
}

pub struct SuggestionEngine {
    model: Arc<dyn LanguageModel>,
    log: Option<Arc<SuggestionLog>>,
}

impl SuggestionEngine {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model, log: None }
    }

    /// Records every served batch to `log` in the background.
    pub fn with_log(mut self, log: Arc<SuggestionLog>) -> Self {
        self.log = Some(log);
        self
    }

    /// Produces up to [`MAX_SUGGESTIONS`] suggestions for `request`.
    ///
    /// Either model call failing fails the whole request.
    pub async fn suggest(
        &self,
        request: &SuggestionRequest,
        user: &str,
    ) -> Result<Vec<String>, PipelineError> {
        let start = Instant::now();
        let mode = request.mode();
        let model = self.model.as_ref();

        let quick = Prompt::QuickContinuation {
            text: &request.text,
        };
        let tagged = match mode {
            SuggestionMode::Continuation => Prompt::Continuation {
                text: &request.text,
                context: &request.context,
            },
            SuggestionMode::FillInMiddle => Prompt::FillInMiddle {
                text: &request.text,
                suffix: &request.suffix_text,
                context: &request.context,
            },
        };

        let (first, tagged_raw) = tokio::try_join!(
            telemetry::generate(model, &quick),
            telemetry::generate(model, &tagged)
        )?;

        let mut suggestions = Vec::with_capacity(MAX_SUGGESTIONS);
        suggestions.push(first);
        suggestions.extend(
            extract_completions(&tagged_raw)
                .into_iter()
                .take(MAX_SUGGESTIONS - 1),
        );

        telemetry::record_suggestion(mode.as_str());
        info!(
            user,
            mode = mode.as_str(),
            text_tail = telemetry::tail(&request.text),
            suggestions = suggestions.len(),
            elapsed_micros = start.elapsed().as_micros() as u64,
            "suggestion_success"
        );

        self.log_in_background(&request.text, &suggestions);
        Ok(suggestions)
    }

    /// Asks for a grammar-corrected rewrite of the last sentence of `text`.
    pub async fn correct_grammar(&self, text: &str) -> Result<Vec<String>, PipelineError> {
        let raw =
            telemetry::generate(self.model.as_ref(), &Prompt::GrammarCorrection { text }).await?;
        Ok(extract_completions(&raw))
    }

    fn log_in_background(&self, request: &str, suggestions: &[String]) {
        let Some(log) = self.log.clone() else {
            return;
        };
        let request = request.to_string();
        let suggestions = suggestions.to_vec();
        tokio::spawn(async move {
            if let Err(err) = log.append(&request, &suggestions).await {
                warn!(error = %err, path = %log.path().display(), "suggestion_log_failure");
            }
        });
    }
}

impl std::fmt::Debug for SuggestionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestionEngine")
            .field("model", &self.model.name())
            .field("logging", &self.log.is_some())
            .finish()
    }
}
