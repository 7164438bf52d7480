//! Counters shared by the pipeline stages. Without an installed recorder the
//! `metrics` macros are no-ops.

use llm::{LanguageModel, LlmError, Prompt};
use metrics::counter;

/// Characters of user text that may appear in a log line.
pub(crate) const LOG_TAIL_CHARS: usize = 20;

/// Runs one model call and counts it by strategy and outcome.
pub(crate) async fn generate(
    model: &dyn LanguageModel,
    prompt: &Prompt<'_>,
) -> Result<String, LlmError> {
    let result = model.generate(prompt).await;
    let outcome = if result.is_ok() { "ok" } else { "error" };
    counter!(
        "quill_llm_calls_total",
        "kind" => prompt.kind().as_str(),
        "outcome" => outcome
    )
    .increment(1);
    result
}

pub(crate) fn record_job(outcome: &'static str) {
    counter!("quill_translation_jobs_total", "outcome" => outcome).increment(1);
}

pub(crate) fn record_chunk() {
    counter!("quill_translation_chunks_total").increment(1);
}

pub(crate) fn record_suggestion(mode: &'static str) {
    counter!("quill_suggestions_total", "mode" => mode).increment(1);
}

/// Last `LOG_TAIL_CHARS` characters of `text`.
pub(crate) fn tail(text: &str) -> &str {
    let count = text.chars().count();
    if count <= LOG_TAIL_CHARS {
        return text;
    }
    let start = text
        .char_indices()
        .nth(count - LOG_TAIL_CHARS)
        .map_or(0, |(offset, _)| offset);
    &text[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_keeps_short_text() {
        assert_eq!(tail("short"), "short");
    }

    #[test]
    fn tail_respects_char_boundaries() {
        let text = "ä".repeat(30);
        assert_eq!(tail(&text).chars().count(), LOG_TAIL_CHARS);
        assert_eq!(tail("0123456789abcdefghijKLMN"), "456789abcdefghijKLMN");
    }
}
