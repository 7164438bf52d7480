//! Suggestion assembly across both modes.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use quill::{
    LanguageModel, LlmError, PipelineError, Prompt, PromptKind, SuggestionEngine,
    SuggestionLog, SuggestionRequest,
};

/// Canned answers per strategy; remembers what it was asked.
#[derive(Default)]
struct ScriptedModel {
    seen: Mutex<Vec<(PromptKind, Option<String>)>>,
    fail_kind: Option<PromptKind>,
}

impl ScriptedModel {
    fn failing(kind: PromptKind) -> Self {
        Self {
            fail_kind: Some(kind),
            ..Default::default()
        }
    }

    fn kinds(&self) -> Vec<PromptKind> {
        self.seen.lock().unwrap().iter().map(|(kind, _)| *kind).collect()
    }

    fn suffix_seen(&self) -> Option<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .find_map(|(_, suffix)| suffix.clone())
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn generate(&self, prompt: &Prompt<'_>) -> Result<String, LlmError> {
        let suffix = match prompt {
            Prompt::FillInMiddle { suffix, .. } => Some(suffix.to_string()),
            _ => None,
        };
        self.seen.lock().unwrap().push((prompt.kind(), suffix));

        if self.fail_kind == Some(prompt.kind()) {
            return Err(LlmError::Request("connection refused".into()));
        }
        let out = match prompt.kind() {
            PromptKind::QuickContinuation => "e",
            PromptKind::Continuation => {
                "<completion> e today </completion>\n<completion>e to buy\nmilk</completion>\
                 <completion>e again</completion>"
            }
            PromptKind::FillInMiddle => "Sure! <completion>and the bakery</completion>",
            PromptKind::GrammarCorrection => "<completion>I went to the store.</completion>",
            PromptKind::Translate => "unused",
        };
        Ok(out.to_string())
    }
}

#[tokio::test]
async fn continuation_puts_quick_result_first_and_caps_at_three() {
    let model = Arc::new(ScriptedModel::default());
    let engine = SuggestionEngine::new(model.clone());

    let suggestions = engine
        .suggest(&SuggestionRequest::new("I went to the stor"), "user-1")
        .await
        .unwrap();

    assert_eq!(suggestions, vec!["e", "e today", "e to buy\nmilk"]);
    let kinds = model.kinds();
    assert_eq!(kinds.len(), 2);
    assert!(kinds.contains(&PromptKind::QuickContinuation));
    assert!(kinds.contains(&PromptKind::Continuation));
}

#[tokio::test]
async fn suffix_switches_to_fill_in_middle() {
    let model = Arc::new(ScriptedModel::default());
    let engine = SuggestionEngine::new(model.clone());
    let request = SuggestionRequest::new("I went to the store").with_suffix(" and then home.");

    let suggestions = engine.suggest(&request, "user-1").await.unwrap();

    assert_eq!(suggestions, vec!["e", "and the bakery"]);
    assert!(model.kinds().contains(&PromptKind::FillInMiddle));
    assert!(!model.kinds().contains(&PromptKind::Continuation));
    assert_eq!(model.suffix_seen().as_deref(), Some(" and then home."));
}

#[tokio::test]
async fn zero_width_suffix_is_treated_as_empty() {
    let model = Arc::new(ScriptedModel::default());
    let engine = SuggestionEngine::new(model.clone());
    let request = SuggestionRequest::new("Hello").with_suffix("\u{200B}\u{200B} ");

    engine.suggest(&request, "user-1").await.unwrap();

    assert!(model.kinds().contains(&PromptKind::Continuation));
    assert!(!model.kinds().contains(&PromptKind::FillInMiddle));
}

#[tokio::test]
async fn any_failed_call_fails_the_request() {
    let engine = SuggestionEngine::new(Arc::new(ScriptedModel::failing(
        PromptKind::Continuation,
    )));

    let err = engine
        .suggest(&SuggestionRequest::new("Hello"), "user-1")
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Llm(LlmError::Request(_))));
}

#[tokio::test]
async fn grammar_correction_is_callable_on_its_own() {
    let model = Arc::new(ScriptedModel::default());
    let engine = SuggestionEngine::new(model.clone());

    let fixed = engine.correct_grammar("I goes to the store").await.unwrap();

    assert_eq!(fixed, vec!["I went to the store."]);
    assert_eq!(model.kinds(), vec![PromptKind::GrammarCorrection]);
}

#[tokio::test]
async fn served_batches_are_logged_in_the_background() {
    let dir = tempfile::tempdir().unwrap();
    let log = Arc::new(SuggestionLog::new(dir.path().join("suggestions.jsonl")));
    let engine = SuggestionEngine::new(Arc::new(ScriptedModel::default())).with_log(log.clone());

    let suggestions = engine
        .suggest(&SuggestionRequest::new("I went to the stor"), "user-1")
        .await
        .unwrap();

    let mut contents = String::new();
    for _ in 0..100 {
        if let Ok(text) = std::fs::read_to_string(log.path()) {
            if text.ends_with('\n') {
                contents = text;
                break;
            }
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let record: serde_json::Value = serde_json::from_str(contents.trim_end()).unwrap();
    assert_eq!(record["request"], "I went to the stor");
    assert_eq!(record["response"], serde_json::json!(suggestions));
    assert!(record["timestamp"].is_string());
}

#[tokio::test]
async fn failed_requests_are_not_logged() {
    let dir = tempfile::tempdir().unwrap();
    let log = Arc::new(SuggestionLog::new(dir.path().join("suggestions.jsonl")));
    let engine = SuggestionEngine::new(Arc::new(ScriptedModel::failing(
        PromptKind::QuickContinuation,
    )))
    .with_log(log.clone());

    assert!(
        engine
            .suggest(&SuggestionRequest::new("Hello"), "user-1")
            .await
            .is_err()
    );
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!log.path().exists());
}

/// Answers the quick call with a leading space and the tagged call with nothing.
struct SparseModel;

#[async_trait]
impl LanguageModel for SparseModel {
    async fn generate(&self, prompt: &Prompt<'_>) -> Result<String, LlmError> {
        Ok(match prompt.kind() {
            PromptKind::QuickContinuation => " store today".to_string(),
            _ => String::new(),
        })
    }
}

#[tokio::test]
async fn quick_result_is_served_verbatim_and_empty_tagged_output_is_not_an_error() {
    let engine = SuggestionEngine::new(Arc::new(SparseModel));

    let suggestions = engine
        .suggest(&SuggestionRequest::new("I went to the"), "user-1")
        .await
        .unwrap();

    assert_eq!(suggestions, vec![" store today"]);
}
