use async_trait::async_trait;

use crate::{LanguageModel, LlmError, Prompt};

/// Deterministic offline model.
///
/// Produces canned, well-formed answers for every strategy so the whole
/// service can run without a model server: translations are echoed with a
/// language marker, tagged strategies return two tagged candidates.
#[derive(Debug, Clone, Default)]
pub struct StubClient;

impl StubClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LanguageModel for StubClient {
    async fn generate(&self, prompt: &Prompt<'_>) -> Result<String, LlmError> {
        let output = match prompt {
            Prompt::QuickContinuation { text } => continuation_for(text),
            Prompt::Continuation { text, .. } => format!(
                "<completion>{}</completion><completion>{}.</completion>",
                continuation_for(text),
                last_word(text)
            ),
            Prompt::FillInMiddle { suffix, .. } => format!(
                "<completion>{}</completion><completion>and {}</completion>",
                last_word(suffix),
                last_word(suffix)
            ),
            Prompt::GrammarCorrection { text } => {
                format!("<completion>{}</completion>", text.trim())
            }
            Prompt::Translate { text, language } => format!("[{language}] {text}"),
        };
        Ok(output)
    }

    fn name(&self) -> &str {
        "stub"
    }
}

fn last_word(text: &str) -> &str {
    text.split_whitespace().last().unwrap_or("")
}

fn continuation_for(text: &str) -> String {
    format!("{} ...", last_word(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract_completions;

    #[tokio::test]
    async fn translate_echoes_with_language() {
        let out = StubClient
            .generate(&Prompt::Translate {
                text: "hello",
                language: "French",
            })
            .await
            .unwrap();
        assert_eq!(out, "[French] hello");
    }

    #[tokio::test]
    async fn tagged_strategies_are_extractable() {
        let out = StubClient
            .generate(&Prompt::Continuation {
                text: "I went to the stor",
                context: "{}",
            })
            .await
            .unwrap();
        assert_eq!(extract_completions(&out), ["stor ...", "stor."]);
    }

    #[tokio::test]
    async fn is_deterministic() {
        let prompt = Prompt::QuickContinuation { text: "same input" };
        let a = StubClient.generate(&prompt).await.unwrap();
        let b = StubClient.generate(&prompt).await.unwrap();
        assert_eq!(a, b);
    }
}
