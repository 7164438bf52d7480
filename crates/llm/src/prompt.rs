//! Prompt catalogue.
//!
//! Each variant is one generation strategy. Variants that expect several
//! candidates ask the model to wrap each one in `<completion></completion>`
//! so [`extract_completions`](crate::extract_completions) can pull them out.

use std::fmt;

/// A single model request, tagged by strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt<'a> {
    /// Short free-form continuation of `text`. Output is used verbatim.
    QuickContinuation { text: &'a str },
    /// Two tagged continuations that take the input-box context into account.
    Continuation { text: &'a str, context: &'a str },
    /// Two tagged completions for the gap between `text` and `suffix`.
    FillInMiddle {
        text: &'a str,
        suffix: &'a str,
        context: &'a str,
    },
    /// One tagged rewrite of the last sentence with grammar fixed.
    GrammarCorrection { text: &'a str },
    /// Translation of `text` into `language`.
    Translate { text: &'a str, language: &'a str },
}

/// Strategy label, used for logs and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKind {
    QuickContinuation,
    Continuation,
    FillInMiddle,
    GrammarCorrection,
    Translate,
}

impl PromptKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptKind::QuickContinuation => "quick_continuation",
            PromptKind::Continuation => "continuation",
            PromptKind::FillInMiddle => "fill_in_middle",
            PromptKind::GrammarCorrection => "grammar_correction",
            PromptKind::Translate => "translate",
        }
    }
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Prompt<'_> {
    pub fn kind(&self) -> PromptKind {
        match self {
            Prompt::QuickContinuation { .. } => PromptKind::QuickContinuation,
            Prompt::Continuation { .. } => PromptKind::Continuation,
            Prompt::FillInMiddle { .. } => PromptKind::FillInMiddle,
            Prompt::GrammarCorrection { .. } => PromptKind::GrammarCorrection,
            Prompt::Translate { .. } => PromptKind::Translate,
        }
    }

    /// The user text this prompt operates on.
    pub fn text(&self) -> &str {
        match self {
            Prompt::QuickContinuation { text }
            | Prompt::Continuation { text, .. }
            | Prompt::FillInMiddle { text, .. }
            | Prompt::GrammarCorrection { text }
            | Prompt::Translate { text, .. } => *text,
        }
    }

    /// Renders the full prompt sent as the user message.
    pub fn render(&self) -> String {
        match self {
            Prompt::QuickContinuation { text } => format!(
                "You are a multilingual autocompletion expert. Analyse the user's current \
input and predict what comes next.\n\
Rules:\n\
1. Keep the continuation under 50 characters.\n\n\
Continue the following text:\n{text}"
            ),
            Prompt::Continuation { text, context } => format!(
                "You are a multilingual autocompletion expert. Analyse the user's current \
input and predict what comes next.\n\
Reply in the same language as the user with two continuations, each wrapped in \
<completion></completion> tags.\n\n\
Rules:\n\
1. Keep each continuation under 50 characters.\n\
2. Use the input box information below to guess the user's situation.\n\n\
Input box information:\n\n```json\n{context}\n```\n\n\
Continue the following text:\n{text}"
            ),
            Prompt::FillInMiddle {
                text,
                suffix,
                context,
            } => format!(
                "You are a multilingual completion expert. Using the content before and after \
the user's cursor, predict the text that belongs in between.\n\
Reply in the same language as the user with two completions, each wrapped in \
<completion></completion> tags.\n\n\
Rules:\n\
1. Keep each completion under 50 characters.\n\
2. Every completion must read naturally into the content after the cursor.\n\
3. Use the input box information below to guess the user's situation.\n\n\
Input box information:\n\n```json\n{context}\n```\n\n\
Content after the cursor:\n{suffix}\n\n\
Continue the following text:\n{text}"
            ),
            Prompt::GrammarCorrection { text } => format!(
                "You are a multilingual grammar and style expert. Analyse the last sentence \
before the user's cursor and suggest an improvement.\n\n\
Guidelines:\n\
1. Read the last sentence of the input carefully.\n\
2. Find grammar or spelling mistakes and unnatural phrasing.\n\
3. Give one improved version that fixes errors, reads naturally and keeps the meaning.\n\n\
User input:\n{text}\n\n\
Wrap the improved text in <completion></completion> tags."
            ),
            Prompt::Translate { text, language } => format!(
                "Translate the given text. Keep the meaning, tone and style of the original \
and make the result read naturally in the target language. Add a note for any ambiguity \
or culture-specific expression.\n\n\
Translate the following text into {language}:\n\n{text}\n"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_prompts_ask_for_completion_tags() {
        let prompts = [
            Prompt::Continuation {
                text: "Hi",
                context: "{}",
            },
            Prompt::FillInMiddle {
                text: "Hi",
                suffix: "there",
                context: "{}",
            },
            Prompt::GrammarCorrection { text: "Hi" },
        ];
        for prompt in prompts {
            assert!(prompt.render().contains("<completion></completion>"));
        }
    }

    #[test]
    fn quick_prompt_is_untagged() {
        let rendered = Prompt::QuickContinuation { text: "Hello" }.render();
        assert!(!rendered.contains("<completion>"));
        assert!(rendered.ends_with("Hello"));
    }

    #[test]
    fn fill_in_middle_includes_suffix_and_context() {
        let rendered = Prompt::FillInMiddle {
            text: "Dear",
            suffix: "regards",
            context: r#"{"field":"email"}"#,
        }
        .render();
        assert!(rendered.contains("regards"));
        assert!(rendered.contains(r#"{"field":"email"}"#));
        assert!(rendered.ends_with("Dear"));
    }

    #[test]
    fn translate_names_language() {
        let prompt = Prompt::Translate {
            text: "Bonjour",
            language: "English",
        };
        assert_eq!(prompt.kind(), PromptKind::Translate);
        assert_eq!(prompt.text(), "Bonjour");
        assert!(prompt.render().contains("into English"));
    }
}
