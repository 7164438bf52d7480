use once_cell::sync::Lazy;
use regex::Regex;

/// Upper bound on suggestions pulled from a single model response.
pub const MAX_COMPLETIONS: usize = 3;

static COMPLETION_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<completion>(.*?)</completion>").expect("completion tag pattern is valid")
});

/// Pulls the contents of up to [`MAX_COMPLETIONS`] `<completion>` tags out of `raw`.
///
/// Matching is non-greedy and spans newlines. Each match is trimmed; text
/// outside the tags and any tags past the limit are ignored.
pub fn extract_completions(raw: &str) -> Vec<String> {
    COMPLETION_TAG
        .captures_iter(raw)
        .take(MAX_COMPLETIONS)
        .map(|caps| caps[1].trim().to_string())
        .collect()
}
