use crate::error::{ServerError, ServerResult};
use crate::middleware::UserToken;
use crate::routes::ApiJson;
use crate::state::ServerState;
use axum::extract::State;
use axum::{Extension, Json};
use quill::SuggestionRequest;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Request for inline suggestions at the cursor
#[derive(Debug, Deserialize)]
pub struct SuggestionBody {
    /// Text before the cursor
    pub text: String,

    /// Text after the cursor
    #[serde(default, rename = "suffixText")]
    pub suffix_text: String,

    /// Input-box context as a JSON string
    #[serde(default = "default_context")]
    pub context: String,
}

fn default_context() -> String {
    "{}".to_string()
}

impl From<SuggestionBody> for SuggestionRequest {
    fn from(body: SuggestionBody) -> Self {
        SuggestionRequest::new(body.text)
            .with_suffix(body.suffix_text)
            .with_context(body.context)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestionResponse {
    pub suggestions: Vec<String>,
}

/// POST /v1/llm/suggestion
///
/// Any model failure is reported as a 500 carrying the failure message.
pub async fn suggest(
    State(state): State<Arc<ServerState>>,
    Extension(UserToken(user)): Extension<UserToken>,
    ApiJson(body): ApiJson<SuggestionBody>,
) -> ServerResult<Json<SuggestionResponse>> {
    let request = SuggestionRequest::from(body);
    let suggestions = state
        .suggestions
        .suggest(&request, &user)
        .await
        .map_err(|err| {
            tracing::error!(user = %user, error = %err, "suggestion_failure");
            ServerError::Internal(err.to_string())
        })?;

    Ok(Json(SuggestionResponse { suggestions }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_uses_camel_case_suffix() {
        let body: SuggestionBody =
            serde_json::from_str(r#"{"text": "Hi", "suffixText": " there"}"#).unwrap();
        let request = SuggestionRequest::from(body);
        assert_eq!(request.suffix_text, " there");
        assert_eq!(request.context, "{}");
    }
}
