use crate::error::ServerResult;
use crate::middleware::UserToken;
use crate::routes::ApiJson;
use crate::state::ServerState;
use axum::extract::State;
use axum::{Extension, Json};
use quill::TranslationRequest;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Request to translate plain text or a base64 data URI (PDF/DOCX)
#[derive(Debug, Deserialize)]
pub struct TranslateBody {
    pub text: String,
    pub language: String,
}

/// Carries the job id on submit and the finished text on lookup
#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translation: String,
}

/// Poll for a finished translation by job id
#[derive(Debug, Deserialize)]
pub struct TranslationResultBody {
    /// Job id returned by `/v1/llm/translate`
    pub md5: String,
}

/// POST /v1/llm/translate
///
/// Starts a background job and returns its id immediately.
pub async fn translate(
    State(state): State<Arc<ServerState>>,
    Extension(UserToken(user)): Extension<UserToken>,
    ApiJson(body): ApiJson<TranslateBody>,
) -> ServerResult<Json<TranslateResponse>> {
    let input_bytes = body.text.len();
    let job = state.translator.submit(TranslationRequest {
        input: body.text,
        language: body.language,
        user: user.clone(),
    });

    tracing::info!(user = %user, job_id = %job.id, input_bytes, "translation_submitted");

    Ok(Json(TranslateResponse {
        translation: job.id.to_string(),
    }))
}

/// POST /v1/llm/translate/result
///
/// 404 until the job has finished successfully.
pub async fn translation_result(
    State(state): State<Arc<ServerState>>,
    Extension(UserToken(user)): Extension<UserToken>,
    ApiJson(body): ApiJson<TranslationResultBody>,
) -> ServerResult<Json<TranslateResponse>> {
    let translation = state.translator.jobs().lookup(&body.md5).await?;
    tracing::debug!(user = %user, job_id = %body.md5, "translation_fetched");
    Ok(Json(TranslateResponse { translation }))
}
