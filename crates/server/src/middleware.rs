use crate::error::ServerError;
use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;

/// Header carrying the caller's identity on every `/v1/llm/*` request
pub const USER_TOKEN_HEADER: &str = "x-user-token";
pub const REQUEST_ID_HEADER: &str = "x-request-id";
pub const PROCESS_TIME_HEADER: &str = "x-process-time";

/// Authenticated caller, available to handlers as an extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserToken(pub String);

/// Correlation id for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

/// User token middleware
///
/// Any non-blank token is accepted; it identifies the caller in logs.
pub async fn require_user_token(mut request: Request, next: Next) -> Result<Response, ServerError> {
    let token = match request.headers().get(USER_TOKEN_HEADER) {
        None => return Err(ServerError::MissingToken),
        Some(value) if value.is_empty() => return Err(ServerError::MissingToken),
        Some(value) => value
            .to_str()
            .map_err(|_| ServerError::InvalidToken)?
            .to_string(),
    };

    if !validate_token(&token) {
        return Err(ServerError::InvalidToken);
    }

    request.extensions_mut().insert(UserToken(token));
    Ok(next.run(request).await)
}

fn validate_token(token: &str) -> bool {
    !token.trim().is_empty()
}

/// Request ID injection middleware
pub async fn request_id(mut request: Request, next: Next) -> Response {
    // Generate or extract request ID
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Logging middleware; also stamps the elapsed seconds on the response
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = std::time::Instant::now();

    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();

    tracing::info!(
        method = %method,
        uri = %uri,
        request_id = %request_id,
        "Request started"
    );

    let mut response = next.run(request).await;
    let duration = start.elapsed();
    let status = response.status();

    if let Ok(value) = HeaderValue::from_str(&format!("{:.6}", duration.as_secs_f64())) {
        response.headers_mut().insert(PROCESS_TIME_HEADER, value);
    }

    metrics::counter!(
        "quill_http_requests_total",
        "method" => method.to_string(),
        "status" => status.as_u16().to_string()
    )
    .increment(1);

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %status,
        duration_ms = %duration.as_millis(),
        request_id = %request_id,
        "Request completed"
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_tokens_are_invalid() {
        assert!(validate_token("user-123"));
        assert!(!validate_token("   "));
        assert!(!validate_token("\t"));
    }
}
