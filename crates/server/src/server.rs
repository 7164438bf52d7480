//! Server initialization and routing
//!
//! This module handles the Axum server setup including:
//! - Router configuration with all API endpoints
//! - Middleware stack (token check, request ids, logging, compression, CORS)
//! - Plaintext or rustls listeners
//! - Graceful shutdown handling

use crate::config::ServerConfig;
use crate::middleware::{log_requests, request_id, require_user_token};
use crate::routes::{api_info, not_found};
use crate::routes::{health, suggestion, translate};
use crate::state::ServerState;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// How long in-flight requests get to finish once shutdown starts (TLS listener)
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Build the Axum router with all routes and middleware
///
/// Routes are divided into:
/// - Public routes: /, /health, /ready, /metrics (no token required)
/// - Protected routes: All /v1/llm/* endpoints (`X-User-Token` required)
///
/// Middleware stack (outermost first):
/// 1. Tracing
/// 2. Request ID tracking
/// 3. Request logging and `X-Process-Time`
/// 4. CORS
/// 5. Compression
/// 6. User token check (protected routes only)
pub fn build_router(state: Arc<ServerState>) -> Router {
    // CORS layer
    let cors = if state.config.enable_cors {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
    };

    // Public routes (no token required)
    let public_routes = Router::new()
        .route("/", get(api_info))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/metrics", get(health::metrics));

    // Protected routes (require a user token)
    let protected_routes = Router::new()
        .route("/v1/llm/suggestion", post(suggestion::suggest))
        .route("/v1/llm/translate", post(translate::translate))
        .route("/v1/llm/translate/result", post(translate::translation_result))
        .layer(DefaultBodyLimit::max(state.config.max_body_size()))
        .layer(from_fn(require_user_token));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(not_found)
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(from_fn(log_requests))
        .layer(from_fn(request_id))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the Quill HTTP server
///
/// Initializes the server with the provided configuration and starts listening
/// for incoming HTTP requests. This function will block until the server is
/// shut down via SIGTERM or Ctrl+C.
///
/// # Example
///
/// ```rust,no_run
/// use server::ServerConfig;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = ServerConfig::load()?;
///     server::start_server(config).await?;
///     Ok(())
/// }
/// ```
///
/// # TLS
///
/// HTTPS is served only when both `tls_key_path` and `tls_cert_path` are set.
/// With just one of them the server logs a warning and serves plain HTTP.
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .with_target(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .json()
        .init();

    // Create server state
    let state = Arc::new(ServerState::new(config.clone())?);

    // Build router
    let app = build_router(state.clone());

    // Parse bind address
    let addr: SocketAddr = config.socket_addr()?;

    tracing::info!(
        "Starting Quill server on {} with model {}",
        addr,
        state.model_name()
    );
    tracing::info!(
        "Results: {}, suggestion log: {}, max body: {}MB",
        config.result_dir.display(),
        config.suggestion_log.display(),
        config.max_body_size_mb
    );
    tracing::info!(
        "CORS: {}, Metrics: {}",
        config.enable_cors,
        config.metrics_enabled
    );

    if config.tls_incomplete() {
        tracing::warn!(
            "Both --ssl-keyfile and --ssl-certfile are required for HTTPS; serving plain HTTP"
        );
    }

    match config.tls_paths() {
        Some((key, cert)) => {
            let tls = RustlsConfig::from_pem_file(cert, key).await?;
            let handle = axum_server::Handle::new();
            let shutdown = handle.clone();
            tokio::spawn(async move {
                shutdown_signal().await;
                shutdown.graceful_shutdown(Some(SHUTDOWN_GRACE));
            });

            tracing::info!("TLS enabled");
            axum_server::bind_rustls(addr, tls)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        }
        None => {
            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
        }
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
