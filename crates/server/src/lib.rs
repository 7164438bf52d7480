//! Quill Server - HTTP gateway for the Quill writing assistant
//!
//! This crate exposes the Quill suggestion engine and document translator
//! over HTTP. It supports:
//!
//! - **Inline Suggestions**: up to three completions for the text at the cursor
//! - **Document Translation**: plain text, PDF or DOCX, translated in the background
//! - **Health & Metrics**: Liveness/readiness probes and Prometheus metrics
//!
//! # Features
//!
//! - **Authentication**: every `/v1/llm/*` call carries an `X-User-Token` header
//! - **Middleware**: Compression, CORS, request ID tracking, structured logging
//! - **Configuration**: `.env`, config file, `QUILL__*` environment variables and CLI flags
//! - **TLS**: rustls, enabled when both key and certificate are given
//! - **Graceful Shutdown**: Proper signal handling for production deployments
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! ## Public Endpoints (No Token)
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `GET /metrics` - Prometheus metrics
//!
//! ## Protected Endpoints (`X-User-Token` Required)
//!
//! - `POST /v1/llm/suggestion` - `{text, suffixText?, context?}` → `{suggestions}`
//! - `POST /v1/llm/translate` - `{text, language}` → `{translation: <job id>}`
//! - `POST /v1/llm/translate/result` - `{md5: <job id>}` → `{translation}` or 404

pub mod cli;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use cli::Cli;
pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
