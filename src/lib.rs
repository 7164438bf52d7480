//! Workspace umbrella crate for Quill, a writing-assistant gateway in front of
//! a language model.
//!
//! Two features are stitched together here:
//!
//! - [`suggest`]: inline completions while the user types, two concurrent
//!   model calls merged into at most three suggestions.
//! - [`translate`]: background translation of plain text, PDF or DOCX uploads,
//!   chunked so each piece fits the model, with results stored by job id.
//!
//! The stage crates ([`extract`], [`chunk`], [`llm`], [`store`]) are
//! re-exported for callers that want to drive a stage directly.

pub mod config;
mod error;
pub mod suggest;
mod telemetry;
pub mod translate;

pub use chunk::{Chunk, ChunkConfig, ChunkError, chunk_text, split_into_chunks};
pub use extract::{ExtractError, FileKind, SourcePayload, decode_payload, resolve_text};
pub use llm::{
    LanguageModel, LlmConfig, LlmError, LlmMode, Prompt, PromptKind, build_client,
    extract_completions,
};
pub use store::{JobId, JobStore, StoreError, SuggestionLog};

pub use crate::config::PipelineConfig;
pub use crate::error::PipelineError;
pub use crate::suggest::{
    MAX_SUGGESTIONS, SuggestionEngine, SuggestionMode, SuggestionRequest, effective_suffix,
};
pub use crate::translate::{TranslationJob, TranslationRequest, Translator};
