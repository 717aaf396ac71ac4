//! Ports - interfaces the domain and application layers depend on.
//!
//! Adapters provide the implementations.

mod ai_provider;
mod document_reader;
mod session_store;

pub use ai_provider::{
    AiError, AiProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    TokenUsage,
};
pub use document_reader::{DocumentError, DocumentTextReader};
pub use session_store::{SessionGuard, SessionStore, SessionStoreError};
