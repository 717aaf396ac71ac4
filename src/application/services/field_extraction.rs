//! Field extraction over the AI provider.
//!
//! Both variants share the best-effort contract from the collaborator
//! boundary: a provider failure or an unparseable reply degrades to an
//! empty mapping and is never surfaced to the user; the conversation's
//! literal-answer fallback covers the gap.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::intake::{extraction, prompts, FieldName};
use crate::ports::{AiProvider, CompletionRequest};

/// Opportunistic field extraction from chat messages and resume text.
pub struct FieldExtractionService {
    provider: Arc<dyn AiProvider>,
}

impl FieldExtractionService {
    pub fn new(provider: Arc<dyn AiProvider>) -> Self {
        Self { provider }
    }

    /// Extracts registry fields from one chat message.
    ///
    /// `current_field` is the question being answered, passed as a hint
    /// so bare answers resolve to the right key.
    pub async fn extract_from_message(
        &self,
        text: &str,
        current_field: FieldName,
    ) -> BTreeMap<FieldName, String> {
        let request = CompletionRequest::new(prompts::message_extraction(text, current_field))
            .with_temperature(0.0);
        self.run(request, "message").await
    }

    /// Extracts the document field subset from resume text.
    pub async fn extract_from_document(&self, resume_text: &str) -> BTreeMap<FieldName, String> {
        let request = CompletionRequest::new(prompts::document_extraction(resume_text))
            .with_temperature(0.0);
        self.run(request, "document").await
    }

    async fn run(&self, request: CompletionRequest, kind: &str) -> BTreeMap<FieldName, String> {
        match self.provider.complete(request).await {
            Ok(response) => {
                let fields = extraction::parse_field_response(&response.content);
                tracing::debug!(
                    kind,
                    extracted = fields.len(),
                    total_tokens = response.usage.total_tokens,
                    "field extraction completed"
                );
                fields
            }
            Err(error) => {
                tracing::debug!(kind, %error, "field extraction failed, returning no fields");
                BTreeMap::new()
            }
        }
    }
}
