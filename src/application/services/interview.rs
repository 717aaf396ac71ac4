//! Interview question and recruiter summary generation.

use std::sync::Arc;

use crate::domain::intake::{prompts, CandidateProfile, SUMMARY_FALLBACK};
use crate::ports::{AiError, AiProvider, CompletionRequest};

/// Generates interview questions and recruiter summaries.
pub struct InterviewContentService {
    provider: Arc<dyn AiProvider>,
}

impl InterviewContentService {
    pub fn new(provider: Arc<dyn AiProvider>) -> Self {
        Self { provider }
    }

    /// Generates technical interview questions for the candidate.
    ///
    /// # Errors
    ///
    /// Propagates provider failures; the caller decides the fallback.
    pub async fn generate_questions(
        &self,
        experience_level: &str,
        tech_stack: &str,
    ) -> Result<String, AiError> {
        let request =
            CompletionRequest::new(prompts::interview_questions(experience_level, tech_stack));
        let response = self.provider.complete(request).await?;
        Ok(response.content)
    }

    /// Writes the recruiter-facing summary.
    ///
    /// Never fails: provider errors are replaced with a fixed fallback
    /// string.
    pub async fn summarize(&self, profile: &CandidateProfile) -> String {
        let request = CompletionRequest::new(prompts::recruiter_summary(profile));
        match self.provider.complete(request).await {
            Ok(response) => response.content,
            Err(error) => {
                tracing::warn!(%error, "summary generation failed, using fallback");
                SUMMARY_FALLBACK.to_string()
            }
        }
    }
}
