//! Mock AI Provider for testing.
//!
//! Configurable without calling a real API: responses can be scripted
//! against prompt substrings, queued in order, or defaulted, and every
//! request is captured for verification.
//!
//! Resolution order per call: first matching scripted rule, then the
//! queue, then the default, then an `Unavailable` error.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{
    AiError, AiProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    TokenUsage,
};

#[derive(Debug, Clone)]
enum MockReply {
    Success(String),
    Failure(String),
}

impl MockReply {
    fn resolve(&self) -> Result<CompletionResponse, AiError> {
        match self {
            MockReply::Success(content) => Ok(CompletionResponse {
                content: content.clone(),
                usage: TokenUsage::zero(),
                model: "mock".to_string(),
                finish_reason: FinishReason::Stop,
            }),
            MockReply::Failure(message) => Err(AiError::Unavailable {
                message: message.clone(),
            }),
        }
    }
}

/// Mock AI provider with scripted responses and call capture.
pub struct MockAiProvider {
    scripted: Vec<(String, MockReply)>,
    queue: Mutex<VecDeque<MockReply>>,
    default: Option<MockReply>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self {
            scripted: Vec::new(),
            queue: Mutex::new(VecDeque::new()),
            default: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a successful response (consumed in order).
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.queue
            .lock()
            .unwrap()
            .push_back(MockReply::Success(content.into()));
        self
    }

    /// Queues a failure (consumed in order).
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.queue
            .lock()
            .unwrap()
            .push_back(MockReply::Failure(message.into()));
        self
    }

    /// Scripts a response for any prompt containing the given fragment.
    pub fn with_scripted(
        mut self,
        prompt_fragment: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.scripted
            .push((prompt_fragment.into(), MockReply::Success(content.into())));
        self
    }

    /// Scripts a failure for any prompt containing the given fragment.
    pub fn with_scripted_failure(
        mut self,
        prompt_fragment: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.scripted
            .push((prompt_fragment.into(), MockReply::Failure(message.into())));
        self
    }

    /// Sets the fallback response for otherwise unmatched prompts.
    pub fn with_default_response(mut self, content: impl Into<String>) -> Self {
        self.default = Some(MockReply::Success(content.into()));
        self
    }

    /// Returns all captured requests.
    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of completed calls.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AiError> {
        self.calls.lock().unwrap().push(request.clone());

        if let Some((_, reply)) = self
            .scripted
            .iter()
            .find(|(fragment, _)| request.prompt.contains(fragment.as_str()))
        {
            return reply.resolve();
        }
        if let Some(reply) = self.queue.lock().unwrap().pop_front() {
            return reply.resolve();
        }
        if let Some(reply) = &self.default {
            return reply.resolve();
        }
        Err(AiError::Unavailable {
            message: "no scripted response".to_string(),
        })
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("mock", "mock")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn queued_responses_come_back_in_order() {
        let provider = MockAiProvider::new()
            .with_response("first")
            .with_response("second");

        let a = provider.complete(CompletionRequest::new("x")).await.unwrap();
        let b = provider.complete(CompletionRequest::new("y")).await.unwrap();
        assert_eq!(a.content, "first");
        assert_eq!(b.content, "second");
    }

    #[tokio::test]
    async fn scripted_rules_beat_the_queue() {
        let provider = MockAiProvider::new()
            .with_response("queued")
            .with_scripted("summary", "scripted");

        let hit = provider
            .complete(CompletionRequest::new("write a summary please"))
            .await
            .unwrap();
        assert_eq!(hit.content, "scripted");

        let miss = provider
            .complete(CompletionRequest::new("something else"))
            .await
            .unwrap();
        assert_eq!(miss.content, "queued");
    }

    #[tokio::test]
    async fn exhausted_mock_without_default_errors() {
        let provider = MockAiProvider::new();
        let err = provider
            .complete(CompletionRequest::new("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, AiError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn calls_are_captured() {
        let provider = MockAiProvider::new().with_default_response("ok");
        provider
            .complete(CompletionRequest::new("first prompt"))
            .await
            .unwrap();

        assert_eq!(provider.call_count(), 1);
        assert_eq!(provider.calls()[0].prompt, "first prompt");
    }
}
