//! Gemini Provider - Implementation of AiProvider for Google's Gemini API.
//!
//! Calls the `generateContent` REST endpoint (non-streaming). Each request
//! is attempted exactly once; failure handling belongs to the callers,
//! most of whom degrade gracefully rather than retry.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-1.5-flash")
//!     .with_base_url("https://generativelanguage.googleapis.com");
//!
//! let provider = GeminiProvider::new(config);
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::ports::{
    AiError, AiProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    TokenUsage,
};

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "gemini-1.5-flash").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gemini-1.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Gemini API provider implementation.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Creates a new Gemini provider with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be constructed (invalid TLS
    /// backend), which is a startup-time condition.
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    /// Converts our request to Gemini's wire format.
    fn to_gemini_request(request: &CompletionRequest) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: request.prompt.clone(),
                }],
            }],
            system_instruction: request.system_prompt.as_ref().map(|text| GeminiContent {
                role: None,
                parts: vec![GeminiPart { text: text.clone() }],
            }),
            generation_config: GeminiGenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
            },
        }
    }

    /// Converts Gemini's wire response to a completion response.
    fn from_gemini_response(
        response: GeminiResponse,
        model: &str,
    ) -> Result<CompletionResponse, AiError> {
        if let Some(feedback) = &response.prompt_feedback {
            if let Some(reason) = &feedback.block_reason {
                return Err(AiError::ContentFiltered {
                    reason: reason.clone(),
                });
            }
        }

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AiError::Parse("response contained no candidates".to_string()))?;

        let content = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let finish_reason = match candidate.finish_reason.as_deref() {
            Some("STOP") | None => FinishReason::Stop,
            Some("MAX_TOKENS") => FinishReason::Length,
            Some("SAFETY") | Some("RECITATION") => FinishReason::ContentFilter,
            Some(_) => FinishReason::Error,
        };

        let usage = response
            .usage_metadata
            .map(|u| TokenUsage::new(u.prompt_token_count, u.candidates_token_count))
            .unwrap_or_default();

        Ok(CompletionResponse {
            content,
            usage,
            model: model.to_string(),
            finish_reason,
        })
    }

    fn map_status(status: StatusCode, body: &str) -> AiError {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AiError::AuthenticationFailed,
            StatusCode::TOO_MANY_REQUESTS => AiError::RateLimited {
                retry_after_secs: 30,
            },
            StatusCode::BAD_REQUEST => AiError::InvalidRequest(body.to_string()),
            _ => AiError::Unavailable {
                message: format!("{status}: {body}"),
            },
        }
    }
}

#[async_trait]
impl AiProvider for GeminiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AiError> {
        let body = Self::to_gemini_request(&request);

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AiError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else {
                    AiError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "gemini request failed");
            return Err(Self::map_status(status, &body));
        }

        let wire: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AiError::Parse(e.to_string()))?;

        Self::from_gemini_response(wire, &self.config.model)
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("gemini", &self.config.model)
    }
}

// ─────────────────────────────────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<GeminiUsage>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiUsage {
    #[serde(rename = "promptTokenCount", default)]
    prompt_token_count: u32,
    #[serde(rename = "candidatesTokenCount", default)]
    candidates_token_count: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiPromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    mod request_building {
        use super::*;

        #[test]
        fn prompt_becomes_a_single_user_content() {
            let request = CompletionRequest::new("hello there");
            let wire = GeminiProvider::to_gemini_request(&request);

            assert_eq!(wire.contents.len(), 1);
            assert_eq!(wire.contents[0].role.as_deref(), Some("user"));
            assert_eq!(wire.contents[0].parts[0].text, "hello there");
            assert!(wire.system_instruction.is_none());
        }

        #[test]
        fn system_prompt_maps_to_system_instruction() {
            let request = CompletionRequest::new("hi").with_system_prompt("be terse");
            let wire = GeminiProvider::to_gemini_request(&request);

            let system = wire.system_instruction.unwrap();
            assert_eq!(system.parts[0].text, "be terse");
        }

        #[test]
        fn generation_config_is_omitted_when_unset() {
            let request = CompletionRequest::new("hi");
            let wire = GeminiProvider::to_gemini_request(&request);
            let json = serde_json::to_value(&wire).unwrap();

            assert_eq!(json["generationConfig"], serde_json::json!({}));
        }

        #[test]
        fn temperature_and_max_tokens_serialize_in_camel_case() {
            let request = CompletionRequest::new("hi")
                .with_temperature(0.0)
                .with_max_tokens(256);
            let wire = GeminiProvider::to_gemini_request(&request);
            let json = serde_json::to_value(&wire).unwrap();

            assert_eq!(json["generationConfig"]["temperature"], 0.0);
            assert_eq!(json["generationConfig"]["maxOutputTokens"], 256);
        }
    }

    mod response_parsing {
        use super::*;

        fn parse(json: serde_json::Value) -> Result<CompletionResponse, AiError> {
            let wire: GeminiResponse = serde_json::from_value(json).unwrap();
            GeminiProvider::from_gemini_response(wire, "gemini-1.5-flash")
        }

        #[test]
        fn candidate_text_and_usage_come_through() {
            let response = parse(serde_json::json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "Hello!"}]},
                    "finishReason": "STOP"
                }],
                "usageMetadata": {
                    "promptTokenCount": 12,
                    "candidatesTokenCount": 3,
                    "totalTokenCount": 15
                }
            }))
            .unwrap();

            assert_eq!(response.content, "Hello!");
            assert_eq!(response.finish_reason, FinishReason::Stop);
            assert_eq!(response.usage.total_tokens, 15);
            assert_eq!(response.model, "gemini-1.5-flash");
        }

        #[test]
        fn multiple_parts_are_concatenated() {
            let response = parse(serde_json::json!({
                "candidates": [{
                    "content": {"parts": [{"text": "Hel"}, {"text": "lo"}]}
                }]
            }))
            .unwrap();
            assert_eq!(response.content, "Hello");
        }

        #[test]
        fn max_tokens_maps_to_length() {
            let response = parse(serde_json::json!({
                "candidates": [{
                    "content": {"parts": [{"text": "truncated"}]},
                    "finishReason": "MAX_TOKENS"
                }]
            }))
            .unwrap();
            assert_eq!(response.finish_reason, FinishReason::Length);
        }

        #[test]
        fn no_candidates_is_a_parse_error() {
            let err = parse(serde_json::json!({"candidates": []})).unwrap_err();
            assert!(matches!(err, AiError::Parse(_)));
        }

        #[test]
        fn blocked_prompt_is_content_filtered() {
            let err = parse(serde_json::json!({
                "candidates": [],
                "promptFeedback": {"blockReason": "SAFETY"}
            }))
            .unwrap_err();
            assert!(matches!(err, AiError::ContentFiltered { .. }));
        }
    }

    mod error_mapping {
        use super::*;

        #[test]
        fn auth_statuses_map_to_authentication_failed() {
            assert!(matches!(
                GeminiProvider::map_status(StatusCode::UNAUTHORIZED, ""),
                AiError::AuthenticationFailed
            ));
            assert!(matches!(
                GeminiProvider::map_status(StatusCode::FORBIDDEN, ""),
                AiError::AuthenticationFailed
            ));
        }

        #[test]
        fn quota_maps_to_rate_limited() {
            assert!(matches!(
                GeminiProvider::map_status(StatusCode::TOO_MANY_REQUESTS, ""),
                AiError::RateLimited { .. }
            ));
        }

        #[test]
        fn server_errors_map_to_unavailable() {
            assert!(matches!(
                GeminiProvider::map_status(StatusCode::INTERNAL_SERVER_ERROR, "boom"),
                AiError::Unavailable { .. }
            ));
        }
    }

    #[test]
    fn url_includes_model_and_endpoint() {
        let provider = GeminiProvider::new(
            GeminiConfig::new("test-key").with_model("gemini-1.5-pro"),
        );
        assert_eq!(
            provider.generate_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-pro:generateContent"
        );
    }
}
