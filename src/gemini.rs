//! Gemini completion client
//!
//! This module provides HTTP client functionality for the Gemini
//! `generateContent` endpoint. The service is treated as an opaque text
//! oracle: one prompt string in, one text blob out, with no assumptions
//! about the shape of what it returns.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::PlannerConfig;
use crate::error::PlannerError;

/// A text-completion service: one prompt in, raw text out.
///
/// The production implementation is [`GeminiClient`]; tests substitute a
/// scripted fake.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, PlannerError>;
}

/// Client for the Gemini `generateContent` REST API
pub struct GeminiClient {
    model: String,
    base_url: String,
    api_key: String,
    client: Client,
}

impl GeminiClient {
    /// Build a client from the application configuration.
    pub fn new(config: &PlannerConfig) -> Result<Self, PlannerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| PlannerError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            client,
        })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, PlannerError> {
        debug!(prompt_len = prompt.len(), model = %self.model, "Calling Gemini");

        let request = wire::GenerateContentRequest::from_prompt(prompt);

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| PlannerError::upstream(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlannerError::upstream(format!(
                "Gemini returned {status}: {body}"
            )));
        }

        let body: wire::GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| PlannerError::upstream(format!("Invalid Gemini response body: {e}")))?;

        body.first_text()
            .ok_or_else(|| PlannerError::upstream("Gemini response contained no candidates"))
    }
}

/// Gemini wire format: request and response bodies for `generateContent`
mod wire {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize)]
    pub struct GenerateContentRequest {
        pub contents: Vec<Content>,
    }

    impl GenerateContentRequest {
        pub fn from_prompt(prompt: &str) -> Self {
            Self {
                contents: vec![Content {
                    parts: vec![Part {
                        text: prompt.to_string(),
                    }],
                }],
            }
        }
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Content {
        pub parts: Vec<Part>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Part {
        pub text: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct GenerateContentResponse {
        #[serde(default)]
        pub candidates: Vec<Candidate>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Candidate {
        pub content: CandidateContent,
    }

    #[derive(Debug, Deserialize)]
    pub struct CandidateContent {
        #[serde(default)]
        pub parts: Vec<Part>,
    }

    impl GenerateContentResponse {
        /// Concatenated text of the first candidate, if any.
        pub fn first_text(&self) -> Option<String> {
            let candidate = self.candidates.first()?;
            if candidate.content.parts.is_empty() {
                return None;
            }
            Some(
                candidate
                    .content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> PlannerConfig {
        PlannerConfig {
            api_key: "test-key".to_string(),
            model: "gemini-1.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/".to_string(),
            port: 3000,
            timeout_seconds: 30,
        }
    }

    #[test]
    fn test_generate_url() {
        let client = GeminiClient::new(&test_config()).unwrap();
        assert_eq!(
            client.generate_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let request = wire::GenerateContentRequest::from_prompt("hello");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
    }

    #[test]
    fn test_response_first_text() {
        let raw = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "```json\n"}, {"text": "[]\n```"}]}}
            ]
        }"#;
        let response: wire::GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.first_text().unwrap(), "```json\n[]\n```");
    }

    #[test]
    fn test_response_without_candidates() {
        let response: wire::GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(response.first_text().is_none());
    }
}
