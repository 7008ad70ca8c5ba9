//! Gemini `generateContent` client
//!
//! One request per call: a static system instruction plus a single user turn.
//! No retries, no streaming, no caching.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::error::AiError;
use crate::backend::server::config::AiConfig;

/// Public Gemini REST endpoint
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: SystemInstruction<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct SystemInstruction<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }
}

/// Client for the hosted text generation API
#[derive(Debug, Clone)]
pub struct AiClient {
    http_client: Client,
    config: AiConfig,
}

impl AiClient {
    pub fn new(config: AiConfig) -> Self {
        Self {
            http_client: Client::new(),
            config,
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Generate text for `user_prompt` under `system_prompt`
    ///
    /// # Errors
    ///
    /// Returns `AiError::HttpError` for a non-success status, and
    /// `AiError::EmptyResponse` when no candidate carries text.
    pub async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, AiError> {
        let request = GenerateContentRequest {
            system_instruction: SystemInstruction {
                parts: vec![Part { text: system_prompt }],
            },
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: user_prompt }],
            }],
        };

        tracing::debug!("[AI] generateContent with model {}", self.config.model);

        let response = self
            .http_client
            .post(self.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("[AI] Upstream returned {}: {}", status, body);
            return Err(AiError::HttpError {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        body.into_text().ok_or(AiError::EmptyResponse)
    }
}
