//! Google Gemini `generateContent` client.
//!
//! Two call shapes are supported: a plain prompt, and a prompt with a
//! thinking budget for requests that benefit from extra reasoning.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{Result, TutorError};

/// A single prompt-in / text-out request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub prompt: String,
    pub thinking_budget: Option<u32>,
}

impl GenerateRequest {
    pub fn plain(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            thinking_budget: None,
        }
    }

    pub fn with_thinking(prompt: impl Into<String>, budget: u32) -> Self {
        Self {
            prompt: prompt.into(),
            thinking_budget: Some(budget),
        }
    }
}

/// Anything that turns a prompt into text.
#[async_trait]
pub trait TextGenerator: Send + Sync + Debug {
    async fn generate(&self, request: GenerateRequest) -> Result<String>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiResponseContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: Option<String>,
    /// Set on thought summaries, which are not part of the answer.
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: Option<u32>,
    #[serde(default)]
    candidates_token_count: Option<u32>,
    #[serde(default)]
    thoughts_token_count: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Builds the HTTP client. A missing API key is not an error here; it
    /// surfaces on the first call instead.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }

    fn build_body(request: &GenerateRequest) -> GeminiRequest<'_> {
        GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: &request.prompt }],
            }],
            generation_config: request.thinking_budget.map(|thinking_budget| GenerationConfig {
                thinking_config: ThinkingConfig { thinking_budget },
            }),
        }
    }

    /// Joins the answer parts of the first candidate. No candidates yields
    /// an empty string; a blocked prompt is an error.
    fn extract_text(response: GeminiResponse) -> Result<String> {
        if let Some(usage) = &response.usage_metadata {
            info!(
                "Gemini usage - prompt: {:?}, response: {:?}, thoughts: {:?}",
                usage.prompt_token_count, usage.candidates_token_count, usage.thoughts_token_count
            );
        }

        let Some(candidate) = response.candidates.into_iter().next() else {
            if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
                return Err(TutorError::InvalidResponse(format!("prompt blocked ({})", reason)));
            }
            return Ok(String::new());
        };

        let text = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter(|part| !part.thought)
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        Ok(text)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or(TutorError::MissingApiKey)?;

        debug!(
            "Sending request to {} (prompt {} bytes, thinking budget {:?})",
            self.endpoint(),
            request.prompt.len(),
            request.thinking_budget
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&Self::build_body(&request))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("Gemini API error: {} - {}", status, body);
            return Err(TutorError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GeminiResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse Gemini response: {}", e);
            TutorError::Json(e)
        })?;

        Self::extract_text(parsed)
    }
}
