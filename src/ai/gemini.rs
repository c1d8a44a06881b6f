// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Gemini `generateContent` client
//!
//! Both calls ask for `application/json` output constrained by a response
//! schema, then parse the first candidate's text as that JSON shape.

use super::{project, Recommender, RepoAnalyzer};
use crate::error::{VaultError, VaultResult};
use crate::types::{Analysis, Difficulty, Recommendation, Repository};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Default API root
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Longest slice of an error body kept in error messages
const ERROR_BODY_LIMIT: usize = 200;

// =============================================================================
// Errors
// =============================================================================

/// Failures inside the Gemini client, mapped to vault errors at the trait boundary
#[derive(Debug, Error)]
pub enum GeminiError {
    /// No API key was configured
    #[error("no API key configured (set REPOVAULT_API_KEY or GEMINI_API_KEY)")]
    MissingApiKey,

    /// Transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status
    #[error("Gemini API returned status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Leading part of the response body
        body: String,
    },

    /// No candidate text in the response
    #[error("Gemini response contained no text")]
    EmptyResponse,

    /// Candidate text did not match the requested JSON shape
    #[error("Gemini response did not match the requested schema: {0}")]
    Payload(#[from] serde_json::Error),
}

// =============================================================================
// Configuration
// =============================================================================

/// Connection settings for [`GeminiClient`]
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key; requests fail with [`GeminiError::MissingApiKey`] when absent
    pub api_key: Option<String>,
    /// Model name, e.g. `gemini-3-flash-preview`
    pub model: String,
    /// API root without trailing slash
    pub api_base: String,
    /// Optional request timeout; none by default
    pub timeout: Option<Duration>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: None,
        }
    }
}

// =============================================================================
// Wire types
// =============================================================================

/// Request body for `models/{model}:generateContent`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

/// Response body; only the fields we read
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Clone, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Clone, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

/// Wrap a prompt and response schema into a request body
#[must_use]
pub fn build_request(prompt: String, schema: Value) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content {
            role: "user",
            parts: vec![Part { text: prompt }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
            response_schema: schema,
        },
    }
}

/// Concatenated text of the first candidate
pub fn extract_text(response: &GenerateResponse) -> Result<String, GeminiError> {
    let text: String = response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|p| p.text.as_deref())
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GeminiError::EmptyResponse);
    }
    Ok(text)
}

/// Parse candidate text as JSON, tolerating a Markdown code fence around it
pub fn parse_payload<T: DeserializeOwned>(text: &str) -> Result<T, GeminiError> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed);
    Ok(serde_json::from_str(body.trim())?)
}

// =============================================================================
// Prompts and schemas
// =============================================================================

/// Prompt for a single repository analysis
#[must_use]
pub fn analysis_prompt(url: &str, notes: &str) -> String {
    format!(
        "Analyze this code repository: {url}. User notes: {notes}.\n\
         Provide a professional summary, common use cases, the estimated difficulty \
         to explore and set up, and metadata.\n\
         Estimate the star count based on your knowledge of this project."
    )
}

/// Response schema for [`Analysis`]
#[must_use]
pub fn analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING" },
            "useCases": { "type": "ARRAY", "items": { "type": "STRING" } },
            "difficulty": {
                "type": "STRING",
                "format": "enum",
                "enum": Difficulty::LABELS
            },
            "primaryLanguage": { "type": "STRING" },
            "topics": { "type": "ARRAY", "items": { "type": "STRING" } },
            "estimatedStars": { "type": "NUMBER" }
        },
        "required": ["summary", "useCases", "difficulty", "primaryLanguage", "topics", "estimatedStars"]
    })
}

/// Prompt for picking one record; `context` is the JSON-encoded projection
#[must_use]
pub fn recommendation_prompt(context: &str, vibe: &str) -> String {
    format!(
        "Based on this user's repository vault: {context}.\n\
         The user says: \"{vibe}\".\n\
         Pick the best ONE repository for them to try out right now and give a very \
         short, encouraging reason why. Answer with the repository's id exactly as given."
    )
}

/// Response schema for [`Recommendation`]
#[must_use]
pub fn recommendation_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "repoId": { "type": "STRING" },
            "reason": { "type": "STRING" }
        },
        "required": ["repoId", "reason"]
    })
}

// =============================================================================
// Client
// =============================================================================

/// HTTP client for the Gemini API
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Build a client. Fails only if the HTTP stack cannot be initialised.
    pub fn new(config: GeminiConfig) -> Result<Self, GeminiError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("repovault/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            config,
        })
    }

    /// The `generateContent` endpoint for the configured model
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Issue one structured-generation request and parse the result as `T`
    async fn generate<T: DeserializeOwned>(&self, prompt: String, schema: Value) -> Result<T, GeminiError> {
        let api_key = self.config.api_key.as_deref().ok_or(GeminiError::MissingApiKey)?;
        let body = build_request(prompt, schema);

        debug!("POST {}", self.endpoint());
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(GeminiError::Status {
                status: status.as_u16(),
                body: text.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        let payload: GenerateResponse = response.json().await?;
        parse_payload(&extract_text(&payload)?)
    }
}

#[async_trait]
impl RepoAnalyzer for GeminiClient {
    async fn analyze(&self, url: &str, notes: &str) -> VaultResult<Analysis> {
        self.generate(analysis_prompt(url, notes), analysis_schema())
            .await
            .map_err(|e| {
                warn!("Analysis of {} failed: {}", url, e);
                VaultError::AnalysisFailed {
                    reason: e.to_string(),
                }
            })
    }
}

#[async_trait]
impl Recommender for GeminiClient {
    async fn recommend(&self, records: &[Repository], vibe: &str) -> VaultResult<Recommendation> {
        let fail = |e: GeminiError| {
            warn!("Recommendation failed: {}", e);
            VaultError::RecommendationFailed {
                reason: e.to_string(),
            }
        };

        let context = serde_json::to_string(&project(records)).map_err(|e| fail(e.into()))?;
        self.generate(recommendation_prompt(&context, vibe), recommendation_schema())
            .await
            .map_err(fail)
    }
}
