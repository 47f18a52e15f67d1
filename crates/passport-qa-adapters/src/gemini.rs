//! Gemini `generateContent` client implementing [`ContentAssessor`].
//!
//! Sends the instruction text and the photo as inline base64 data, then
//! hands the concatenated reply text to [`parse_reply`]. Network faults,
//! non-success statuses and unreadable envelopes surface as
//! [`AssessmentError`]; a readable envelope with a chatty or malformed
//! answer inside is not an error.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use passport_qa_core::domain::{ContentAssessment, CountrySpec, PhotoUpload};
use passport_qa_core::ports::{AssessmentError, ContentAssessor};
use passport_qa_core::remote::{build_instruction, parse_reply};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

/// Public Gemini API root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Body excerpt kept in [`AssessmentError::Status`].
const MAX_ERROR_BODY: usize = 512;

/// Connection settings for [`GeminiAssessor`].
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API root, without the `/models/...` suffix.
    pub base_url: String,
    /// Model name, e.g. `gemini-2.0-flash`.
    pub model: String,
    /// API key sent in the `x-goog-api-key` header.
    pub api_key: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl GeminiConfig {
    /// Configuration for the public endpoint with default model and timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
            timeout_secs: 30,
        }
    }

    /// Points the client at another API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Selects another model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Overrides the request timeout.
    #[must_use]
    pub const fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// HTTP client for Gemini content assessment.
///
/// Cheap to share behind an `Arc`; the inner `reqwest::Client` pools
/// connections.
#[derive(Debug)]
pub struct GeminiAssessor {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl GeminiAssessor {
    /// Builds a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AssessmentError::NotConfigured`] if the API key is empty or
    /// not a valid header value, or the HTTP client cannot be built.
    pub fn new(config: GeminiConfig) -> Result<Self, AssessmentError> {
        if config.api_key.trim().is_empty() {
            return Err(AssessmentError::NotConfigured("missing API key".into()));
        }
        let mut key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| AssessmentError::NotConfigured("invalid API key characters".into()))?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| {
                AssessmentError::NotConfigured(format!("failed to build HTTP client: {e}"))
            })?;

        let endpoint = format!(
            "{}/models/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            config.model
        );
        Ok(Self {
            client,
            endpoint,
            timeout,
        })
    }

    /// Full URL requests are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn transport_error(&self, e: &reqwest::Error) -> AssessmentError {
        if e.is_timeout() {
            AssessmentError::Timeout(self.timeout)
        } else {
            AssessmentError::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl ContentAssessor for GeminiAssessor {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn assess(
        &self,
        photo: &PhotoUpload,
        spec: &CountrySpec,
    ) -> Result<ContentAssessment, AssessmentError> {
        let body = json!({
            "contents": [{
                "parts": [
                    { "text": build_instruction(spec) },
                    {
                        "inline_data": {
                            "mime_type": photo.mime_type,
                            "data": STANDARD.encode(&photo.bytes),
                        }
                    }
                ]
            }]
        });

        let resp = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = resp.status();
        if !status.is_success() {
            let mut body = resp.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let mut end = MAX_ERROR_BODY;
                while !body.is_char_boundary(end) {
                    end -= 1;
                }
                body.truncate(end);
            }
            return Err(AssessmentError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GenerateContentResponse = resp.json().await.map_err(|e| {
            if e.is_timeout() {
                AssessmentError::Timeout(self.timeout)
            } else {
                AssessmentError::Decode(e.to_string())
            }
        })?;
        let text = envelope.reply_text()?;
        debug!(chars = text.len(), country = %spec.country, "gemini replied");
        Ok(parse_reply(&text))
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, all parts joined.
    fn reply_text(self) -> Result<String, AssessmentError> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AssessmentError::Decode("response has no candidates".into()))?;
        Ok(candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default())
    }
}
