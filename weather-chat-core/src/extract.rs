//! City-name extraction through a language model.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use tracing::{debug, warn};

use crate::provider::{ProviderError, truncate_body};

const SERVICE: &str = "gemini";
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// What the model answers when the sentence names no city.
pub const NULL_MARKER: &str = "null";

#[async_trait]
pub trait CityExtractor: Send + Sync + Debug {
    /// City named in `utterance`, or `None` when the model found none.
    async fn extract_city(&self, utterance: &str) -> Result<Option<String>, ProviderError>;
}

pub fn extraction_prompt(utterance: &str) -> String {
    format!("From the sentence '{utterance}', extract the city name only, or '{NULL_MARKER}' if none.")
}

/// Interprets free-text model output.
pub fn parse_reply(reply: &str) -> Option<String> {
    let city = reply.trim();
    if city.is_empty() || city.eq_ignore_ascii_case(NULL_MARKER) {
        None
    } else {
        Some(city.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct GeminiExtractor {
    api_key: String,
    model: String,
    http: Client,
}

impl GeminiExtractor {
    pub fn new(api_key: String, model: impl Into<String>) -> Self {
        Self {
            api_key,
            model: model.into(),
            http: Client::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
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
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

/// Classifies a non-success Gemini reply.
///
/// An invalid key comes back as 400 with a message, not 401. Anything else
/// (overload, rate limit, unknown model) is a generic failure.
pub(crate) fn status_error(status: u16, body: &str) -> ProviderError {
    if matches!(status, 401 | 403)
        || matches!(
            ProviderError::from_message(SERVICE, body.to_string()),
            ProviderError::Unauthorized { .. }
        )
    {
        return ProviderError::Unauthorized { service: SERVICE, status };
    }
    ProviderError::Other {
        service: SERVICE,
        message: format!("status {status}: {}", truncate_body(body)),
    }
}

/// Concatenated text of the first candidate.
fn response_text(body: &str) -> Result<String, ProviderError> {
    let parsed: GenerateResponse = serde_json::from_str(body).map_err(|e| ProviderError::Other {
        service: SERVICE,
        message: format!("Failed to parse Gemini response JSON: {e}"),
    })?;

    Ok(parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().map(|p| p.text).collect::<String>())
        .unwrap_or_default())
}

#[async_trait]
impl CityExtractor for GeminiExtractor {
    async fn extract_city(&self, utterance: &str) -> Result<Option<String>, ProviderError> {
        let prompt = extraction_prompt(utterance);
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: &prompt }],
            }],
        };

        let url = format!("{API_BASE}/{}:generateContent", self.model);
        let res = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::from_transport(SERVICE, &e))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| ProviderError::from_transport(SERVICE, &e))?;

        if !status.is_success() {
            warn!(%status, "Gemini request failed");
            return Err(status_error(status.as_u16(), &body));
        }

        let text = response_text(&body)?;
        debug!(reply = %text.trim(), "city extraction reply");
        Ok(parse_reply(&text))
    }
}
