//! GeminiGateway - `AiGateway` over the Gemini REST API.
//!
//! One HTTP client is built at construction and reused. The API key is read
//! from the `SecretService` on every request, so a rotated key is picked up
//! without rebuilding the gateway. Every failure is logged under the
//! `gateway` target and replaced by the operation's fallback text.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use unimind_core::UnimindError;
use unimind_core::config::GeminiSettings;
use unimind_core::content::ContentPart;
use unimind_core::gateway::{
    ANALYZE_FALLBACKS, AiGateway, CONVERSE_FALLBACKS, Fallbacks, SEARCH_FALLBACKS,
};
use unimind_core::prompts::{ANALYZE_INSTRUCTION, SEARCH_INSTRUCTION, SYSTEM_INSTRUCTION};
use unimind_core::secret::SecretService;

/// Failures inside the gateway. Never returned to callers.
#[derive(Debug, thiserror::Error)]
enum GatewayError {
    #[error("Gemini API key is not configured")]
    MissingApiKey,

    #[error("Failed to load secrets: {0}")]
    Secrets(String),

    #[error("Gemini API request failed: {0}")]
    Transport(reqwest::Error),

    #[error("Gemini API returned {status}: {message}")]
    Http { status: StatusCode, message: String },

    #[error("Failed to parse Gemini response: {0}")]
    Decode(reqwest::Error),
}

/// Gateway implementation that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiGateway {
    client: Client,
    secrets: Arc<dyn SecretService>,
    model: String,
    base_url: String,
}

impl GeminiGateway {
    /// Builds the gateway and its HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `UnimindError::Gateway` if the HTTP client cannot be built.
    pub fn new(
        settings: &GeminiSettings,
        secrets: Arc<dyn SecretService>,
    ) -> unimind_core::error::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| UnimindError::gateway(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            secrets,
            model: settings.model.clone(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn api_key(&self) -> Result<String, GatewayError> {
        let secrets = self
            .secrets
            .load_secrets()
            .await
            .map_err(GatewayError::Secrets)?;
        secrets
            .gemini_api_key()
            .map(str::to_string)
            .ok_or(GatewayError::MissingApiKey)
    }

    /// Sends one `generateContent` request and returns the reply text, or
    /// `None` if the response carried no text.
    async fn generate(
        &self,
        system_instruction: &str,
        parts: Vec<Part>,
    ) -> Result<Option<String>, GatewayError> {
        let api_key = self.api_key().await?;
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user"),
                parts,
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part::text(system_instruction)],
            },
        };

        tracing::debug!(target: "gateway", model = %self.model, "Sending generateContent request");

        // The key travels in the query string; strip URLs from errors so it
        // never reaches the logs.
        let response = self
            .client
            .post(url)
            .query(&[("key", api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(GatewayError::Http {
                status,
                message: error_message(&body),
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Decode(e.without_url()))?;

        Ok(extract_text(parsed))
    }

    async fn run(
        &self,
        operation: &'static str,
        fallbacks: Fallbacks,
        system_instruction: &str,
        parts: Vec<Part>,
    ) -> String {
        match self.generate(system_instruction, parts).await {
            Ok(Some(text)) => {
                tracing::debug!(target: "gateway", operation, chars = text.len(), "Received reply");
                text
            }
            Ok(None) => {
                tracing::warn!(target: "gateway", operation, "Gemini returned no text");
                fallbacks.empty.to_string()
            }
            Err(e) => {
                tracing::error!(target: "gateway", operation, "{}", e);
                fallbacks.error.to_string()
            }
        }
    }
}

#[async_trait]
impl AiGateway for GeminiGateway {
    async fn converse(&self, prompt: &str) -> String {
        self.run(
            "converse",
            CONVERSE_FALLBACKS,
            SYSTEM_INSTRUCTION,
            vec![Part::text(prompt)],
        )
        .await
    }

    async fn analyze(&self, parts: Vec<ContentPart>) -> String {
        let parts = std::iter::once(Part::text(ANALYZE_INSTRUCTION))
            .chain(parts.into_iter().map(Part::from))
            .collect();
        self.run("analyze", ANALYZE_FALLBACKS, SYSTEM_INSTRUCTION, parts)
            .await
    }

    async fn search(&self, prompt: &str) -> String {
        self.run(
            "search",
            SEARCH_FALLBACKS,
            SEARCH_INSTRUCTION,
            vec![Part::text(prompt)],
        )
        .await
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: Content,
}

#[derive(Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineDataPayload,
    },
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}

impl From<ContentPart> for Part {
    fn from(part: ContentPart) -> Self {
        match part {
            ContentPart::Text { value } => Part::Text { text: value },
            ContentPart::InlineBinary { mime_type, data } => Part::InlineData {
                inline_data: InlineDataPayload { mime_type, data },
            },
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataPayload {
    mime_type: String,
    data: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Concatenates the text parts of the first candidate. Blank text counts
/// as no text.
fn extract_text(response: GenerateContentResponse) -> Option<String> {
    let content = response
        .candidates?
        .into_iter()
        .next()?
        .content?;
    let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
    (!text.trim().is_empty()).then_some(text)
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorWrapper>(body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.to_string());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.to_string())
}
