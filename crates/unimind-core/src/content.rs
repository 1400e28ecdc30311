//! Normalized payload units sent to the generative-AI backend.

use serde::{Deserialize, Serialize};

/// A single unit of a multi-part AI request.
///
/// Produced transiently by the ingestion adapter and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ContentPart {
    /// Plain text.
    Text { value: String },
    /// Binary data encoded as standard base64, tagged with its MIME type.
    #[serde(rename_all = "camelCase")]
    InlineBinary { mime_type: String, data: String },
}

impl ContentPart {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    pub fn inline_binary(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self::InlineBinary {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }
}
