//! Error types for UniMind.

use thiserror::Error;

/// A shared error type for the UniMind crates.
///
/// Gateway failures never surface through this type to the conversation
/// layer; they are converted to fallback text inside the gateway. The
/// variants here cover configuration, storage and the structural upload
/// failure (`NoSupportedFiles`) that callers must report to the user.
#[derive(Error, Debug, Clone)]
pub enum UnimindError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Security/authentication error
    #[error("Security error: {0}")]
    Security(String),

    /// Generative-AI backend error
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// None of the pending uploads produced a content part
    #[error("No supported files to analyze. Please upload .txt or image files.")]
    NoSupportedFiles,

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl UnimindError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Gateway error
    pub fn gateway(message: impl Into<String>) -> Self {
        Self::Gateway(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is the "nothing to analyze" upload condition
    pub fn is_no_supported_files(&self) -> bool {
        matches!(self, Self::NoSupportedFiles)
    }
}

impl From<std::io::Error> for UnimindError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for UnimindError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for UnimindError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for UnimindError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for UnimindError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, UnimindError>`.
pub type Result<T> = std::result::Result<T, UnimindError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion_keeps_kind() {
        let err: UnimindError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing notes.txt").into();
        match err {
            UnimindError::Io { message } => {
                assert!(message.contains("missing notes.txt"));
                assert!(message.contains("NotFound"));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_no_supported_files_message() {
        let err = UnimindError::NoSupportedFiles;
        assert!(err.is_no_supported_files());
        assert!(err.to_string().contains("No supported files"));
    }
}
