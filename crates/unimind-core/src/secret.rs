//! Secret management service trait.
//!
//! Defines the interface for loading API keys. The gateway asks for the
//! secrets on every request, so credentials rotated by an external
//! collaborator are picked up without rebuilding any client.

use crate::config::SecretConfig;

/// Service for loading secret configuration.
///
/// # Security Note
///
/// Implementations should ensure that:
/// - Secrets are never logged or exposed in error messages
/// - Secrets are loaded from secure locations
#[async_trait::async_trait]
pub trait SecretService: Send + Sync {
    /// Loads the current secret configuration.
    ///
    /// # Returns
    ///
    /// - `Ok(SecretConfig)`: Successfully loaded secrets
    /// - `Err(String)`: Failed to load (error message should not contain secrets)
    async fn load_secrets(&self) -> Result<SecretConfig, String>;
}

/// Fixed in-memory secrets, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSecretService {
    secrets: SecretConfig,
}

impl StaticSecretService {
    pub fn new(secrets: SecretConfig) -> Self {
        Self { secrets }
    }

    /// Convenience constructor for a single Gemini key.
    pub fn with_gemini_key(api_key: impl Into<String>) -> Self {
        Self::new(SecretConfig {
            gemini: Some(crate::config::GeminiSecret {
                api_key: api_key.into(),
            }),
        })
    }
}

#[async_trait::async_trait]
impl SecretService for StaticSecretService {
    async fn load_secrets(&self) -> Result<SecretConfig, String> {
        Ok(self.secrets.clone())
    }
}
