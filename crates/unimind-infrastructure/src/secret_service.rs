//! Secret service implementation.
//!
//! Reads API keys from `secret.json`. The `GEMINI_API_KEY` environment
//! variable (then `API_KEY`) takes precedence over the file so keys can be
//! injected without touching disk.

use std::path::PathBuf;

use unimind_core::config::{GeminiSecret, SecretConfig};
use unimind_core::secret::SecretService;

use crate::paths::UnimindPaths;

/// Environment variables checked for the Gemini key, in priority order.
pub const GEMINI_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// File- and environment-backed `SecretService`.
///
/// Secrets are re-read on every call; the file is tiny and this lets a key
/// edited while the app runs take effect on the next request.
///
/// # Example
///
/// ```ignore
/// use unimind_infrastructure::SecretServiceImpl;
/// use unimind_core::secret::SecretService;
///
/// let service = SecretServiceImpl::default();
/// let secrets = service.load_secrets().await?;
/// ```
#[derive(Debug, Clone)]
pub struct SecretServiceImpl {
    paths: UnimindPaths,
    /// Disabled in tests so the host environment cannot leak in.
    read_env: bool,
}

impl SecretServiceImpl {
    pub fn new(paths: UnimindPaths) -> Self {
        Self {
            paths,
            read_env: true,
        }
    }

    /// Ignores environment variables and reads only the file.
    pub fn file_only(mut self) -> Self {
        self.read_env = false;
        self
    }

    fn secret_path(&self) -> Result<PathBuf, String> {
        self.paths
            .secret_file()
            .map_err(|e| format!("Failed to get secret path: {}", e))
    }

    async fn load_from_file(&self) -> Result<SecretConfig, String> {
        let path = self.secret_path()?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| format!("Failed to parse {}: {}", path.display(), e)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(SecretConfig::default()),
            Err(e) => Err(format!("Failed to read {}: {}", path.display(), e)),
        }
    }
}

impl Default for SecretServiceImpl {
    fn default() -> Self {
        Self::new(UnimindPaths::default())
    }
}

/// Returns the first non-blank value among `GEMINI_KEY_ENV_VARS`.
fn gemini_key_from_env() -> Option<String> {
    GEMINI_KEY_ENV_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig, String> {
        let env_key = self.read_env.then(gemini_key_from_env).flatten();

        if let Some(api_key) = env_key {
            tracing::debug!("Using Gemini API key from environment");
            return Ok(SecretConfig {
                gemini: Some(GeminiSecret { api_key }),
            });
        }

        self.load_from_file().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service_in(dir: &TempDir) -> SecretServiceImpl {
        SecretServiceImpl::new(UnimindPaths::new(Some(dir.path()))).file_only()
    }

    #[tokio::test]
    async fn test_missing_file_yields_no_key() {
        let dir = TempDir::new().unwrap();
        let secrets = service_in(&dir).load_secrets().await.unwrap();
        assert_eq!(secrets.gemini_api_key(), None);
    }

    #[tokio::test]
    async fn test_reads_key_from_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("secret.json"),
            r#"{ "gemini": { "api_key": "file-key" } }"#,
        )
        .unwrap();

        let secrets = service_in(&dir).load_secrets().await.unwrap();
        assert_eq!(secrets.gemini_api_key(), Some("file-key"));
    }

    #[tokio::test]
    async fn test_malformed_file_is_error_without_secret() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("secret.json"), "{ \"gemini\": ").unwrap();

        let err = service_in(&dir).load_secrets().await.unwrap_err();
        assert!(err.contains("Failed to parse"));
    }

    #[tokio::test]
    async fn test_edits_are_picked_up_between_calls() {
        let dir = TempDir::new().unwrap();
        let service = service_in(&dir);
        let path = dir.path().join("secret.json");

        std::fs::write(&path, r#"{ "gemini": { "api_key": "old" } }"#).unwrap();
        assert_eq!(service.load_secrets().await.unwrap().gemini_api_key(), Some("old"));

        std::fs::write(&path, r#"{ "gemini": { "api_key": "rotated" } }"#).unwrap();
        assert_eq!(
            service.load_secrets().await.unwrap().gemini_api_key(),
            Some("rotated")
        );
    }
}
