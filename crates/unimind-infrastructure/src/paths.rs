//! Unified path management for UniMind configuration files.
//!
//! Every file the application reads lives under one config directory. The
//! directory can be overridden with a base path, which tests use to stay
//! inside a temporary directory.

use std::path::{Path, PathBuf};

use unimind_core::config::{GeminiSecret, SecretConfig};

const APP_DIR: &str = "unimind";
const CONFIG_FILE: &str = "config.toml";
const SECRET_FILE: &str = "secret.json";

/// Errors that can occur during path resolution.
#[derive(Debug, thiserror::Error)]
pub enum PathError {
    /// Platform config directory could not be determined.
    #[error("Cannot find the platform config directory")]
    ConfigDirNotFound,
}

/// Path resolver for UniMind.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/unimind/           # Config directory (or the base override)
/// ├── config.toml              # Non-secret settings
/// └── secret.json              # API keys
/// ```
#[derive(Debug, Clone, Default)]
pub struct UnimindPaths {
    base: Option<PathBuf>,
}

impl UnimindPaths {
    /// Creates a resolver. `base` replaces the platform config directory.
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the UniMind config directory (e.g. `~/.config/unimind/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(CONFIG_FILE))
    }

    /// Returns the path to the secrets file.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600) to prevent
    /// unauthorized access.
    pub fn secret_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(SECRET_FILE))
    }

    /// Ensures the secret file exists, creating a template if it doesn't.
    ///
    /// On Unix the new file is restricted to mode 600.
    pub async fn ensure_secret_file(&self) -> std::io::Result<PathBuf> {
        let secret_path = self
            .secret_file()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()))?;

        if tokio::fs::try_exists(&secret_path).await? {
            return Ok(secret_path);
        }

        if let Some(parent) = secret_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let template = SecretConfig {
            gemini: Some(GeminiSecret {
                api_key: String::new(),
            }),
        };
        let json = serde_json::to_string_pretty(&template)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        tokio::fs::write(&secret_path, json).await?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            tokio::fs::set_permissions(&secret_path, permissions).await?;
        }

        tracing::info!("Created secret template at {}", secret_path.display());
        Ok(secret_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_base_override() {
        let dir = TempDir::new().unwrap();
        let paths = UnimindPaths::new(Some(dir.path()));
        assert_eq!(paths.config_dir().unwrap(), dir.path());
        assert_eq!(paths.config_file().unwrap(), dir.path().join("config.toml"));
        assert_eq!(paths.secret_file().unwrap(), dir.path().join("secret.json"));
    }

    #[test]
    fn test_default_dir_ends_with_app_name() {
        if let Ok(dir) = UnimindPaths::default().config_dir() {
            assert!(dir.ends_with("unimind"));
        }
    }

    #[tokio::test]
    async fn test_ensure_secret_file_creates_template_once() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested");
        let paths = UnimindPaths::new(Some(nested.as_path()));

        let path = paths.ensure_secret_file().await.unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: SecretConfig = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.gemini.unwrap().api_key, "");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }

        std::fs::write(&path, r#"{"gemini":{"api_key":"kept"}}"#).unwrap();
        paths.ensure_secret_file().await.unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("kept"));
    }
}
