//! Configuration service implementation.
//!
//! Loads `AppConfig` from `config.toml` in the UniMind config directory and
//! caches it. A missing file yields the defaults; a malformed one is an
//! error so typos are not silently ignored.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;
use unimind_core::UnimindError;
use unimind_core::config::AppConfig;
use unimind_core::error::Result;

use crate::paths::UnimindPaths;

/// Configuration service that loads and caches the app configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    paths: UnimindPaths,
    /// Cached configuration, filled on first access.
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    pub fn new(paths: UnimindPaths) -> Self {
        Self {
            paths,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading it from disk if not cached.
    pub async fn get_config(&self) -> Result<AppConfig> {
        if let Some(cached) = self.config.read().await.as_ref() {
            return Ok(cached.clone());
        }

        let loaded = self.load_config().await?;
        *self.config.write().await = Some(loaded.clone());
        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub async fn invalidate_cache(&self) {
        *self.config.write().await = None;
    }

    pub fn config_path(&self) -> Result<PathBuf> {
        self.paths
            .config_file()
            .map_err(|e| UnimindError::config(e.to_string()))
    }

    async fn load_config(&self) -> Result<AppConfig> {
        let path = self.config_path()?;

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No config file at {}, using defaults", path.display());
                return Ok(AppConfig::default());
            }
            Err(e) => return Err(e.into()),
        };

        toml::from_str(&content).map_err(|e| {
            UnimindError::config(format!("Invalid config file {}: {}", path.display(), e))
        })
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new(UnimindPaths::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use unimind_core::config::DEFAULT_GEMINI_MODEL;

    #[tokio::test]
    async fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let service = ConfigService::new(UnimindPaths::new(Some(dir.path())));

        let config = service.get_config().await.unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.gemini.model, DEFAULT_GEMINI_MODEL);
    }

    #[tokio::test]
    async fn test_reads_and_caches_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "log_level = \"debug\"\n\n[gemini]\nmodel = \"gemini-2.5-pro\"\ntimeout_secs = 5\n",
        )
        .unwrap();
        let service = ConfigService::new(UnimindPaths::new(Some(dir.path())));

        let config = service.get_config().await.unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.gemini.model, "gemini-2.5-pro");
        assert_eq!(config.gemini.timeout_secs, 5);

        std::fs::write(&path, "log_level = \"warn\"\n").unwrap();
        assert_eq!(service.get_config().await.unwrap().log_level, "debug");

        service.invalidate_cache().await;
        assert_eq!(service.get_config().await.unwrap().log_level, "warn");
    }

    #[tokio::test]
    async fn test_malformed_config_is_config_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.toml"), "[gemini\nmodel = 1").unwrap();
        let service = ConfigService::new(UnimindPaths::new(Some(dir.path())));

        let err = service.get_config().await.unwrap_err();
        assert!(err.is_config());
    }
}
