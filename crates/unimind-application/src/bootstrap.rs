//! Application bootstrap.
//!
//! Resolves paths, loads configuration and assembles a `StudyAssistant`
//! backed by the Gemini gateway and file/env secrets.

use std::sync::Arc;

use anyhow::{Context, Result};
use unimind_core::config::AppConfig;
use unimind_core::identity::GuestIdentityService;
use unimind_infrastructure::{ConfigService, SecretServiceImpl, UnimindPaths};
use unimind_interaction::GeminiGateway;

use crate::demo::demo_history;
use crate::study_assistant::StudyAssistant;

/// Loads `config.toml`, falling back to defaults when it is absent.
pub async fn load_config(paths: &UnimindPaths) -> Result<AppConfig> {
    ConfigService::new(paths.clone())
        .get_config()
        .await
        .context("Failed to load configuration")
}

/// Everything a front end needs to run.
pub struct AppContext {
    pub paths: UnimindPaths,
    pub config: AppConfig,
    pub assistant: StudyAssistant,
}

impl AppContext {
    /// Wires the production components.
    ///
    /// The conversation starts with the demo exchange and the guest
    /// identity.
    pub fn new(paths: UnimindPaths, config: AppConfig) -> Result<Self> {
        let secrets = Arc::new(SecretServiceImpl::new(paths.clone()));
        let gateway = GeminiGateway::new(&config.gemini, secrets)
            .context("Failed to initialize the Gemini gateway")?;
        tracing::debug!(model = gateway.model(), "Gateway ready");

        let assistant = StudyAssistant::builder(
            Arc::new(gateway),
            Arc::new(GuestIdentityService::default()),
        )
        .with_history(demo_history())
        .build();

        Ok(Self {
            paths,
            config,
            assistant,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use unimind_core::navigation::Page;

    #[tokio::test]
    async fn test_context_from_empty_config_dir() {
        let dir = TempDir::new().unwrap();
        let paths = UnimindPaths::new(Some(dir.path()));

        let config = load_config(&paths).await.unwrap();
        let context = AppContext::new(paths, config).unwrap();

        assert_eq!(context.config, AppConfig::default());
        assert_eq!(context.assistant.conversation().len().await, 2);
        assert_eq!(context.assistant.current_page(), Page::Dashboard);
    }

    #[tokio::test]
    async fn test_malformed_config_fails_to_load() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.toml"), "log_level = [").unwrap();

        let result = load_config(&UnimindPaths::new(Some(dir.path()))).await;
        assert!(result.is_err());
    }
}
