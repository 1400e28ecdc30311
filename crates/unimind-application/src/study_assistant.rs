//! StudyAssistant - the use-case facade front ends talk to.
//!
//! Owns one conversation, one upload session and the current page, all
//! sharing a single gateway. Smart search goes straight to the gateway and
//! never touches the conversation log.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use unimind_core::UnimindError;
use unimind_core::chat::{ConversationOrchestrator, Message};
use unimind_core::error::Result;
use unimind_core::gateway::AiGateway;
use unimind_core::identity::{IdentityService, UserProfile};
use unimind_core::navigation::Page;
use unimind_core::upload::{
    ProgressSource, RawFile, SimulatedProgress, UploadId, UploadSessionManager,
};

use crate::page_state::PageState;

/// Answer to a smart-search query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub query: String,
    pub answer: String,
}

/// Builder for `StudyAssistant`.
pub struct StudyAssistantBuilder {
    gateway: Arc<dyn AiGateway>,
    identity: Arc<dyn IdentityService>,
    progress: Arc<dyn ProgressSource>,
    history: Vec<Message>,
}

impl StudyAssistantBuilder {
    /// Replaces the default simulated upload progress.
    pub fn with_progress(mut self, progress: Arc<dyn ProgressSource>) -> Self {
        self.progress = progress;
        self
    }

    /// Seeds the conversation log.
    pub fn with_history(mut self, history: Vec<Message>) -> Self {
        self.history = history;
        self
    }

    pub fn build(self) -> StudyAssistant {
        let pages = Arc::new(PageState::default());
        let conversation = Arc::new(
            ConversationOrchestrator::new(self.gateway.clone(), pages.clone())
                .with_history(self.history),
        );
        let uploads =
            UploadSessionManager::new(self.progress, self.gateway.clone(), conversation.clone());

        StudyAssistant {
            gateway: self.gateway,
            identity: self.identity,
            pages,
            conversation,
            uploads,
            current_user: RwLock::new(None),
        }
    }
}

pub struct StudyAssistant {
    gateway: Arc<dyn AiGateway>,
    identity: Arc<dyn IdentityService>,
    pages: Arc<PageState>,
    conversation: Arc<ConversationOrchestrator>,
    uploads: UploadSessionManager,
    /// Profile restored from the identity backend
    current_user: RwLock<Option<UserProfile>>,
}

impl StudyAssistant {
    pub fn builder(
        gateway: Arc<dyn AiGateway>,
        identity: Arc<dyn IdentityService>,
    ) -> StudyAssistantBuilder {
        StudyAssistantBuilder {
            gateway,
            identity,
            progress: Arc::new(SimulatedProgress::default()),
            history: Vec::new(),
        }
    }

    pub fn conversation(&self) -> &ConversationOrchestrator {
        &self.conversation
    }

    pub fn uploads(&self) -> &UploadSessionManager {
        &self.uploads
    }

    pub fn current_page(&self) -> Page {
        self.pages.current()
    }

    /// Navigates by sidebar label; unknown labels go to the dashboard.
    pub fn navigate_to_menu(&self, label: &str) -> Page {
        self.pages.navigate_to_menu(label)
    }

    /// Loads the signed-in user's profile from the identity backend.
    ///
    /// Returns `None` when there is no session or the profile is missing.
    pub async fn restore_session(&self) -> Result<Option<UserProfile>> {
        let profile = match self.identity.current_session().await? {
            Some(session) => self.identity.get_profile(&session.user_id).await?,
            None => None,
        };

        match &profile {
            Some(p) => tracing::info!("Restored session for {}", p.id),
            None => tracing::debug!("No active session"),
        }

        *self.current_user.write().await = profile.clone();
        Ok(profile)
    }

    pub async fn current_user(&self) -> Option<UserProfile> {
        self.current_user.read().await.clone()
    }

    /// Answers a one-off question without touching the conversation.
    ///
    /// Blank queries return `None` and make no gateway call.
    pub async fn smart_search(&self, query: &str) -> Option<SearchResult> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        let answer = self.gateway.search(query).await;
        Some(SearchResult {
            query: query.to_string(),
            answer,
        })
    }

    /// Adds files from disk to the upload session.
    ///
    /// Every path is inspected before any is added, so one bad path leaves
    /// the session unchanged.
    ///
    /// # Errors
    ///
    /// Returns `UnimindError::Io` naming the first path that could not be
    /// read.
    pub async fn upload_paths(&self, paths: &[PathBuf]) -> Result<Vec<UploadId>> {
        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            let file = RawFile::from_path(path).await.map_err(|e| {
                UnimindError::io(format!("Cannot upload {}: {}", path.display(), e))
            })?;
            files.push(file);
        }

        Ok(self.uploads.add_files(files).await)
    }
}
