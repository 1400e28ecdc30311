//! Conversation orchestration.
//!
//! `ConversationOrchestrator` owns the message log and sequences every
//! send/receive cycle. A send is a two-phase append: the user turn is
//! committed immediately, the gateway is awaited with no lock held, and the
//! assistant turn is committed once the reply arrives. A single in-flight
//! flag guarantees that at most one gateway call is outstanding, so replies
//! are never interleaved with a later user turn.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::message::{Message, Sender};
use super::shortcut::{FeatureShortcut, ShortcutKind, default_shortcuts};
use crate::error::{Result, UnimindError};
use crate::gateway::AiGateway;
use crate::navigation::{Navigator, Page};
use crate::upload::AnalysisSink;

/// Why a submission did not start a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Input was empty or whitespace-only.
    EmptyInput,
    /// A reply is already being awaited.
    Busy,
}

/// Result of submitting text to the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing was appended.
    Ignored(IgnoreReason),
    /// Both turns were appended.
    Replied {
        /// The user turn that was committed first.
        user: Message,
        /// The assistant turn appended after the gateway resolved.
        reply: Message,
    },
}

impl SubmitOutcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored(_))
    }

    /// The assistant reply, if a turn was completed.
    pub fn reply(&self) -> Option<&Message> {
        match self {
            Self::Replied { reply, .. } => Some(reply),
            Self::Ignored(_) => None,
        }
    }
}

/// Result of activating a feature shortcut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortcutOutcome {
    /// A page change was requested; the log is unchanged.
    Navigated(Page),
    /// The shortcut's feature name was submitted as a suggestion.
    Prompted(SubmitOutcome),
}

/// Clears the in-flight flag when the turn finishes, even on early return.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Owns the conversation log and the awaiting-response flag.
///
/// All operations take `&self`; share the orchestrator behind an `Arc`.
pub struct ConversationOrchestrator {
    /// Append-only message log
    messages: RwLock<Vec<Message>>,
    /// True while a gateway reply is outstanding
    awaiting: AtomicBool,
    /// Counter backing message ids
    next_id: AtomicU64,
    shortcuts: Vec<FeatureShortcut>,
    gateway: Arc<dyn AiGateway>,
    navigator: Arc<dyn Navigator>,
}

impl ConversationOrchestrator {
    /// Creates an orchestrator with an empty log and the default shortcuts.
    pub fn new(gateway: Arc<dyn AiGateway>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            messages: RwLock::new(Vec::new()),
            awaiting: AtomicBool::new(false),
            next_id: AtomicU64::new(0),
            shortcuts: default_shortcuts(),
            gateway,
            navigator,
        }
    }

    /// Seeds the log with existing turns (e.g. a welcome exchange).
    ///
    /// New message ids continue after the seeded ones.
    pub fn with_history(mut self, history: Vec<Message>) -> Self {
        self.next_id = AtomicU64::new(history.len() as u64);
        self.messages = RwLock::new(history);
        self
    }

    /// Replaces the shortcut catalog.
    pub fn with_shortcuts(mut self, shortcuts: Vec<FeatureShortcut>) -> Self {
        self.shortcuts = shortcuts;
        self
    }

    /// Returns a snapshot of the log.
    pub async fn messages(&self) -> Vec<Message> {
        self.messages.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.messages.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.messages.read().await.is_empty()
    }

    /// True while a reply is being awaited.
    pub fn is_awaiting(&self) -> bool {
        self.awaiting.load(Ordering::Acquire)
    }

    pub fn shortcuts(&self) -> &[FeatureShortcut] {
        &self.shortcuts
    }

    /// Shortcuts are offered only after an assistant reply and while idle.
    pub async fn shortcuts_available(&self) -> bool {
        if self.is_awaiting() {
            return false;
        }
        self.messages
            .read()
            .await
            .last()
            .is_some_and(Message::is_from_assistant)
    }

    /// Sends typed text as a user turn and appends the assistant reply.
    ///
    /// No-op for blank input or while another reply is outstanding.
    pub async fn submit_user_text(&self, text: &str) -> SubmitOutcome {
        self.run_turn(text).await
    }

    /// Sends a suggestion chip's text. Same pipeline as typed input.
    pub async fn submit_suggestion(&self, text: &str) -> SubmitOutcome {
        self.run_turn(text).await
    }

    /// Activates a feature shortcut by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no shortcut has the given id.
    pub async fn submit_feature_shortcut(&self, shortcut_id: &str) -> Result<ShortcutOutcome> {
        let shortcut = self
            .shortcuts
            .iter()
            .find(|s| s.id == shortcut_id)
            .ok_or_else(|| UnimindError::not_found("shortcut", shortcut_id))?;

        match shortcut.kind {
            ShortcutKind::Navigate(page) => {
                tracing::debug!(shortcut = %shortcut.id, %page, "Shortcut requested navigation");
                self.navigator.navigate(page);
                Ok(ShortcutOutcome::Navigated(page))
            }
            ShortcutKind::Prompt => {
                let prompt = shortcut.feature.clone();
                Ok(ShortcutOutcome::Prompted(self.submit_suggestion(&prompt).await))
            }
        }
    }

    /// Records a finished file analysis as a user/assistant exchange and
    /// requests navigation back to the conversation.
    pub async fn complete_file_analysis(&self, analysis_text: String, file_names: &[String]) {
        let user = Message::user(
            self.next_message_id(),
            format!(
                "I've uploaded the following files for analysis: **{}**",
                file_names.join(", ")
            ),
        );
        let reply = Message::assistant(self.next_message_id(), analysis_text);

        {
            let mut messages = self.messages.write().await;
            messages.push(user);
            messages.push(reply);
        }

        tracing::debug!(files = file_names.len(), "Appended file analysis to conversation");
        self.navigator.navigate(Page::Dashboard);
    }

    async fn run_turn(&self, text: &str) -> SubmitOutcome {
        if text.trim().is_empty() {
            return SubmitOutcome::Ignored(IgnoreReason::EmptyInput);
        }

        let Some(in_flight) = self.begin_turn() else {
            tracing::debug!("Submission ignored: reply already in flight");
            return SubmitOutcome::Ignored(IgnoreReason::Busy);
        };

        // Phase 1: commit the user turn before the request goes out.
        let user = Message::user(self.next_message_id(), text);
        self.messages.write().await.push(user.clone());

        let response = self.gateway.converse(text).await;

        // Phase 2: commit the reply after its own completion.
        let reply = Message::assistant(self.next_message_id(), response);
        self.messages.write().await.push(reply.clone());
        drop(in_flight);

        SubmitOutcome::Replied { user, reply }
    }

    fn begin_turn(&self) -> Option<InFlight<'_>> {
        self.awaiting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(&self.awaiting))
    }

    fn next_message_id(&self) -> String {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        format!("msg-{n}")
    }
}

#[async_trait]
impl AnalysisSink for ConversationOrchestrator {
    async fn complete_file_analysis(&self, analysis_text: String, file_names: Vec<String>) {
        ConversationOrchestrator::complete_file_analysis(self, analysis_text, &file_names).await;
    }
}

/// Counts messages by sender; handy for front ends that show stats.
pub fn count_by_sender(messages: &[Message], sender: Sender) -> usize {
    messages.iter().filter(|m| m.sender == sender).count()
}
