//! Conversation domain module.
//!
//! # Module Structure
//!
//! - `message`: chat messages and senders
//! - `shortcut`: feature shortcut catalog
//! - `orchestrator`: the conversation state machine

mod message;
mod orchestrator;
mod shortcut;

pub use message::{Message, Sender};
pub use orchestrator::{
    ConversationOrchestrator, IgnoreReason, ShortcutOutcome, SubmitOutcome, count_by_sender,
};
pub use shortcut::{FeatureShortcut, ShortcutKind, default_shortcuts};
