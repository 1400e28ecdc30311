//! Application layer for UniMind.
//!
//! Wires the conversation, upload and gateway components into a single
//! `StudyAssistant` and provides the use cases front ends call.

pub mod bootstrap;
pub mod demo;
pub mod page_state;
pub mod study_assistant;

pub use bootstrap::AppContext;
pub use page_state::PageState;
pub use study_assistant::{SearchResult, StudyAssistant, StudyAssistantBuilder};
