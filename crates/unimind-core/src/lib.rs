//! Domain layer for the UniMind study assistant.
//!
//! Everything here is independent of transport and storage: the AI gateway,
//! navigation target and identity backend are traits implemented by the
//! outer crates.

pub mod chat;
pub mod config;
pub mod content;
pub mod error;
pub mod gateway;
pub mod identity;
pub mod navigation;
pub mod prompts;
pub mod secret;
pub mod upload;

// Re-export common error type
pub use error::UnimindError;
