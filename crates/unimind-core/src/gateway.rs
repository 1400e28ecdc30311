//! AI request gateway interface.
//!
//! The gateway is the only component that talks to the generative-AI
//! backend. All of its operations are infallible from the caller's point of
//! view: transport, credential and backend failures are logged and replaced
//! by a fixed, operation-specific fallback text. Callers therefore treat the
//! returned string as a normal assistant reply.

use async_trait::async_trait;

use crate::content::ContentPart;

/// Fallback texts returned by one gateway operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fallbacks {
    /// Returned when the request failed (transport, auth, backend).
    pub error: &'static str,
    /// Returned when the request succeeded but carried no text.
    pub empty: &'static str,
}

pub const CONVERSE_FALLBACKS: Fallbacks = Fallbacks {
    error: "An error occurred while trying to get a response. Please check your API key and network connection.",
    empty: "I'm sorry, I couldn't generate a response. Please try again.",
};

pub const ANALYZE_FALLBACKS: Fallbacks = Fallbacks {
    error: "An error occurred while analyzing the files. Please check the file formats and try again.",
    empty: "I'm sorry, I couldn't analyze the files. Please try again.",
};

pub const SEARCH_FALLBACKS: Fallbacks = Fallbacks {
    error: "An error occurred during the search. Please check your connection and try again.",
    empty: "Sorry, I couldn't find an answer for that. Please try rephrasing your question.",
};

/// Gateway to the generative-AI backend.
///
/// The three operations share no in-memory state beyond configuration and
/// may be called independently and concurrently.
#[async_trait]
pub trait AiGateway: Send + Sync {
    /// One conversational turn under the assistant persona.
    async fn converse(&self, prompt: &str) -> String;

    /// Multi-part analysis of uploaded material. The implementation prepends
    /// the fixed analysis instruction ahead of `parts`.
    async fn analyze(&self, parts: Vec<ContentPart>) -> String;

    /// Single-shot search with the concise direct-answer instruction.
    async fn search(&self, prompt: &str) -> String;
}
