//! Conversation message types.

use serde::{Deserialize, Serialize};

/// Who contributed a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// Message from the user.
    User,
    /// Message from the AI assistant.
    Assistant,
}

/// A single turn in the conversation log.
///
/// Messages are immutable once appended; the log only grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Identifier, unique within one orchestrator (`msg-<n>`).
    pub id: String,
    pub sender: Sender,
    /// Markdown body.
    pub text: String,
    /// Follow-up prompts offered as chips. Only assistant messages carry them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    /// Timestamp when the message was created (RFC 3339).
    pub timestamp: String,
}

impl Message {
    pub fn user(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sender: Sender::User,
            text: text.into(),
            suggestions: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn assistant(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sender: Sender::Assistant,
            text: text.into(),
            suggestions: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Attaches suggestion chips to an assistant message.
    ///
    /// User messages never carry suggestions, so this is a no-op for them.
    pub fn with_suggestions<I, S>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.sender == Sender::Assistant {
            self.suggestions = Some(suggestions.into_iter().map(Into::into).collect());
        }
        self
    }

    pub fn is_from_assistant(&self) -> bool {
        self.sender == Sender::Assistant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestions_only_on_assistant_messages() {
        let user = Message::user("msg-1", "hi").with_suggestions(["ignored"]);
        assert!(user.suggestions.is_none());

        let reply = Message::assistant("msg-2", "hello").with_suggestions(["Explain Base Case"]);
        assert_eq!(reply.suggestions, Some(vec!["Explain Base Case".to_string()]));
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        let json = serde_json::to_value(Message::user("msg-1", "hi")).unwrap();
        assert_eq!(json["sender"], "user");
        assert!(json.get("suggestions").is_none());
    }
}
