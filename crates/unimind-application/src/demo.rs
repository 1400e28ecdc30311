//! Demo conversation shown to first-time users.

use unimind_core::chat::Message;

/// Returns the seeded recursion exchange.
///
/// The assistant turn carries suggestion chips, so shortcuts and chips are
/// available right away.
pub fn demo_history() -> Vec<Message> {
    vec![
        Message::user(
            "msg-1",
            "Can you help me understand the concept of 'Recursion' in Python with an example?",
        ),
        Message::assistant(
            "msg-2",
            "Absolutely! Recursion is when a function calls itself to solve a problem. Here's a simple Python example for calculating a factorial:\n\n```python\ndef factorial(n):\n    if n == 1:\n        return 1\n    else:\n        return n * factorial(n-1)\n\nprint(factorial(5)) # Output: 120\n```\nWould you like me to explain the base case and recursive step in more detail?",
        )
        .with_suggestions([
            "Explain Base Case",
            "Show another example",
            "Practice Recursion MCQs",
        ]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_ends_with_suggestions() {
        let history = demo_history();
        assert_eq!(history.len(), 2);
        let last = &history[1];
        assert!(last.is_from_assistant());
        assert_eq!(last.suggestions.as_ref().map(Vec::len), Some(3));
    }
}
