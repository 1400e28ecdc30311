//! Session and profile models of the identity backend.

use serde::{Deserialize, Serialize};

/// An authenticated session as reported by the identity backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub user_id: String,
    pub email: String,
}

/// User profile shown in the header and profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub university: String,
    pub degree: String,
    pub semester: String,
}

impl UserProfile {
    /// First name used for greetings; falls back to the full name.
    pub fn first_name(&self) -> &str {
        self.full_name
            .split_whitespace()
            .next()
            .unwrap_or(&self.full_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_name() {
        let profile = UserProfile {
            id: "u1".to_string(),
            full_name: "Ayesha Khan".to_string(),
            email: "ayesha@example.edu".to_string(),
            university: "NUST".to_string(),
            degree: "BSCS".to_string(),
            semester: "5".to_string(),
        };
        assert_eq!(profile.first_name(), "Ayesha");
    }
}
