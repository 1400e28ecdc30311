//! Feature shortcut models.
//!
//! Feature shortcuts are the quick buttons shown under the conversation once
//! the assistant has replied. A shortcut either opens another page or sends
//! its feature name as a prompt.

use serde::{Deserialize, Serialize};

use crate::navigation::Page;

/// What activating a shortcut does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "page", rename_all = "camelCase")]
pub enum ShortcutKind {
    /// Request a page change; no message is sent.
    Navigate(Page),
    /// Send the shortcut's feature name as a suggestion prompt.
    Prompt,
}

/// A single feature shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureShortcut {
    /// Stable identifier used to activate the shortcut.
    pub id: String,
    /// Display label (with icon).
    pub label: String,
    /// Feature name. Used as the prompt text for prompt shortcuts.
    pub feature: String,
    pub kind: ShortcutKind,
}

impl FeatureShortcut {
    pub fn navigate(id: &str, label: &str, feature: &str, page: Page) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            feature: feature.to_string(),
            kind: ShortcutKind::Navigate(page),
        }
    }

    pub fn prompt(id: &str, label: &str, feature: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            feature: feature.to_string(),
            kind: ShortcutKind::Prompt,
        }
    }
}

/// The default shortcut catalog, in display order.
pub fn default_shortcuts() -> Vec<FeatureShortcut> {
    vec![
        FeatureShortcut::navigate("upload-notes", "📄 Upload Notes", "Upload Notes", Page::UploadNotes),
        FeatureShortcut::navigate("mcq-generator", "📝 Generate MCQs", "MCQ Generator", Page::McqGenerator),
        FeatureShortcut::navigate("viva-mode", "🎤 Viva Mode", "Viva Mode", Page::VivaMode),
        FeatureShortcut::prompt("simplify-concept", "📚 Simplify Concept", "Simplify Concept"),
        FeatureShortcut::prompt("fix-my-code", "💻 Fix My Code", "Fix My Code"),
        FeatureShortcut::navigate("study-planner", "📅 Make Study Plan", "Study Planner", Page::StudyPlanner),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let shortcuts = default_shortcuts();
        assert_eq!(shortcuts.len(), 6);

        let prompts: Vec<_> = shortcuts
            .iter()
            .filter(|s| s.kind == ShortcutKind::Prompt)
            .map(|s| s.feature.as_str())
            .collect();
        assert_eq!(prompts, vec!["Simplify Concept", "Fix My Code"]);
    }

    #[test]
    fn test_navigate_targets_match_menu_labels() {
        for shortcut in default_shortcuts() {
            if let ShortcutKind::Navigate(page) = shortcut.kind {
                assert_eq!(Page::from_menu_label(&shortcut.feature), page);
            }
        }
    }
}
