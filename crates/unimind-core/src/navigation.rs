//! Page navigation requests.
//!
//! The core never renders anything; it only tells the surrounding
//! application which page should be shown next.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pages of the assistant front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Page {
    /// The conversation view.
    #[default]
    Dashboard,
    UploadNotes,
    McqGenerator,
    VivaMode,
    CodeAssistant,
    StudyPlanner,
    Profile,
}

impl Page {
    pub const ALL: [Page; 7] = [
        Page::Dashboard,
        Page::UploadNotes,
        Page::McqGenerator,
        Page::VivaMode,
        Page::CodeAssistant,
        Page::StudyPlanner,
        Page::Profile,
    ];

    /// Maps a sidebar / shortcut label to a page.
    ///
    /// Unknown labels fall back to the dashboard.
    pub fn from_menu_label(label: &str) -> Self {
        match label {
            "Dashboard" => Page::Dashboard,
            "Upload Notes" => Page::UploadNotes,
            "MCQ Generator" => Page::McqGenerator,
            "Viva Mode" => Page::VivaMode,
            "Code Assistant" => Page::CodeAssistant,
            "Study Planner" => Page::StudyPlanner,
            "Profile" => Page::Profile,
            _ => Page::Dashboard,
        }
    }

    pub fn menu_label(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::UploadNotes => "Upload Notes",
            Page::McqGenerator => "MCQ Generator",
            Page::VivaMode => "Viva Mode",
            Page::CodeAssistant => "Code Assistant",
            Page::StudyPlanner => "Study Planner",
            Page::Profile => "Profile",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.menu_label())
    }
}

/// Receives page-change requests from the core.
pub trait Navigator: Send + Sync {
    fn navigate(&self, page: Page);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_labels_round_trip() {
        for page in Page::ALL {
            assert_eq!(Page::from_menu_label(page.menu_label()), page);
        }
    }

    #[test]
    fn test_unknown_label_falls_back_to_dashboard() {
        assert_eq!(Page::from_menu_label("Settings"), Page::Dashboard);
    }
}
