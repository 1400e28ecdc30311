//! Current-page state shared between the core and the front end.

use std::sync::{PoisonError, RwLock};

use unimind_core::navigation::{Navigator, Page};

/// Holds the page the front end should display.
///
/// Implements `Navigator`, so the conversation orchestrator can move the
/// user back to the dashboard after an analysis.
#[derive(Debug, Default)]
pub struct PageState {
    current: RwLock<Page>,
}

impl PageState {
    pub fn new(initial: Page) -> Self {
        Self {
            current: RwLock::new(initial),
        }
    }

    pub fn current(&self) -> Page {
        *self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Navigates by sidebar label. Unknown labels go to the dashboard.
    pub fn navigate_to_menu(&self, label: &str) -> Page {
        let page = Page::from_menu_label(label);
        self.navigate(page);
        page
    }
}

impl Navigator for PageState {
    fn navigate(&self, page: Page) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = page;
        tracing::debug!(%page, "Navigated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_dashboard() {
        assert_eq!(PageState::default().current(), Page::Dashboard);
    }

    #[test]
    fn test_menu_navigation() {
        let pages = PageState::default();
        assert_eq!(pages.navigate_to_menu("Viva Mode"), Page::VivaMode);
        assert_eq!(pages.current(), Page::VivaMode);

        assert_eq!(pages.navigate_to_menu("Settings"), Page::Dashboard);
        assert_eq!(pages.current(), Page::Dashboard);
    }
}
