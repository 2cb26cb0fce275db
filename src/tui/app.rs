//! TUI application state

use ratatui::widgets::ListState;

use crate::browser::{BrowseError, Browser};
use crate::provider::Provider;

/// Focusable pane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Namespaces,
    Classes,
    Properties,
}

impl Pane {
    fn next(self) -> Self {
        match self {
            Pane::Namespaces => Pane::Classes,
            Pane::Classes => Pane::Properties,
            Pane::Properties => Pane::Namespaces,
        }
    }

    fn previous(self) -> Self {
        match self {
            Pane::Namespaces => Pane::Properties,
            Pane::Classes => Pane::Namespaces,
            Pane::Properties => Pane::Classes,
        }
    }
}

/// Main application state
pub struct App<P: Provider> {
    pub browser: Browser<P>,
    pub focus: Pane,
    pub namespace_state: ListState,
    pub class_state: ListState,
    /// First property row shown
    pub property_offset: usize,
    /// Message of the open error popup
    pub error: Option<String>,
}

impl<P: Provider> App<P> {
    pub fn new(provider: P) -> Self {
        let mut app = Self {
            browser: Browser::new(provider),
            focus: Pane::Namespaces,
            namespace_state: ListState::default(),
            class_state: ListState::default(),
            property_offset: 0,
            error: None,
        };
        app.reload();
        app
    }

    /// Reload namespaces, dropping every selection
    pub fn reload(&mut self) {
        let result = self.browser.load_namespaces();
        self.namespace_state = first_row(self.browser.namespaces().len());
        self.class_state = ListState::default();
        self.property_offset = 0;
        self.report(result);
    }

    pub fn next_pane(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn previous_pane(&mut self) {
        self.focus = self.focus.previous();
    }

    pub fn move_up(&mut self) {
        match self.focus {
            Pane::Namespaces => step_up(&mut self.namespace_state),
            Pane::Classes => step_up(&mut self.class_state),
            Pane::Properties => self.property_offset = self.property_offset.saturating_sub(1),
        }
    }

    pub fn move_down(&mut self) {
        match self.focus {
            Pane::Namespaces => step_down(&mut self.namespace_state, self.browser.namespaces().len()),
            Pane::Classes => step_down(&mut self.class_state, self.browser.classes().len()),
            Pane::Properties => {
                if self.property_offset + 1 < self.browser.properties().len() {
                    self.property_offset += 1;
                }
            }
        }
    }

    pub fn move_to_top(&mut self) {
        match self.focus {
            Pane::Namespaces => self.namespace_state = first_row(self.browser.namespaces().len()),
            Pane::Classes => self.class_state = first_row(self.browser.classes().len()),
            Pane::Properties => self.property_offset = 0,
        }
    }

    /// Select the highlighted entry of the focused pane
    pub fn activate(&mut self) {
        match self.focus {
            Pane::Namespaces => {
                let Some(name) = highlighted(&self.namespace_state, self.browser.namespaces()) else {
                    return;
                };
                let result = self.browser.select_namespace(&name);
                self.class_state = first_row(self.browser.classes().len());
                self.property_offset = 0;
                if result.is_ok() && !self.browser.classes().is_empty() {
                    self.focus = Pane::Classes;
                }
                self.report(result);
            }
            Pane::Classes => {
                let Some(name) = highlighted(&self.class_state, self.browser.classes()) else {
                    return;
                };
                let result = self.browser.select_class(&name);
                self.property_offset = 0;
                self.report(result);
            }
            Pane::Properties => {}
        }
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    fn report(&mut self, result: Result<(), BrowseError>) {
        if let Err(e) = result {
            self.error = Some(e.message);
        }
    }
}

fn first_row(len: usize) -> ListState {
    ListState::default().with_selected(if len > 0 { Some(0) } else { None })
}

fn step_up(state: &mut ListState) {
    if let Some(i) = state.selected() {
        state.select(Some(i.saturating_sub(1)));
    }
}

fn step_down(state: &mut ListState, len: usize) {
    let next = match state.selected() {
        Some(i) if i + 1 < len => i + 1,
        Some(i) => i,
        None if len > 0 => 0,
        None => return,
    };
    state.select(Some(next));
}

fn highlighted(state: &ListState, items: &[String]) -> Option<String> {
    state.selected().and_then(|i| items.get(i)).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::mock::MockProvider;

    fn app() -> App<MockProvider> {
        App::new(MockProvider::demo())
    }

    #[test]
    fn test_starts_on_first_namespace() {
        let app = app();
        assert_eq!(app.focus, Pane::Namespaces);
        assert_eq!(app.namespace_state.selected(), Some(0));
        assert!(app.error.is_none());
    }

    #[test]
    fn test_pane_cycle() {
        let mut app = app();
        app.next_pane();
        assert_eq!(app.focus, Pane::Classes);
        app.next_pane();
        app.next_pane();
        assert_eq!(app.focus, Pane::Namespaces);
        app.previous_pane();
        assert_eq!(app.focus, Pane::Properties);
    }

    #[test]
    fn test_move_down_is_bounded() {
        let mut app = app();
        for _ in 0..10 {
            app.move_down();
        }
        assert_eq!(app.namespace_state.selected(), Some(2));
        app.move_to_top();
        assert_eq!(app.namespace_state.selected(), Some(0));
    }

    #[test]
    fn test_activate_namespace_then_class() {
        let mut app = app();
        app.activate();
        assert_eq!(app.browser.selected_namespace(), Some("cimv2"));
        assert_eq!(app.focus, Pane::Classes);
        assert_eq!(app.class_state.selected(), Some(0));

        app.activate();
        assert_eq!(app.browser.selected_class(), Some("Win32_BIOS"));
        assert_eq!(app.browser.properties().len(), 2);
    }

    #[test]
    fn test_activate_failing_namespace_shows_error() {
        let mut app = app();
        app.move_down();
        app.move_down();
        app.activate();
        assert_eq!(
            app.error.as_deref(),
            Some("Error loading classes for namespace SecurityCenter: Access denied")
        );
        assert_eq!(app.focus, Pane::Namespaces);
        app.dismiss_error();
        assert!(app.error.is_none());
    }

    #[test]
    fn test_moves_on_empty_pane_are_noops() {
        let mut app = app();
        app.focus = Pane::Classes;
        app.move_up();
        app.move_down();
        app.activate();
        assert_eq!(app.class_state.selected(), None);
        assert!(app.browser.selected_class().is_none());
    }

    #[test]
    fn test_property_scroll_bounded() {
        let mut app = app();
        app.activate();
        app.activate();
        app.focus = Pane::Properties;
        for _ in 0..5 {
            app.move_down();
        }
        assert_eq!(app.property_offset, 1);
        app.move_up();
        app.move_up();
        assert_eq!(app.property_offset, 0);
    }
}
