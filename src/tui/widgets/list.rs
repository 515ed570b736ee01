use crossterm::event::KeyCode;

use crate::tui::{Element, Theme};

/// Something a list can display
pub trait ListItem {
    fn to_element<Msg>(&self, is_selected: bool, theme: &Theme) -> Element<Msg>;
}

/// Selection and scroll position of a list, owned by the page state
#[derive(Debug, Clone)]
pub struct ListState {
    selected: Option<usize>,
    scroll_offset: usize,
    scroll_off: usize, // rows kept visible around the selection
    wrap_around: bool,
}

impl Default for ListState {
    fn default() -> Self {
        Self::new()
    }
}

const DEFAULT_VIEWPORT: usize = 10;

impl ListState {
    pub fn new() -> Self {
        Self {
            selected: None,
            scroll_offset: 0,
            scroll_off: 2,
            wrap_around: true,
        }
    }

    pub fn with_selection() -> Self {
        Self {
            selected: Some(0),
            ..Self::new()
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index;
    }

    /// Keep the selection valid after the items changed
    pub fn clamp(&mut self, item_count: usize) {
        self.selected = match (self.selected, item_count) {
            (_, 0) => None,
            (Some(sel), n) if sel >= n => Some(n - 1),
            (None, _) => Some(0),
            (sel, _) => sel,
        };
        self.scroll_offset = self.scroll_offset.min(item_count.saturating_sub(1));
    }

    /// Handle a navigation key; returns true if it moved the selection
    pub fn handle_key(&mut self, key: KeyCode, item_count: usize) -> bool {
        if item_count == 0 {
            return false;
        }
        let height = DEFAULT_VIEWPORT;

        let next = match (key, self.selected) {
            (KeyCode::Up, Some(0)) if self.wrap_around => item_count - 1,
            (KeyCode::Up, Some(sel)) => sel.saturating_sub(1),
            (KeyCode::Down, Some(sel)) if sel + 1 >= item_count => {
                if self.wrap_around {
                    0
                } else {
                    sel
                }
            }
            (KeyCode::Down, Some(sel)) => sel + 1,
            (KeyCode::PageUp, Some(sel)) => sel.saturating_sub(height),
            (KeyCode::PageDown, Some(sel)) => (sel + height).min(item_count - 1),
            (KeyCode::Home, _) => 0,
            (KeyCode::End, _) => item_count - 1,
            (KeyCode::Up | KeyCode::Down | KeyCode::PageUp | KeyCode::PageDown, None) => 0,
            _ => return false,
        };

        self.selected = Some(next);
        self.update_scroll(height, item_count);
        true
    }

    /// Keep the selection inside the visible window
    pub fn update_scroll(&mut self, visible_height: usize, item_count: usize) {
        if let Some(sel) = self.selected {
            let min_scroll = sel.saturating_sub(visible_height.saturating_sub(self.scroll_off + 1));
            let max_scroll = sel.saturating_sub(self.scroll_off);

            if self.scroll_offset < min_scroll {
                self.scroll_offset = min_scroll;
            } else if self.scroll_offset > max_scroll {
                self.scroll_offset = max_scroll;
            }

            let max_offset = item_count.saturating_sub(visible_height);
            self.scroll_offset = self.scroll_offset.min(max_offset);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_wraps() {
        let mut state = ListState::new();
        assert!(state.handle_key(KeyCode::Down, 3));
        assert_eq!(state.selected(), Some(0));

        state.handle_key(KeyCode::Up, 3);
        assert_eq!(state.selected(), Some(2));
        state.handle_key(KeyCode::Down, 3);
        assert_eq!(state.selected(), Some(0));

        assert!(!state.handle_key(KeyCode::Char('x'), 3));
        assert!(!state.handle_key(KeyCode::Down, 0));
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut state = ListState::new();
        state.select(Some(4));
        state.clamp(2);
        assert_eq!(state.selected(), Some(1));
        state.clamp(0);
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_scroll_follows_selection() {
        let mut state = ListState::with_selection();
        state.handle_key(KeyCode::End, 50);
        assert_eq!(state.selected(), Some(49));
        assert_eq!(state.scroll_offset(), 40);
    }
}
