use crossterm::event::KeyEvent;
use ratatui::layout::Rect;

use super::interaction_registry::point_in_rect;
use crate::tui::command::DispatchTarget;
use crate::tui::element::FocusId;

/// A focusable widget as laid out by the last render
pub struct FocusableInfo<Msg> {
    pub id: FocusId,
    pub rect: Rect,
    pub on_key: Box<dyn Fn(KeyEvent) -> DispatchTarget<Msg> + Send>,
    pub inside_panel: bool,
}

/// Focusable widgets in render order, which is also Tab order
pub struct FocusRegistry<Msg> {
    focusables: Vec<FocusableInfo<Msg>>,
}

impl<Msg> Default for FocusRegistry<Msg> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Msg> FocusRegistry<Msg> {
    pub fn new() -> Self {
        Self {
            focusables: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.focusables.clear();
    }

    pub fn register_focusable(&mut self, info: FocusableInfo<Msg>) {
        if self.focusables.iter().any(|f| f.id == info.id) {
            log::warn!("Duplicate FocusId {:?}; last registration wins", info.id);
            self.focusables.retain(|f| f.id != info.id);
        }
        self.focusables.push(info);
    }

    pub fn find(&self, id: &FocusId) -> Option<&FocusableInfo<Msg>> {
        self.focusables.iter().find(|f| &f.id == id)
    }

    pub fn contains(&self, id: &FocusId) -> bool {
        self.find(id).is_some()
    }

    pub fn ids(&self) -> Vec<FocusId> {
        self.focusables.iter().map(|f| f.id.clone()).collect()
    }

    pub fn find_at_position(&self, x: u16, y: u16) -> Option<FocusId> {
        self.focusables
            .iter()
            .rev()
            .find(|f| point_in_rect(x, y, f.rect))
            .map(|f| f.id.clone())
    }

    pub fn next_focus(&self, current: Option<&FocusId>) -> Option<FocusId> {
        let len = self.focusables.len();
        if len == 0 {
            return None;
        }
        let index = match current.and_then(|id| self.focusables.iter().position(|f| &f.id == id)) {
            Some(i) => (i + 1) % len,
            None => 0,
        };
        Some(self.focusables[index].id.clone())
    }

    pub fn prev_focus(&self, current: Option<&FocusId>) -> Option<FocusId> {
        let len = self.focusables.len();
        if len == 0 {
            return None;
        }
        let index = match current.and_then(|id| self.focusables.iter().position(|f| &f.id == id)) {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        Some(self.focusables[index].id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(id: &'static str) -> FocusableInfo<()> {
        FocusableInfo {
            id: FocusId(id),
            rect: Rect::new(0, 0, 10, 1),
            on_key: Box::new(|_| DispatchTarget::PassThrough),
            inside_panel: false,
        }
    }

    #[test]
    fn test_tab_order_wraps() {
        let mut registry = FocusRegistry::new();
        registry.register_focusable(info("a"));
        registry.register_focusable(info("b"));

        assert_eq!(registry.next_focus(None), Some(FocusId("a")));
        assert_eq!(registry.next_focus(Some(&FocusId("b"))), Some(FocusId("a")));
        assert_eq!(registry.prev_focus(Some(&FocusId("a"))), Some(FocusId("b")));
        assert_eq!(registry.prev_focus(None), Some(FocusId("b")));
    }

    #[test]
    fn test_duplicate_id_replaces_previous() {
        let mut registry = FocusRegistry::new();
        registry.register_focusable(info("a"));
        registry.register_focusable(info("a"));
        assert_eq!(registry.ids(), vec![FocusId("a")]);
    }
}
