use ratatui::layout::Rect;

/// Click targets registered while rendering, checked on mouse input
pub struct InteractionRegistry<Msg> {
    click_handlers: Vec<(Rect, Msg)>,
}

impl<Msg: Clone> Default for InteractionRegistry<Msg> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Msg: Clone> InteractionRegistry<Msg> {
    pub fn new() -> Self {
        Self {
            click_handlers: Vec::new(),
        }
    }

    pub fn register_click(&mut self, rect: Rect, msg: Msg) {
        self.click_handlers.push((rect, msg));
    }

    /// Topmost handler under the point
    pub fn find_click(&self, x: u16, y: u16) -> Option<Msg> {
        self.click_handlers
            .iter()
            .rev()
            .find(|(rect, _)| point_in_rect(x, y, *rect))
            .map(|(_, msg)| msg.clone())
    }

    pub fn clear(&mut self) {
        self.click_handlers.clear();
    }
}

pub(crate) fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}
