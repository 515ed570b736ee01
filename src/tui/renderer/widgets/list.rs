use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders},
};

use crate::tui::command::DispatchTarget;
use crate::tui::element::FocusId;
use crate::tui::renderer::{FocusRegistry, FocusableInfo, InteractionRegistry, Renderer};
use crate::tui::{Element, Theme};

/// Navigation keys go to `on_navigate`, Enter to `on_activate`
pub fn list_on_key<Msg: Clone + Send + 'static>(
    on_navigate: Option<fn(KeyCode) -> Msg>,
    on_activate: Option<Msg>,
) -> Box<dyn Fn(KeyEvent) -> DispatchTarget<Msg> + Send> {
    Box::new(move |key_event| match key_event.code {
        KeyCode::Up | KeyCode::Down | KeyCode::PageUp | KeyCode::PageDown | KeyCode::Home | KeyCode::End => {
            match on_navigate {
                Some(f) => DispatchTarget::AppMsg(f(key_event.code)),
                None => DispatchTarget::PassThrough,
            }
        }
        KeyCode::Enter => match &on_activate {
            Some(msg) => DispatchTarget::AppMsg(msg.clone()),
            None => DispatchTarget::PassThrough,
        },
        _ => DispatchTarget::PassThrough,
    })
}

/// First visible row, adjusted so the selection stays on screen
fn visible_start(selected: Option<usize>, scroll_offset: usize, visible_height: usize, item_count: usize) -> usize {
    let mut start = scroll_offset.min(item_count.saturating_sub(visible_height));
    if let Some(sel) = selected {
        if sel < start {
            start = sel;
        } else if visible_height > 0 && sel >= start + visible_height {
            start = sel + 1 - visible_height;
        }
    }
    start
}

#[allow(clippy::too_many_arguments)]
pub fn render_list<Msg: Clone + Send + 'static>(
    frame: &mut Frame,
    theme: &Theme,
    registry: &mut InteractionRegistry<Msg>,
    focus_registry: &mut FocusRegistry<Msg>,
    focused_id: Option<&FocusId>,
    id: &FocusId,
    items: &[Element<Msg>],
    selected: Option<usize>,
    scroll_offset: usize,
    on_select: &Option<fn(usize) -> Msg>,
    on_activate: &Option<Msg>,
    on_navigate: &Option<fn(KeyCode) -> Msg>,
    area: Rect,
    inside_panel: bool,
) {
    focus_registry.register_focusable(FocusableInfo {
        id: id.clone(),
        rect: area,
        on_key: list_on_key(*on_navigate, on_activate.clone()),
        inside_panel,
    });

    let is_focused = focused_id == Some(id);
    let content = if is_focused && !inside_panel {
        let border = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent_primary));
        let inner = border.inner(area);
        frame.render_widget(border, area);
        inner
    } else {
        area
    };

    let visible_height = content.height as usize;
    let start = visible_start(selected, scroll_offset, visible_height, items.len());
    let end = (start + visible_height).min(items.len());

    for (row, index) in (start..end).enumerate() {
        let line_area = Rect {
            x: content.x,
            y: content.y + row as u16,
            width: content.width.saturating_sub(1),
            height: 1,
        };

        if selected == Some(index) {
            let highlight = if is_focused { theme.bg_elevated } else { theme.bg_surface };
            frame.render_widget(Block::default().style(Style::default().bg(highlight)), line_area);
        }
        if let Some(select) = on_select {
            registry.register_click(line_area, select(index));
        }
        Renderer::render_element(frame, theme, registry, focus_registry, focused_id, &items[index], line_area, true);
    }

    // Scrollbar thumb
    if items.len() > visible_height && visible_height > 1 {
        let range = (items.len() - visible_height) as f32;
        let position = (start as f32 / range * (visible_height - 1) as f32) as u16;
        let thumb = Rect {
            x: content.x + content.width.saturating_sub(1),
            y: content.y + position,
            width: 1,
            height: 1,
        };
        frame.render_widget(Block::default().style(Style::default().bg(theme.border_primary)), thumb);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_start_keeps_selection_on_screen() {
        assert_eq!(visible_start(None, 0, 5, 20), 0);
        assert_eq!(visible_start(Some(12), 0, 5, 20), 8);
        assert_eq!(visible_start(Some(2), 10, 5, 20), 2);
        assert_eq!(visible_start(None, 30, 5, 20), 15);
    }
}
