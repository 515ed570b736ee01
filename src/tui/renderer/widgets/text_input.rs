use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Style, Stylize},
    widgets::Paragraph,
};

use crate::tui::Theme;
use crate::tui::command::DispatchTarget;
use crate::tui::element::FocusId;
use crate::tui::renderer::{FocusRegistry, FocusableInfo};

/// Plain keys go to `on_change` and Enter fires `on_submit` when set; Esc,
/// Tab and Ctrl chords are left for the page and the global bindings
pub fn text_input_on_key<Msg: Clone + Send + 'static>(
    on_change: Option<fn(KeyCode) -> Msg>,
    on_submit: Option<Msg>,
) -> Box<dyn Fn(KeyEvent) -> DispatchTarget<Msg> + Send> {
    Box::new(move |key_event| match key_event.code {
        KeyCode::Esc | KeyCode::Tab | KeyCode::BackTab => DispatchTarget::PassThrough,
        _ if key_event.modifiers.contains(KeyModifiers::CONTROL) => DispatchTarget::PassThrough,
        KeyCode::Enter => match &on_submit {
            Some(msg) => DispatchTarget::AppMsg(msg.clone()),
            None => DispatchTarget::PassThrough,
        },
        code => match on_change {
            Some(f) => DispatchTarget::AppMsg(f(code)),
            None => DispatchTarget::PassThrough,
        },
    })
}

#[allow(clippy::too_many_arguments)]
pub fn render_text_input<Msg: Clone + Send + 'static>(
    frame: &mut Frame,
    theme: &Theme,
    focus_registry: &mut FocusRegistry<Msg>,
    focused_id: Option<&FocusId>,
    id: &FocusId,
    value: &str,
    cursor_pos: usize,
    scroll_offset: usize,
    placeholder: &Option<String>,
    masked: bool,
    on_change: &Option<fn(KeyCode) -> Msg>,
    on_submit: &Option<Msg>,
    area: Rect,
    inside_panel: bool,
) {
    focus_registry.register_focusable(FocusableInfo {
        id: id.clone(),
        rect: area,
        on_key: text_input_on_key(*on_change, on_submit.clone()),
        inside_panel,
    });

    let is_focused = focused_id == Some(id);
    let visible_width = area.width.saturating_sub(2) as usize;

    let (display, style) = if value.is_empty() && !is_focused {
        let text = placeholder.clone().unwrap_or_default();
        (format!(" {}", text), Style::default().fg(theme.border_primary).italic())
    } else {
        let text = visible_text(value, cursor_pos, scroll_offset, visible_width, masked, is_focused);
        let style = if is_focused {
            Style::default().fg(theme.text_primary).bg(theme.bg_surface)
        } else {
            Style::default().fg(theme.text_primary)
        };
        (format!(" {}", text), style)
    };

    frame.render_widget(Paragraph::new(display).style(style), area);
}

/// The slice of `value` that fits in `width` columns, scrolled so the cursor
/// stays in view, with the cursor drawn when focused
fn visible_text(value: &str, cursor_pos: usize, scroll_offset: usize, width: usize, masked: bool, focused: bool) -> String {
    let chars: Vec<char> = value.chars().collect();
    let cursor_pos = cursor_pos.min(chars.len());
    // Keep the cursor in view even if the stored offset is stale
    let mut start = scroll_offset.min(cursor_pos);
    if width > 0 && cursor_pos >= start + width {
        start = cursor_pos + 1 - width;
    }
    let end = (start + width).min(chars.len()).max(start);
    let mut visible: Vec<char> = if masked {
        vec!['•'; end - start]
    } else {
        chars[start..end].to_vec()
    };

    if focused {
        let at = (cursor_pos - start).min(visible.len());
        visible.insert(at, '│');
    }
    visible.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Msg {
        Key(KeyCode),
        Submit,
    }

    fn route(code: KeyCode, modifiers: KeyModifiers) -> Option<Msg> {
        match text_input_on_key(Some(Msg::Key), Some(Msg::Submit))(KeyEvent::new(code, modifiers)) {
            DispatchTarget::AppMsg(msg) => Some(msg),
            DispatchTarget::PassThrough => None,
        }
    }

    #[test]
    fn test_key_routing() {
        assert_eq!(route(KeyCode::Char('a'), KeyModifiers::NONE), Some(Msg::Key(KeyCode::Char('a'))));
        assert_eq!(route(KeyCode::Char('A'), KeyModifiers::SHIFT), Some(Msg::Key(KeyCode::Char('A'))));
        assert_eq!(route(KeyCode::Enter, KeyModifiers::NONE), Some(Msg::Submit));
        assert_eq!(route(KeyCode::Char('t'), KeyModifiers::CONTROL), None);
        assert_eq!(route(KeyCode::Tab, KeyModifiers::NONE), None);
    }

    #[test]
    fn test_visible_text_scrolls_to_cursor() {
        assert_eq!(visible_text("abcdef", 6, 0, 4, false, true), "def│");
        assert_eq!(visible_text("abcdef", 1, 0, 4, false, true), "a│bcd");
        assert_eq!(visible_text("segredo", 7, 0, 10, true, false), "•••••••");
    }

    #[test]
    fn test_visible_text_in_zero_width() {
        assert_eq!(visible_text("abc", 2, 1, 0, false, true), "│");
        assert_eq!(visible_text("abc", 3, 0, 0, false, true), "│");
        assert_eq!(visible_text("abc", 3, 0, 0, false, false), "");
    }
}
