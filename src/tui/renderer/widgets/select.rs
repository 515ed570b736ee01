use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::Theme;
use crate::tui::command::DispatchTarget;
use crate::tui::element::FocusId;
use crate::tui::renderer::{FocusRegistry, FocusableInfo, InteractionRegistry};
use crate::tui::widgets::select::cycle;

/// Left steps back; Right, Space and Enter step forward
pub fn select_on_key<Msg: Clone + Send + 'static>(
    selected: Option<usize>,
    option_count: usize,
    on_select: Option<fn(usize) -> Msg>,
) -> Box<dyn Fn(KeyEvent) -> DispatchTarget<Msg> + Send> {
    Box::new(move |key_event| {
        let forward = match key_event.code {
            KeyCode::Left => false,
            KeyCode::Right | KeyCode::Char(' ') | KeyCode::Enter => true,
            _ => return DispatchTarget::PassThrough,
        };
        match (on_select, cycle(selected, option_count, forward)) {
            (Some(f), Some(index)) => DispatchTarget::AppMsg(f(index)),
            _ => DispatchTarget::PassThrough,
        }
    })
}

#[allow(clippy::too_many_arguments)]
pub fn render_select<Msg: Clone + Send + 'static>(
    frame: &mut Frame,
    theme: &Theme,
    registry: &mut InteractionRegistry<Msg>,
    focus_registry: &mut FocusRegistry<Msg>,
    focused_id: Option<&FocusId>,
    id: &FocusId,
    options: &[String],
    selected: Option<usize>,
    placeholder: &Option<String>,
    on_select: &Option<fn(usize) -> Msg>,
    area: Rect,
    inside_panel: bool,
) {
    focus_registry.register_focusable(FocusableInfo {
        id: id.clone(),
        rect: area,
        on_key: select_on_key(selected, options.len(), *on_select),
        inside_panel,
    });

    if let (Some(f), Some(next)) = (on_select, cycle(selected, options.len(), true)) {
        registry.register_click(area, f(next));
    }

    let is_focused = focused_id == Some(id);
    let arrow_style = if is_focused {
        Style::default().fg(theme.accent_primary)
    } else {
        Style::default().fg(theme.border_secondary)
    };

    let value = match selected.and_then(|i| options.get(i)) {
        Some(option) => Span::styled(option.clone(), Style::default().fg(theme.text_primary)),
        None => Span::styled(
            placeholder.clone().unwrap_or_else(|| "Selecione".to_string()),
            Style::default().fg(theme.border_primary).italic(),
        ),
    };

    let line = Line::from(vec![
        Span::styled(" ‹ ", arrow_style),
        value,
        Span::styled(" › ", arrow_style),
    ]);
    let mut widget = Paragraph::new(line);
    if is_focused {
        widget = widget.style(Style::default().bg(theme.bg_surface));
    }
    frame.render_widget(widget, area);
}
