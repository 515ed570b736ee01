use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

use crate::tui::element::FocusId;
use crate::tui::renderer::{FocusRegistry, InteractionRegistry, Renderer};
use crate::tui::{Element, LayoutConstraint, Theme};

pub fn to_constraints<Msg>(items: &[(LayoutConstraint, Element<Msg>)]) -> Vec<Constraint> {
    items
        .iter()
        .map(|(constraint, _)| match constraint {
            LayoutConstraint::Length(n) => Constraint::Length(*n),
            LayoutConstraint::Min(n) => Constraint::Min(*n),
            LayoutConstraint::Fill(weight) => Constraint::Fill(*weight),
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn render_linear<Msg: Clone + Send + 'static>(
    frame: &mut Frame,
    theme: &Theme,
    registry: &mut InteractionRegistry<Msg>,
    focus_registry: &mut FocusRegistry<Msg>,
    focused_id: Option<&FocusId>,
    items: &[(LayoutConstraint, Element<Msg>)],
    spacing: u16,
    direction: Direction,
    area: Rect,
    inside_panel: bool,
) {
    if items.is_empty() {
        return;
    }

    let chunks = Layout::default()
        .direction(direction)
        .constraints(to_constraints(items))
        .spacing(spacing)
        .split(area);

    for ((_, child), chunk) in items.iter().zip(chunks.iter()) {
        Renderer::render_element(frame, theme, registry, focus_registry, focused_id, child, *chunk, inside_panel);
    }
}

#[allow(clippy::too_many_arguments)]
pub fn render_column<Msg: Clone + Send + 'static>(
    frame: &mut Frame,
    theme: &Theme,
    registry: &mut InteractionRegistry<Msg>,
    focus_registry: &mut FocusRegistry<Msg>,
    focused_id: Option<&FocusId>,
    items: &[(LayoutConstraint, Element<Msg>)],
    spacing: u16,
    area: Rect,
    inside_panel: bool,
) {
    render_linear(frame, theme, registry, focus_registry, focused_id, items, spacing, Direction::Vertical, area, inside_panel);
}

#[allow(clippy::too_many_arguments)]
pub fn render_row<Msg: Clone + Send + 'static>(
    frame: &mut Frame,
    theme: &Theme,
    registry: &mut InteractionRegistry<Msg>,
    focus_registry: &mut FocusRegistry<Msg>,
    focused_id: Option<&FocusId>,
    items: &[(LayoutConstraint, Element<Msg>)],
    spacing: u16,
    area: Rect,
    inside_panel: bool,
) {
    render_linear(frame, theme, registry, focus_registry, focused_id, items, spacing, Direction::Horizontal, area, inside_panel);
}

#[allow(clippy::too_many_arguments)]
pub fn render_container<Msg: Clone + Send + 'static>(
    frame: &mut Frame,
    theme: &Theme,
    registry: &mut InteractionRegistry<Msg>,
    focus_registry: &mut FocusRegistry<Msg>,
    focused_id: Option<&FocusId>,
    child: &Element<Msg>,
    padding: u16,
    area: Rect,
    inside_panel: bool,
) {
    let inner = Rect {
        x: area.x.saturating_add(padding),
        y: area.y.saturating_add(padding),
        width: area.width.saturating_sub(padding * 2),
        height: area.height.saturating_sub(padding * 2),
    };
    Renderer::render_element(frame, theme, registry, focus_registry, focused_id, child, inner, inside_panel);
}

/// Bordered box; the border takes the focus color while a widget inside is focused
#[allow(clippy::too_many_arguments)]
pub fn render_panel<Msg: Clone + Send + 'static>(
    frame: &mut Frame,
    theme: &Theme,
    registry: &mut InteractionRegistry<Msg>,
    focus_registry: &mut FocusRegistry<Msg>,
    focused_id: Option<&FocusId>,
    child: &Element<Msg>,
    title: &Option<String>,
    area: Rect,
) {
    let has_focus = focused_id.is_some_and(|id| child.contains_focusable(id));
    let border_style = if has_focus {
        Style::default().fg(theme.accent_primary)
    } else {
        Style::default().fg(theme.border_primary)
    };

    let mut block = Block::default().borders(Borders::ALL).border_style(border_style);
    if let Some(title) = title {
        block = block.title(format!(" {} ", title)).title_style(
            Style::default()
                .fg(theme.accent_tertiary)
                .add_modifier(Modifier::BOLD),
        );
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);
    Renderer::render_element(frame, theme, registry, focus_registry, focused_id, child, inner, true);
}
