use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    widgets::{Paragraph, Wrap},
};

use crate::tui::{Element, Theme};

/// Render the elements that hold no children and take no input
pub fn render_primitive<Msg>(frame: &mut Frame, theme: &Theme, element: &Element<Msg>, area: Rect) {
    match element {
        Element::Text { content, style } => {
            let default_style = Style::default().fg(theme.text_primary);
            let widget = Paragraph::new(content.as_str()).style(style.unwrap_or(default_style));
            frame.render_widget(widget, area);
        }

        Element::StyledText { line } => {
            frame.render_widget(Paragraph::new(line.clone()), area);
        }

        Element::Paragraph { lines } => {
            let widget = Paragraph::new(lines.clone())
                .style(Style::default().fg(theme.text_primary))
                .wrap(Wrap { trim: true });
            frame.render_widget(widget, area);
        }

        _ => {}
    }
}

pub fn is_primitive<Msg>(element: &Element<Msg>) -> bool {
    matches!(
        element,
        Element::None | Element::Text { .. } | Element::StyledText { .. } | Element::Paragraph { .. }
    )
}
