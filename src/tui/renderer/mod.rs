use ratatui::{Frame, layout::Rect};

use crate::tui::element::FocusId;
use crate::tui::{Element, Theme};

mod focus_registry;
mod interaction_registry;
mod widgets;

pub use focus_registry::{FocusRegistry, FocusableInfo};
pub use interaction_registry::InteractionRegistry;

use widgets::*;

/// Renders element trees to the terminal, registering focus and click
/// targets as it goes
pub struct Renderer;

impl Renderer {
    pub fn render<Msg: Clone + Send + 'static>(
        frame: &mut Frame,
        theme: &Theme,
        registry: &mut InteractionRegistry<Msg>,
        focus_registry: &mut FocusRegistry<Msg>,
        focused_id: Option<&FocusId>,
        element: &Element<Msg>,
        area: Rect,
    ) {
        Self::render_element(frame, theme, registry, focus_registry, focused_id, element, area, false);
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn render_element<Msg: Clone + Send + 'static>(
        frame: &mut Frame,
        theme: &Theme,
        registry: &mut InteractionRegistry<Msg>,
        focus_registry: &mut FocusRegistry<Msg>,
        focused_id: Option<&FocusId>,
        element: &Element<Msg>,
        area: Rect,
        inside_panel: bool,
    ) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        if primitives::is_primitive(element) {
            primitives::render_primitive(frame, theme, element, area);
            return;
        }

        match element {
            Element::Button {
                id,
                label,
                on_press,
                style,
            } => {
                render_button(frame, theme, registry, focus_registry, focused_id, id, label, on_press, style, area, inside_panel);
            }

            Element::Column { items, spacing } => {
                layout::render_column(frame, theme, registry, focus_registry, focused_id, items, *spacing, area, inside_panel);
            }

            Element::Row { items, spacing } => {
                layout::render_row(frame, theme, registry, focus_registry, focused_id, items, *spacing, area, inside_panel);
            }

            Element::Container { child, padding } => {
                layout::render_container(frame, theme, registry, focus_registry, focused_id, child, *padding, area, inside_panel);
            }

            Element::Panel { child, title } => {
                layout::render_panel(frame, theme, registry, focus_registry, focused_id, child, title, area);
            }

            Element::List {
                id,
                items,
                selected,
                scroll_offset,
                on_select,
                on_activate,
                on_navigate,
            } => {
                render_list(
                    frame,
                    theme,
                    registry,
                    focus_registry,
                    focused_id,
                    id,
                    items,
                    *selected,
                    *scroll_offset,
                    on_select,
                    on_activate,
                    on_navigate,
                    area,
                    inside_panel,
                );
            }

            Element::TextInput {
                id,
                value,
                cursor_pos,
                scroll_offset,
                placeholder,
                masked,
                on_change,
                on_submit,
            } => {
                render_text_input(
                    frame,
                    theme,
                    focus_registry,
                    focused_id,
                    id,
                    value,
                    *cursor_pos,
                    *scroll_offset,
                    placeholder,
                    *masked,
                    on_change,
                    on_submit,
                    area,
                    inside_panel,
                );
            }

            Element::Select {
                id,
                options,
                selected,
                placeholder,
                on_select,
            } => {
                render_select(
                    frame,
                    theme,
                    registry,
                    focus_registry,
                    focused_id,
                    id,
                    options,
                    *selected,
                    placeholder,
                    on_select,
                    area,
                    inside_panel,
                );
            }

            Element::None | Element::Text { .. } | Element::StyledText { .. } | Element::Paragraph { .. } => {
                unreachable!("primitives are rendered before the match")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    #[derive(Clone, Debug, PartialEq)]
    enum Msg {
        Save,
        Cancel,
    }

    fn draw(element: &Element<Msg>, focused: Option<&FocusId>) -> (FocusRegistry<Msg>, InteractionRegistry<Msg>, String) {
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        let mut focus = FocusRegistry::new();
        let mut clicks = InteractionRegistry::new();
        let theme = Theme::default();
        terminal
            .draw(|frame| {
                let area = frame.area();
                Renderer::render(frame, &theme, &mut clicks, &mut focus, focused, element, area);
            })
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        (focus, clicks, text)
    }

    #[test]
    fn test_buttons_register_focus_and_clicks_in_order() {
        let view = Element::row(vec![
            Element::button("save", "Salvar").on_press(Msg::Save).build(),
            Element::button("cancel", "Cancelar").on_press(Msg::Cancel).build(),
        ])
        .build();

        let (focus, clicks, text) = draw(&view, None);
        assert_eq!(focus.ids(), vec![FocusId("save"), FocusId("cancel")]);
        assert!(text.contains("Salvar"));
        assert_eq!(clicks.find_click(1, 1), Some(Msg::Save));
    }

    #[test]
    fn test_masked_input_hides_value() {
        let view: Element<Msg> = Element::TextInput {
            id: FocusId("password"),
            value: "segredo".into(),
            cursor_pos: 0,
            scroll_offset: 0,
            placeholder: None,
            masked: true,
            on_change: None,
            on_submit: None,
        };
        let (_, _, text) = draw(&view, None);
        assert!(!text.contains("segredo"));
        assert!(text.contains("•••••••"));
    }
}
