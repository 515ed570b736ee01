use crossterm::event::KeyCode;
use ratatui::style::Style;
use ratatui::text::Line;

mod builders;
pub use builders::*;

use super::theme::Theme;
use super::widgets::{ListItem, ListState, SelectState, TextInputState};

/// Stable identifier for focusable UI elements
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FocusId(pub &'static str);

impl FocusId {
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }
}

impl From<&'static str> for FocusId {
    fn from(s: &'static str) -> Self {
        FocusId(s)
    }
}

/// Sizing of a child within a column or row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutConstraint {
    /// Exact number of lines/columns
    Length(u16),
    /// At least this many lines/columns
    Min(u16),
    /// Weighted share of the remaining space
    Fill(u16),
}

/// Declarative UI elements that compose to form a page view
#[derive(Clone)]
pub enum Element<Msg> {
    None,

    Text {
        content: String,
        style: Option<Style>,
    },

    StyledText {
        line: Line<'static>,
    },

    /// Multi-line text, wrapped to the available width
    Paragraph {
        lines: Vec<Line<'static>>,
    },

    Button {
        id: FocusId,
        label: String,
        on_press: Option<Msg>,
        style: Option<Style>,
    },

    Column {
        items: Vec<(LayoutConstraint, Element<Msg>)>,
        spacing: u16,
    },

    Row {
        items: Vec<(LayoutConstraint, Element<Msg>)>,
        spacing: u16,
    },

    Container {
        child: Box<Element<Msg>>,
        padding: u16,
    },

    Panel {
        child: Box<Element<Msg>>,
        title: Option<String>,
    },

    /// Scrollable list with keyboard navigation
    List {
        id: FocusId,
        items: Vec<Element<Msg>>,
        selected: Option<usize>,
        scroll_offset: usize,
        on_select: Option<fn(usize) -> Msg>,
        on_activate: Option<Msg>,
        on_navigate: Option<fn(KeyCode) -> Msg>,
    },

    TextInput {
        id: FocusId,
        value: String,
        cursor_pos: usize,
        scroll_offset: usize,
        placeholder: Option<String>,
        masked: bool,
        on_change: Option<fn(KeyCode) -> Msg>,
        on_submit: Option<Msg>,
    },

    /// Single-line choice among fixed options, cycled with the arrow keys
    Select {
        id: FocusId,
        options: Vec<String>,
        selected: Option<usize>,
        placeholder: Option<String>,
        on_select: Option<fn(usize) -> Msg>,
    },
}

impl<Msg> Element<Msg> {
    pub fn text(content: impl Into<String>) -> Self {
        Element::Text {
            content: content.into(),
            style: None,
        }
    }

    pub fn styled(content: impl Into<String>, style: Style) -> Self {
        Element::Text {
            content: content.into(),
            style: Some(style),
        }
    }

    pub fn styled_text(line: Line<'static>) -> Self {
        Element::StyledText { line }
    }

    pub fn paragraph(lines: Vec<Line<'static>>) -> Self {
        Element::Paragraph { lines }
    }

    pub fn button(id: impl Into<FocusId>, label: impl Into<String>) -> ButtonBuilder<Msg> {
        ButtonBuilder {
            id: id.into(),
            label: label.into(),
            on_press: None,
            style: None,
        }
    }

    /// Column with default constraints for every child
    pub fn column(children: Vec<Element<Msg>>) -> ColumnBuilder<Msg> {
        let items = children
            .into_iter()
            .map(|child| (child.default_constraint(), child))
            .collect();
        ColumnBuilder { items, spacing: 1 }
    }

    /// Row sharing the width equally between children
    pub fn row(children: Vec<Element<Msg>>) -> RowBuilder<Msg> {
        let items = children
            .into_iter()
            .map(|child| (LayoutConstraint::Fill(1), child))
            .collect();
        RowBuilder { items, spacing: 1 }
    }

    pub fn container(child: Element<Msg>) -> ContainerBuilder<Msg> {
        ContainerBuilder {
            child: Box::new(child),
            padding: 1,
        }
    }

    pub fn panel(child: Element<Msg>) -> PanelBuilder<Msg> {
        PanelBuilder {
            child: Box::new(child),
            title: None,
        }
    }

    pub fn list<T: ListItem>(id: impl Into<FocusId>, items: &[T], state: &ListState, theme: &Theme) -> ListBuilder<Msg> {
        let elements = items
            .iter()
            .enumerate()
            .map(|(i, item)| item.to_element(state.selected() == Some(i), theme))
            .collect();

        ListBuilder {
            id: id.into(),
            items: elements,
            selected: state.selected(),
            scroll_offset: state.scroll_offset(),
            on_select: None,
            on_activate: None,
            on_navigate: None,
        }
    }

    pub fn text_input(id: impl Into<FocusId>, value: &str, state: &TextInputState) -> TextInputBuilder<Msg> {
        TextInputBuilder {
            id: id.into(),
            value: value.to_string(),
            cursor_pos: state.cursor_pos(),
            scroll_offset: state.scroll_offset(),
            placeholder: None,
            masked: false,
            on_change: None,
            on_submit: None,
        }
    }

    pub fn select(id: impl Into<FocusId>, options: Vec<String>, state: &SelectState) -> SelectBuilder<Msg> {
        SelectBuilder {
            id: id.into(),
            options,
            selected: state.selected(),
            placeholder: None,
            on_select: None,
        }
    }

    /// Constraint used when a child is added without an explicit one
    pub fn default_constraint(&self) -> LayoutConstraint {
        match self {
            Element::None => LayoutConstraint::Length(0),
            Element::Text { .. } | Element::StyledText { .. } => LayoutConstraint::Length(1),
            Element::Paragraph { lines } => LayoutConstraint::Min(lines.len() as u16),
            Element::Button { .. } => LayoutConstraint::Length(3),
            Element::Column { .. } | Element::Row { .. } | Element::Container { .. } => LayoutConstraint::Fill(1),
            Element::Panel { child, .. } => match child.default_constraint() {
                LayoutConstraint::Length(n) => LayoutConstraint::Length(n + 2),
                LayoutConstraint::Min(n) => LayoutConstraint::Min(n + 2),
                LayoutConstraint::Fill(w) => LayoutConstraint::Fill(w),
            },
            Element::List { .. } => LayoutConstraint::Fill(1),
            Element::TextInput { .. } | Element::Select { .. } => LayoutConstraint::Length(1),
        }
    }

    /// Whether this element or a descendant is the focusable widget `id`
    pub fn contains_focusable(&self, id: &FocusId) -> bool {
        match self {
            Element::Button { id: own, .. }
            | Element::List { id: own, .. }
            | Element::TextInput { id: own, .. }
            | Element::Select { id: own, .. } => own == id,
            Element::Column { items, .. } | Element::Row { items, .. } => {
                items.iter().any(|(_, child)| child.contains_focusable(id))
            }
            Element::Container { child, .. } | Element::Panel { child, .. } => child.contains_focusable(id),
            _ => false,
        }
    }
}
