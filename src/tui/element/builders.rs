use crossterm::event::KeyCode;
use ratatui::style::Style;

use super::{Element, FocusId, LayoutConstraint};

pub struct ButtonBuilder<Msg> {
    pub(crate) id: FocusId,
    pub(crate) label: String,
    pub(crate) on_press: Option<Msg>,
    pub(crate) style: Option<Style>,
}

impl<Msg> ButtonBuilder<Msg> {
    pub fn on_press(mut self, msg: Msg) -> Self {
        self.on_press = Some(msg);
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn build(self) -> Element<Msg> {
        Element::Button {
            id: self.id,
            label: self.label,
            on_press: self.on_press,
            style: self.style,
        }
    }
}

pub struct ColumnBuilder<Msg> {
    pub(crate) items: Vec<(LayoutConstraint, Element<Msg>)>,
    pub(crate) spacing: u16,
}

impl<Msg> Default for ColumnBuilder<Msg> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Msg> ColumnBuilder<Msg> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            spacing: 1,
        }
    }

    pub fn add(mut self, child: Element<Msg>, constraint: LayoutConstraint) -> Self {
        self.items.push((constraint, child));
        self
    }

    pub fn spacing(mut self, spacing: u16) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn build(self) -> Element<Msg> {
        Element::Column {
            items: self.items,
            spacing: self.spacing,
        }
    }
}

pub struct RowBuilder<Msg> {
    pub(crate) items: Vec<(LayoutConstraint, Element<Msg>)>,
    pub(crate) spacing: u16,
}

impl<Msg> Default for RowBuilder<Msg> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Msg> RowBuilder<Msg> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            spacing: 1,
        }
    }

    pub fn add(mut self, child: Element<Msg>, constraint: LayoutConstraint) -> Self {
        self.items.push((constraint, child));
        self
    }

    pub fn spacing(mut self, spacing: u16) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn build(self) -> Element<Msg> {
        Element::Row {
            items: self.items,
            spacing: self.spacing,
        }
    }
}

pub struct ContainerBuilder<Msg> {
    pub(crate) child: Box<Element<Msg>>,
    pub(crate) padding: u16,
}

impl<Msg> ContainerBuilder<Msg> {
    pub fn padding(mut self, padding: u16) -> Self {
        self.padding = padding;
        self
    }

    pub fn build(self) -> Element<Msg> {
        Element::Container {
            child: self.child,
            padding: self.padding,
        }
    }
}

pub struct PanelBuilder<Msg> {
    pub(crate) child: Box<Element<Msg>>,
    pub(crate) title: Option<String>,
}

impl<Msg> PanelBuilder<Msg> {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn build(self) -> Element<Msg> {
        Element::Panel {
            child: self.child,
            title: self.title,
        }
    }
}

pub struct ListBuilder<Msg> {
    pub(crate) id: FocusId,
    pub(crate) items: Vec<Element<Msg>>,
    pub(crate) selected: Option<usize>,
    pub(crate) scroll_offset: usize,
    pub(crate) on_select: Option<fn(usize) -> Msg>,
    pub(crate) on_activate: Option<Msg>,
    pub(crate) on_navigate: Option<fn(KeyCode) -> Msg>,
}

impl<Msg> ListBuilder<Msg> {
    pub fn on_select(mut self, msg: fn(usize) -> Msg) -> Self {
        self.on_select = Some(msg);
        self
    }

    /// Sent on Enter
    pub fn on_activate(mut self, msg: Msg) -> Self {
        self.on_activate = Some(msg);
        self
    }

    /// Receives Up/Down/PageUp/PageDown/Home/End
    pub fn on_navigate(mut self, msg: fn(KeyCode) -> Msg) -> Self {
        self.on_navigate = Some(msg);
        self
    }

    pub fn build(self) -> Element<Msg> {
        Element::List {
            id: self.id,
            items: self.items,
            selected: self.selected,
            scroll_offset: self.scroll_offset,
            on_select: self.on_select,
            on_activate: self.on_activate,
            on_navigate: self.on_navigate,
        }
    }
}

pub struct TextInputBuilder<Msg> {
    pub(crate) id: FocusId,
    pub(crate) value: String,
    pub(crate) cursor_pos: usize,
    pub(crate) scroll_offset: usize,
    pub(crate) placeholder: Option<String>,
    pub(crate) masked: bool,
    pub(crate) on_change: Option<fn(KeyCode) -> Msg>,
    pub(crate) on_submit: Option<Msg>,
}

impl<Msg> TextInputBuilder<Msg> {
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    /// Show bullets instead of the characters
    pub fn masked(mut self, masked: bool) -> Self {
        self.masked = masked;
        self
    }

    pub fn on_change(mut self, msg: fn(KeyCode) -> Msg) -> Self {
        self.on_change = Some(msg);
        self
    }

    pub fn on_submit(mut self, msg: Msg) -> Self {
        self.on_submit = Some(msg);
        self
    }

    pub fn build(self) -> Element<Msg> {
        Element::TextInput {
            id: self.id,
            value: self.value,
            cursor_pos: self.cursor_pos,
            scroll_offset: self.scroll_offset,
            placeholder: self.placeholder,
            masked: self.masked,
            on_change: self.on_change,
            on_submit: self.on_submit,
        }
    }
}

pub struct SelectBuilder<Msg> {
    pub(crate) id: FocusId,
    pub(crate) options: Vec<String>,
    pub(crate) selected: Option<usize>,
    pub(crate) placeholder: Option<String>,
    pub(crate) on_select: Option<fn(usize) -> Msg>,
}

impl<Msg> SelectBuilder<Msg> {
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    pub fn on_select(mut self, msg: fn(usize) -> Msg) -> Self {
        self.on_select = Some(msg);
        self
    }

    pub fn build(self) -> Element<Msg> {
        Element::Select {
            id: self.id,
            options: self.options,
            selected: self.selected,
            placeholder: self.placeholder,
            on_select: self.on_select,
        }
    }
}
