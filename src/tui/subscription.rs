use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A keyboard key with optional modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::empty(),
        }
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }

    /// Shift is ignored for characters since it is already part of the code
    pub fn from_event(event: &KeyEvent) -> Self {
        let modifiers = match event.code {
            KeyCode::Char(_) => event.modifiers - KeyModifiers::SHIFT,
            _ => event.modifiers,
        };
        Self {
            code: event.code,
            modifiers,
        }
    }

    /// Short label for the key hint bar
    pub fn label(&self) -> String {
        let key = match self.code {
            KeyCode::Char(c) => c.to_uppercase().to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            other => format!("{:?}", other),
        };
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", key)
        } else {
            key
        }
    }
}

impl From<KeyCode> for KeyBinding {
    fn from(code: KeyCode) -> Self {
        Self::new(code)
    }
}

/// Inputs a page wants to receive while no focused widget consumes them
pub enum Subscription<Msg> {
    Keyboard {
        key: KeyBinding,
        msg: Msg,
        description: String,
    },
}

impl<Msg> Subscription<Msg> {
    pub fn keyboard(key: impl Into<KeyBinding>, description: impl Into<String>, msg: Msg) -> Self {
        Subscription::Keyboard {
            key: key.into(),
            msg,
            description: description.into(),
        }
    }

    pub fn ctrl_key(code: KeyCode, description: impl Into<String>, msg: Msg) -> Self {
        Self::keyboard(KeyBinding::ctrl(code), description, msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_from_event_ignores_shift_on_chars() {
        let event = KeyEvent::new(KeyCode::Char('N'), KeyModifiers::SHIFT);
        assert_eq!(KeyBinding::from_event(&event), KeyBinding::new(KeyCode::Char('N')));

        let ctrl = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert_eq!(KeyBinding::from_event(&ctrl), KeyBinding::ctrl(KeyCode::Char('q')));
        assert_eq!(KeyBinding::ctrl(KeyCode::Char('q')).label(), "Ctrl+Q");
    }
}
