use crossterm::event::KeyCode;

/// Cursor and horizontal scroll of a text input; the text itself lives in
/// the page state
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    cursor_pos: usize, // character index, 0 = before the first char
    scroll_offset: usize,
}

impl TextInputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor_pos(&self) -> usize {
        self.cursor_pos
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn reset(&mut self) {
        self.cursor_pos = 0;
        self.scroll_offset = 0;
    }

    /// Apply a key to `current_value`.
    /// Returns the new text if it changed, `None` if only the cursor moved.
    pub fn handle_key(&mut self, key: KeyCode, current_value: &str, max_length: Option<usize>) -> Option<String> {
        let char_count = current_value.chars().count();
        self.cursor_pos = self.cursor_pos.min(char_count);

        match key {
            KeyCode::Char(c) => {
                if max_length.is_some_and(|max| char_count >= max) {
                    return None;
                }
                let mut chars: Vec<char> = current_value.chars().collect();
                chars.insert(self.cursor_pos, c);
                self.cursor_pos += 1;
                Some(chars.into_iter().collect())
            }
            KeyCode::Backspace if self.cursor_pos > 0 => {
                let mut chars: Vec<char> = current_value.chars().collect();
                chars.remove(self.cursor_pos - 1);
                self.cursor_pos -= 1;
                Some(chars.into_iter().collect())
            }
            KeyCode::Delete if self.cursor_pos < char_count => {
                let mut chars: Vec<char> = current_value.chars().collect();
                chars.remove(self.cursor_pos);
                Some(chars.into_iter().collect())
            }
            KeyCode::Left => {
                self.cursor_pos = self.cursor_pos.saturating_sub(1);
                None
            }
            KeyCode::Right => {
                self.cursor_pos = (self.cursor_pos + 1).min(char_count);
                None
            }
            KeyCode::Home => {
                self.cursor_pos = 0;
                None
            }
            KeyCode::End => {
                self.cursor_pos = char_count;
                None
            }
            _ => None,
        }
    }

    /// Apply a key directly to an owned value; convenience for page update()s
    pub fn apply(&mut self, key: KeyCode, value: &mut String) {
        if let Some(new_value) = self.handle_key(key, value, None) {
            *value = new_value;
        }
    }

    /// Keep the cursor inside a window of `visible_width` characters
    pub fn update_scroll(&mut self, visible_width: usize, text: &str) {
        let char_count = text.chars().count();

        if self.cursor_pos < self.scroll_offset {
            self.scroll_offset = self.cursor_pos;
        } else if visible_width > 0 && self.cursor_pos >= self.scroll_offset + visible_width {
            self.scroll_offset = self.cursor_pos.saturating_sub(visible_width - 1);
        }

        let max_offset = char_count.saturating_sub(visible_width);
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_and_editing_with_accents() {
        let mut state = TextInputState::new();
        let mut value = String::new();
        for c in "Área".chars() {
            state.apply(KeyCode::Char(c), &mut value);
        }
        assert_eq!(value, "Área");

        state.apply(KeyCode::Home, &mut value);
        state.apply(KeyCode::Delete, &mut value);
        assert_eq!(value, "rea");
        state.apply(KeyCode::End, &mut value);
        state.apply(KeyCode::Backspace, &mut value);
        assert_eq!(value, "re");
    }

    #[test]
    fn test_max_length() {
        let mut state = TextInputState::new();
        assert_eq!(state.handle_key(KeyCode::Char('x'), "abc", Some(3)), None);
    }

    #[test]
    fn test_cursor_clamped_after_external_reset() {
        let mut state = TextInputState::new();
        let mut value = "abcdef".to_string();
        state.apply(KeyCode::End, &mut value);
        value.clear();
        state.apply(KeyCode::Char('z'), &mut value);
        assert_eq!(value, "z");
    }
}
