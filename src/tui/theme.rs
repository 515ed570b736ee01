use ratatui::style::{Color, Modifier, Style};

/// Semantic color slots, filled from the Catppuccin Mocha palette
#[derive(Debug, Clone)]
pub struct Theme {
    pub accent_primary: Color,   // focus, selection
    pub accent_secondary: Color, // links, secondary actions
    pub accent_tertiary: Color,  // headings
    pub accent_error: Color,
    pub accent_warning: Color,
    pub accent_success: Color,
    pub accent_info: Color,
    pub accent_muted: Color, // key hints, labels

    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_tertiary: Color,

    pub border_primary: Color,
    pub border_secondary: Color,
    pub bg_base: Color,
    pub bg_surface: Color,
    pub bg_elevated: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

impl Theme {
    pub fn mocha() -> Self {
        Self {
            accent_primary: Color::Rgb(0xb4, 0xbe, 0xfe),   // lavender
            accent_secondary: Color::Rgb(0x89, 0xb4, 0xfa), // blue
            accent_tertiary: Color::Rgb(0xcb, 0xa6, 0xf7),  // mauve
            accent_error: Color::Rgb(0xf3, 0x8b, 0xa8),     // red
            accent_warning: Color::Rgb(0xf9, 0xe2, 0xaf),   // yellow
            accent_success: Color::Rgb(0xa6, 0xe3, 0xa1),   // green
            accent_info: Color::Rgb(0x94, 0xe2, 0xd5),      // teal
            accent_muted: Color::Rgb(0xfa, 0xb3, 0x87),     // peach

            text_primary: Color::Rgb(0xcd, 0xd6, 0xf4),
            text_secondary: Color::Rgb(0xba, 0xc2, 0xde),
            text_tertiary: Color::Rgb(0xa6, 0xad, 0xc8),

            border_primary: Color::Rgb(0x7f, 0x84, 0x9c),
            border_secondary: Color::Rgb(0x6c, 0x70, 0x86),
            bg_base: Color::Rgb(0x1e, 0x1e, 0x2e),
            bg_surface: Color::Rgb(0x31, 0x32, 0x44),
            bg_elevated: Color::Rgb(0x45, 0x47, 0x5a),
        }
    }

    pub fn heading(&self) -> Style {
        Style::default()
            .fg(self.accent_tertiary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.text_tertiary)
    }

    pub fn key_hint(&self) -> Style {
        Style::default().fg(self.accent_muted)
    }
}
