use ratatui::style::Color;
use ratatui::style::Style;

#[derive(Clone, Debug)]
pub struct Theme {
    pub text_primary: Style,
    pub text_muted: Style,
    pub accent: Style,
    /// Panel background; the default keeps the terminal's own background.
    pub surface: Style,
    pub border: Style,
    pub grip: Style,
    pub scrim: Color,
}

impl Default for Theme {
    fn default() -> Self {
        use ratatui::style::Stylize;

        Self {
            text_primary: Style::default(),
            text_muted: Style::default().dark_gray(),
            accent: Style::default().cyan(),
            surface: Style::default(),
            border: Style::default().gray(),
            grip: Style::default().dark_gray(),
            scrim: Color::Black,
        }
    }
}
