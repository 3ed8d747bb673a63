use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme;

impl Theme {
    pub fn new() -> Self {
        Self
    }

    pub fn title(&self) -> Color {
        Color::Yellow
    }

    pub fn text(&self) -> Color {
        Color::Reset
    }

    pub fn text_dim(&self) -> Color {
        Color::Indexed(8)
    }

    pub fn border(&self) -> Color {
        Color::White
    }

    pub fn success(&self) -> Color {
        Color::Green
    }

    pub fn warning(&self) -> Color {
        Color::Yellow
    }

    pub fn error(&self) -> Color {
        Color::Red
    }

    pub fn gauge_stw(&self) -> Color {
        Color::Red
    }

    pub fn gauge_background(&self) -> Color {
        Color::Reset
    }

    pub fn chart_line(&self) -> Color {
        Color::Yellow
    }

    pub fn chart_axis(&self) -> Color {
        Color::White
    }

    pub fn bar(&self) -> Color {
        Color::Blue
    }

    pub fn bar_value(&self) -> Color {
        Color::White
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}
