use tui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiColor {
    Primary,
    Accent,
    Dim,
    Winner,
    Highlight,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Theme {
    #[default]
    Dark,
}

pub fn resolve(color: UiColor, _theme: Theme) -> Style {
    match color {
        UiColor::Primary => Style::default().fg(Color::Rgb(0, 122, 195)),
        UiColor::Accent => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        UiColor::Dim => Style::default().fg(Color::Indexed(240)),
        UiColor::Winner => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        UiColor::Highlight => Style::default().fg(Color::Rgb(255, 103, 31)),
    }
}
