use crate::domain::ColorTheme;
use ratatui::style::{Color, Modifier, Style};

/// Accent colour for a theme
pub fn accent(theme: ColorTheme) -> Color {
    match theme {
        ColorTheme::Green => Color::Rgb(34, 197, 94),
        ColorTheme::Blue => Color::Rgb(59, 130, 246),
        ColorTheme::Purple => Color::Rgb(168, 85, 247),
        ColorTheme::Red => Color::Rgb(239, 68, 68),
        ColorTheme::Cyan => Color::Rgb(6, 182, 212),
        ColorTheme::Amber => Color::Rgb(245, 158, 11),
        ColorTheme::Teal => Color::Rgb(20, 184, 166),
        ColorTheme::Indigo => Color::Rgb(99, 102, 241),
        ColorTheme::Pink => Color::Rgb(236, 72, 153),
        ColorTheme::Emerald => Color::Rgb(16, 185, 129),
        ColorTheme::Sky => Color::Rgb(14, 165, 233),
        ColorTheme::Violet => Color::Rgb(139, 92, 246),
        ColorTheme::Rose => Color::Rgb(244, 63, 94),
        ColorTheme::Gray => Color::Rgb(156, 163, 175),
        ColorTheme::Slate => Color::Rgb(148, 163, 184),
        ColorTheme::Zinc => Color::Rgb(161, 161, 170),
        ColorTheme::Neutral => Color::Rgb(163, 163, 163),
        ColorTheme::Stone => Color::Rgb(168, 162, 158),
    }
}

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Selected row highlight style
pub fn selected_style(theme: ColorTheme) -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(accent(theme))
        .add_modifier(Modifier::BOLD)
}

/// Title style for panes
pub fn title_style(theme: ColorTheme) -> Style {
    Style::default()
        .fg(accent(theme))
        .add_modifier(Modifier::BOLD)
}

/// Border style; the focused pane borrows the accent
pub fn border_style(theme: ColorTheme, focused: bool) -> Style {
    if focused {
        Style::default().fg(accent(theme))
    } else {
        Style::default().fg(Color::Gray)
    }
}

/// Large countdown digits
pub fn countdown_style(theme: ColorTheme, running: bool) -> Style {
    let style = Style::default().fg(accent(theme)).add_modifier(Modifier::BOLD);
    if running {
        style
    } else {
        style.add_modifier(Modifier::DIM)
    }
}

/// Progress gauge style
pub fn gauge_style(theme: ColorTheme) -> Style {
    Style::default().fg(accent(theme)).bg(Color::DarkGray)
}

/// Now-playing marker style
pub fn playing_style(theme: ColorTheme) -> Style {
    Style::default()
        .fg(accent(theme))
        .add_modifier(Modifier::BOLD)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Error message style
pub fn error_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}

/// Done/completed task style
pub fn done_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::CROSSED_OUT)
}
