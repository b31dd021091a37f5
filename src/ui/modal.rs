use crate::app::{AppState, SettingsRow};
use crate::domain::{ColorTheme, TimerPreset};
use crate::ui::{
    layout::create_modal_area,
    styles::{accent, error_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn modal_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, modal_title_style()))
        .style(modal_bg_style())
}

/// Render the alert dialog
pub fn render_alert(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(message) = &app.alert {
        let modal_area = create_modal_area(area);
        f.render_widget(Clear, modal_area);

        let lines = vec![
            Line::raw(""),
            Line::styled(format!("  {}", message), error_style()),
            Line::raw(""),
            Line::from(vec![
                Span::styled("  [any key]", modal_title_style()),
                Span::raw(" Dismiss"),
            ]),
        ];

        let paragraph = Paragraph::new(lines)
            .block(modal_block(" Notice "))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, modal_area);
    }
}

/// Render the timer settings dialog
pub fn render_settings(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(form) = &app.settings_form else {
        return;
    };
    let modal_area = create_modal_area(area);
    f.render_widget(Clear, modal_area);

    let current = app.timer.settings();
    let mut lines = vec![Line::raw("")];

    for (index, row) in SettingsRow::all().iter().enumerate() {
        let cursor = if index == form.selected { "› " } else { "  " };
        let text = match row {
            SettingsRow::Preset(preset) => {
                let key = TimerPreset::all().iter().position(|p| p == preset).unwrap_or(0) + 1;
                let active = if current.preset_id == *preset { " ← Current" } else { "" };
                format!("[{}] {}{}", key, preset.name(), active)
            }
            SettingsRow::WorkMinutes => format!("    Focus  ◂ {} min ▸", form.custom_work_minutes),
            SettingsRow::BreakMinutes => format!("    Break  ◂ {} min ▸", form.custom_break_minutes),
            SettingsRow::MovieBreaks => format!(
                "[b] Movie breaks: {}",
                if current.movie_breaks_enabled { "on" } else { "off" }
            ),
        };
        let style = if index == form.selected {
            modal_title_style()
        } else {
            Style::default()
        };
        lines.push(Line::styled(format!("  {}{}", cursor, text), style));
    }

    lines.push(Line::raw(""));
    lines.push(Line::raw("  ↑/↓ move  ·  ←/→ adjust  ·  Enter apply  ·  Esc close"));
    lines.push(Line::raw("  Applying a change stops the timer."));

    let paragraph = Paragraph::new(lines)
        .block(modal_block(" Timer Settings "))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, modal_area);
}

/// Render the theme picker
pub fn render_theme_picker(f: &mut Frame, app: &AppState, area: Rect) {
    let modal_area = create_modal_area(area);
    f.render_widget(Clear, modal_area);

    let current = app.ctx.theme();
    let themes = ColorTheme::all();
    // Two columns so all themes fit in the dialog
    let rows = themes.len().div_ceil(2);
    let mut lines = vec![Line::raw("")];
    for row in 0..rows {
        let mut spans = Vec::new();
        for column in 0..2 {
            let index = row + column * rows;
            let Some(theme) = themes.get(index) else {
                continue;
            };
            let cursor = if index == app.theme_cursor { "› " } else { "  " };
            let label = if *theme == current {
                format!("{}{} ✓", cursor, theme)
            } else {
                format!("{}{}", cursor, theme)
            };
            spans.push(Span::styled("  ■ ", Style::default().fg(accent(*theme))));
            spans.push(Span::raw(format!("{:<14}", label)));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::raw(""));
    lines.push(Line::raw("  ↑/↓ move  ·  Enter apply  ·  Esc cancel"));

    let paragraph = Paragraph::new(lines)
        .block(modal_block(" Theme "))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, modal_area);
}
