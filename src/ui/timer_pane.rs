use crate::app::AppState;
use crate::domain::{FocusPane, TimerMode};
use crate::ui::styles::{border_style, countdown_style, default_style, gauge_style, hint_style, title_style};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Render the interval timer: mode, countdown, progress and toggles
pub fn render_timer_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.ctx.theme();
    let timer = &app.timer;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(theme, app.focus == FocusPane::Timer))
        .title(Span::styled(" Timer ", title_style(theme)));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Mode
            Constraint::Length(1), // Countdown
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Gauge
            Constraint::Length(1), // Spacing
            Constraint::Min(1),    // Preset and toggles
        ])
        .split(block.inner(area));
    f.render_widget(block, area);

    let state = if timer.is_running() { "running" } else { "paused" };
    let mode_line = Line::from(vec![
        Span::styled(timer.mode().label().to_uppercase(), title_style(theme)),
        Span::styled(format!("  · {}", state), hint_style()),
    ]);
    f.render_widget(Paragraph::new(mode_line).alignment(Alignment::Center), chunks[0]);

    let countdown = Paragraph::new(Span::styled(
        timer.format_remaining(),
        countdown_style(theme, timer.is_running()),
    ))
    .alignment(Alignment::Center);
    f.render_widget(countdown, chunks[1]);

    let gauge = Gauge::default()
        .block(Block::default())
        .gauge_style(gauge_style(theme))
        .ratio(timer.progress())
        .label("");
    f.render_widget(gauge, chunks[3]);

    let settings = timer.settings();
    let mut details = vec![
        Span::styled(settings.preset_id.name(), default_style()),
        Span::styled(
            format!("  sound {}", if timer.sound_enabled() { "on" } else { "off" }),
            hint_style(),
        ),
    ];
    if settings.movie_breaks_enabled {
        let overlay = if timer.mode() == TimerMode::Break && timer.overlay_visible() {
            "  movies showing"
        } else {
            "  movie breaks on"
        };
        details.push(Span::styled(overlay, hint_style()));
    }
    f.render_widget(
        Paragraph::new(Line::from(details)).alignment(Alignment::Center),
        chunks[5],
    );
}
