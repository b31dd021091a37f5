use crate::app::AppState;
use crate::domain::{format_kanji_date, format_time};
use crate::ui::styles::{hint_style, title_style};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the clock header: local time over the kanji date
pub fn render_clock_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.ctx.theme();
    let lines = vec![
        Line::from(Span::styled(format_time(&app.now), title_style(theme))),
        Line::from(Span::styled(
            format_kanji_date(&app.now.date_naive()),
            hint_style(),
        )),
    ];

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}
