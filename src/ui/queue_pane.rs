use crate::app::AppState;
use crate::domain::{FocusPane, QueueVariant};
use crate::playback::QueueController;
use crate::ui::styles::{border_style, default_style, error_style, hint_style, playing_style, selected_style, title_style};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Render a playback queue; shared by the music and movie panes
pub fn render_queue_pane(f: &mut Frame, app: &AppState, variant: QueueVariant, area: Rect) {
    let theme = app.ctx.theme();
    let (queue, selected, pane) = match variant {
        QueueVariant::Music => (&app.music, app.music_selected, FocusPane::Music),
        QueueVariant::Movies => (&app.movies, app.movie_selected, FocusPane::Movies),
    };
    let focused = app.focus == pane;

    let title = match variant {
        QueueVariant::Music => " Music ",
        QueueVariant::Movies => " Break Movies ",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(theme, focused))
        .title(Span::styled(title, title_style(theme)));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Now playing
            Constraint::Min(0),    // Items
        ])
        .split(block.inner(area));
    f.render_widget(block, area);

    f.render_widget(Paragraph::new(now_playing_line(app, queue)), chunks[0]);

    if queue.is_empty() {
        let hint = Paragraph::new(Line::styled("Queue is empty. Press a to add a link.", hint_style()));
        f.render_widget(hint, chunks[1]);
        return;
    }

    let items: Vec<ListItem> = queue
        .items()
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let is_current = queue.current_index() == Some(index);
            let marker = match (is_current, queue.is_playing()) {
                (true, true) => "▶ ",
                (true, false) => "‖ ",
                _ => "  ",
            };
            let style = if is_current { playing_style(theme) } else { default_style() };
            ListItem::new(Line::from(vec![
                Span::styled(marker, style),
                Span::styled(item.title.clone(), style),
            ]))
        })
        .collect();

    let list = List::new(items).highlight_style(if focused {
        selected_style(theme)
    } else {
        default_style()
    });
    let mut state = ListState::default();
    state.select(Some(selected));
    f.render_stateful_widget(list, chunks[1], &mut state);
}

fn now_playing_line<'a>(app: &AppState, queue: &'a QueueController) -> Line<'a> {
    if let Some(error) = queue.last_error() {
        return Line::styled(error, error_style());
    }

    let mut spans = match queue.current_item() {
        Some(item) if queue.is_playing() => vec![Span::raw("Now playing: "), Span::raw(item.title.as_str())],
        Some(item) => vec![Span::raw("Paused: "), Span::raw(item.title.as_str())],
        None => vec![Span::styled(app.player_status(), hint_style())],
    };
    if let Some(volume) = queue.volume() {
        spans.push(Span::styled(format!("  vol {}%", volume), hint_style()));
    }
    Line::from(spans)
}
