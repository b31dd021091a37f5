pub mod clock_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod modal;
pub mod queue_pane;
pub mod styles;
pub mod tasks_pane;
pub mod timer_pane;

use crate::app::AppState;
use crate::domain::{QueueVariant, UiMode};
use clock_pane::render_clock_pane;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use modal::{render_alert, render_settings, render_theme_picker};
use queue_pane::render_queue_pane;
use ratatui::{text::Line, widgets::Paragraph, Frame};
use styles::hint_style;
use tasks_pane::render_tasks_pane;
use timer_pane::render_timer_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size, app.movies.is_mounted());

    render_keybindings(f, app.focus, layout.keybindings_area);
    render_clock_pane(f, app, layout.header_area);

    render_timer_pane(f, app, layout.timer_area);
    render_tasks_pane(f, app, layout.tasks_area);
    render_queue_pane(f, app, QueueVariant::Music, layout.music_area);
    if let Some(movies_area) = layout.movies_area {
        render_queue_pane(f, app, QueueVariant::Movies, movies_area);
    }

    let status = app.status.as_deref().unwrap_or("");
    let status_line = Line::raw(format!(" {}  ·  {}", app.player_status(), status));
    f.render_widget(Paragraph::new(status_line).style(hint_style()), layout.status_area);

    match app.ui_mode {
        UiMode::Input => render_input_form(f, app, size),
        UiMode::Settings => render_settings(f, app, size),
        UiMode::ThemePicker => render_theme_picker(f, app, size),
        UiMode::Alert => render_alert(f, app, size),
        UiMode::Normal => {}
    }
}
