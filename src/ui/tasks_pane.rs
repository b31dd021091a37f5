use crate::app::AppState;
use crate::domain::FocusPane;
use crate::ui::styles::{border_style, default_style, done_style, hint_style, selected_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Render the task checklist
pub fn render_tasks_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.ctx.theme();
    let focused = app.focus == FocusPane::Tasks;
    let (open, done) = app.tasks.counts();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(theme, focused))
        .title(Span::styled(
            format!(" Tasks {} open · {} done ", open, done),
            title_style(theme),
        ));

    if app.tasks.is_empty() {
        let empty = List::new(vec![ListItem::new(Line::styled(
            "No tasks yet. Press a to add one.",
            hint_style(),
        ))])
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .tasks
        .tasks()
        .iter()
        .map(|task| {
            let (mark, style) = if task.completed {
                ("[x] ", done_style())
            } else {
                ("[ ] ", default_style())
            };
            ListItem::new(Line::from(vec![
                Span::raw(mark),
                Span::styled(task.text.clone(), style),
            ]))
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(if focused {
        selected_style(theme)
    } else {
        default_style()
    });

    let mut state = ListState::default();
    state.select(Some(app.task_selected));
    f.render_stateful_widget(list, area, &mut state);
}
