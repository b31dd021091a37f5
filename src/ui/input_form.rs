use crate::app::{AppState, InputPurpose};
use crate::domain::QueueVariant;
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the single-line input form for tasks and media links
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(form) = &app.input_form {
        let modal_area = create_modal_area(area);

        // Clear the area behind the form
        f.render_widget(Clear, modal_area);

        let (title_text, label) = match form.purpose {
            InputPurpose::Task => (" Add Task ", "What do you want to get done?"),
            InputPurpose::Media(QueueVariant::Music) => (" Add Music ", "YouTube link:"),
            InputPurpose::Media(QueueVariant::Movies) => (" Add Movie ", "YouTube link:"),
        };

        let lines = vec![
            Line::raw(""),
            Line::raw(label),
            Line::from(vec![
                Span::raw("> "),
                Span::styled(form.text.as_str(), modal_title_style()),
                Span::styled("█", modal_title_style()),
            ]),
            Line::raw(""),
            Line::raw("Enter to submit  ·  Esc to cancel"),
        ];

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(title_text, modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}
