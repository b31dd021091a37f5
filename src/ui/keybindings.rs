use crate::domain::FocusPane;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar for the focused pane
pub fn render_keybindings(f: &mut Frame, focus: FocusPane, area: Rect) {
    let mut hints = vec![Span::raw(" Tab pane   ")];
    match focus {
        FocusPane::Timer => hints.extend([
            Span::raw("Space start/pause   "),
            Span::raw("r reset   "),
            Span::raw("m sound   "),
            Span::raw("f movies   "),
        ]),
        FocusPane::Tasks => hints.extend([
            Span::raw("↑/↓ select   "),
            Span::raw("a add   "),
            Span::raw("Space done   "),
            Span::raw("x delete   "),
        ]),
        FocusPane::Music | FocusPane::Movies => hints.extend([
            Span::raw("↑/↓ select   "),
            Span::raw("Enter play   "),
            Span::raw("Space play/pause   "),
            Span::raw("n/p next/prev   "),
            Span::raw("a add   "),
            Span::raw("x remove   "),
        ]),
    }
    if focus == FocusPane::Music {
        hints.push(Span::raw("+/- volume   "));
    }
    hints.extend([
        Span::raw("s settings   "),
        Span::raw("t theme   "),
        Span::raw("q quit"),
    ]);

    let paragraph = Paragraph::new(Line::from(hints)).style(hint_style());
    f.render_widget(paragraph, area);
}
