use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub header_area: Rect,
    pub timer_area: Rect,
    pub tasks_area: Rect,
    pub music_area: Rect,
    pub movies_area: Option<Rect>,
    pub status_area: Rect,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Header: clock and date (3 rows)
/// - Main area: Timer above Tasks (55%) | Music, with Movies below it during a movie break (45%)
/// - Bottom bar: status line (1 row)
pub fn create_layout(area: Rect, show_movies: bool) -> MainLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Length(3), // Clock header
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status line
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(55), // Timer + tasks
            Constraint::Percentage(45), // Queues
        ])
        .split(main_chunks[2]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9), // Timer pane
            Constraint::Min(0),    // Tasks pane
        ])
        .split(columns[0]);

    let (music_area, movies_area) = if show_movies {
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(45), // Music pane
                Constraint::Percentage(55), // Movies pane
            ])
            .split(columns[1]);
        (right[0], Some(right[1]))
    } else {
        (columns[1], None)
    };

    MainLayout {
        keybindings_area: main_chunks[0],
        header_area: main_chunks[1],
        timer_area: left[0],
        tasks_area: left[1],
        music_area,
        movies_area,
        status_area: main_chunks[3],
    }
}

/// Create centered modal area
pub fn create_modal_area(area: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(16),
            Constraint::Percentage(25),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_layout() {
        let area = Rect::new(0, 0, 100, 50);
        let layout = create_layout(area, false);

        assert_eq!(layout.keybindings_area.height, 1);
        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.timer_area.height, 9);
        assert!(layout.tasks_area.height > 0);
        assert!(layout.movies_area.is_none());
        assert_eq!(layout.music_area.height, layout.timer_area.height + layout.tasks_area.height);

        let with_movies = create_layout(area, true);
        let movies = with_movies.movies_area.unwrap();
        assert!(movies.height > 0);
        assert_eq!(movies.x, with_movies.music_area.x);
        assert!(with_movies.music_area.height < layout.music_area.height);
    }

    #[test]
    fn test_create_modal_area() {
        let area = Rect::new(0, 0, 100, 50);
        let modal = create_modal_area(area);

        assert!(modal.width < area.width);
        assert!(modal.height < area.height);
        assert_eq!(modal.height, 16);
    }
}
