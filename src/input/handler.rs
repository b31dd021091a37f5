use crate::app::{AppState, InputPurpose};
use crate::domain::{FocusPane, QueueVariant, TimerPreset, UiMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Volume step for the music queue
const VOLUME_STEP: i16 = 5;

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::Input => handle_input_form_mode(app, key),
        UiMode::Settings => handle_settings_mode(app, key),
        UiMode::ThemePicker => handle_theme_picker_mode(app, key),
        UiMode::Alert => {
            app.dismiss_alert();
            Ok(false)
        }
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(true),
        KeyCode::Tab => app.focus_next(),
        KeyCode::Char('s') => app.open_settings(),
        KeyCode::Char('t') => app.open_theme_picker(),
        KeyCode::Up => app.move_selection(-1),
        KeyCode::Down => app.move_selection(1),
        _ => match app.focus {
            FocusPane::Timer => handle_timer_key(app, key),
            FocusPane::Tasks => handle_tasks_key(app, key),
            FocusPane::Music => handle_queue_key(app, QueueVariant::Music, key),
            FocusPane::Movies => handle_queue_key(app, QueueVariant::Movies, key),
        },
    }
    Ok(false)
}

fn handle_timer_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_timer(),
        KeyCode::Char('r') => app.reset_timer(),
        KeyCode::Char('m') => app.timer.toggle_sound(),
        KeyCode::Char('f') => app.toggle_overlay(),
        _ => {}
    }
}

fn handle_tasks_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('a') => app.open_input(InputPurpose::Task),
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_selected_task(),
        KeyCode::Char('x') | KeyCode::Delete => app.remove_selected_task(),
        _ => {}
    }
}

fn handle_queue_key(app: &mut AppState, variant: QueueVariant, key: KeyEvent) {
    match key.code {
        KeyCode::Char('a') => app.open_input(InputPurpose::Media(variant)),
        KeyCode::Enter => app.play_selected(variant),
        KeyCode::Char(' ') => app.queue_mut(variant).toggle_play_pause(),
        KeyCode::Char('n') => app.queue_mut(variant).play_next(),
        KeyCode::Char('p') => app.queue_mut(variant).play_previous(),
        KeyCode::Char('x') | KeyCode::Delete => app.remove_selected_media(variant),
        KeyCode::Char('+') | KeyCode::Char('=') => app.queue_mut(variant).adjust_volume(VOLUME_STEP),
        KeyCode::Char('-') => app.queue_mut(variant).adjust_volume(-VOLUME_STEP),
        _ => {}
    }
}

/// Handle keys while the input form is open
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_input(),
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Backspace => app.input_backspace(),
        KeyCode::Char(c) => app.input_push(c),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the timer settings dialog
fn handle_settings_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('s') => app.close_settings(),
        KeyCode::Up | KeyCode::Char('k') => app.settings_move(-1),
        KeyCode::Down | KeyCode::Char('j') => app.settings_move(1),
        KeyCode::Left | KeyCode::Char('h') => app.settings_adjust(-1),
        KeyCode::Right | KeyCode::Char('l') => app.settings_adjust(1),
        KeyCode::Enter | KeyCode::Char(' ') => app.settings_confirm(),
        KeyCode::Char('b') => {
            let enabled = !app.timer.settings().movie_breaks_enabled;
            if let Err(e) = app.timer.set_movie_breaks(enabled) {
                app.show_alert(e.to_string());
            }
            app.sync_overlay();
        }
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            let preset = TimerPreset::all()[index];
            if preset == TimerPreset::Custom {
                if let Some(form) = app.settings_form.as_mut() {
                    form.selected = index;
                }
                app.settings_confirm();
            } else if let Err(e) = app.timer.apply_preset(preset) {
                app.show_alert(e.to_string());
            }
        }
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the theme picker
fn handle_theme_picker_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => app.ui_mode = UiMode::Normal,
        KeyCode::Up | KeyCode::Left | KeyCode::Char('k') => app.theme_move(-1),
        KeyCode::Down | KeyCode::Right | KeyCode::Char('j') => app.theme_move(1),
        KeyCode::Enter => app.confirm_theme(),
        _ => {}
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ColorTheme;
    use crate::notifications::SilentChime;
    use crate::persistence::store::memory::MemoryStore;
    use crate::persistence::AppConfig;
    use crate::playback::controller::fake::FakeFactory;
    use pretty_assertions::assert_eq;
    use std::rc::Rc;

    fn create_test_app() -> AppState {
        AppState::new(
            MemoryStore::shared(),
            &AppConfig::default(),
            Rc::new(FakeFactory::default()),
            Box::new(SilentChime),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_key(app, key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn test_quit_keys() {
        let mut app = create_test_app();
        assert!(handle_key(&mut app, key(KeyCode::Char('q'))).unwrap());
        assert!(handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)).unwrap());
    }

    #[test]
    fn test_space_toggles_timer() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char(' '))).unwrap();
        assert!(app.timer.is_running());
        handle_key(&mut app, key(KeyCode::Char(' '))).unwrap();
        assert!(!app.timer.is_running());
    }

    #[test]
    fn test_add_and_complete_task() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        assert_eq!(app.focus, FocusPane::Tasks);

        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::Input);
        type_text(&mut app, "write notes");
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.tasks.len(), 1);

        handle_key(&mut app, key(KeyCode::Char(' '))).unwrap();
        assert!(app.tasks.tasks()[0].completed);

        handle_key(&mut app, key(KeyCode::Char('x'))).unwrap();
        assert!(app.tasks.is_empty());
    }

    #[test]
    fn test_input_escape_discards() {
        let mut app = create_test_app();
        app.focus = FocusPane::Tasks;
        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        type_text(&mut app, "q");
        handle_key(&mut app, key(KeyCode::Esc)).unwrap();
        assert!(app.tasks.is_empty());
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_add_music_link_and_volume() {
        let mut app = create_test_app();
        app.focus = FocusPane::Music;
        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        type_text(&mut app, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();

        assert_eq!(app.music.len(), 1);
        assert_eq!(app.music.current_index(), Some(0));

        handle_key(&mut app, key(KeyCode::Char('-'))).unwrap();
        assert_eq!(app.music.volume(), Some(65));
    }

    #[test]
    fn test_settings_number_keys_pick_presets() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('s'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::Settings);

        handle_key(&mut app, key(KeyCode::Char('1'))).unwrap();
        assert_eq!(app.timer.settings().preset_id, TimerPreset::Short);
        assert_eq!(app.timer.remaining_seconds(), 25 * 60);

        handle_key(&mut app, key(KeyCode::Char('b'))).unwrap();
        assert!(app.timer.settings().movie_breaks_enabled);

        handle_key(&mut app, key(KeyCode::Esc)).unwrap();
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_theme_picker() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('t'))).unwrap();
        handle_key(&mut app, key(KeyCode::Down)).unwrap();
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.ctx.theme(), ColorTheme::all()[1]);
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_alert_dismissed_by_any_key() {
        let mut app = create_test_app();
        app.show_alert("Invalid YouTube URL: x".to_string());
        assert!(!handle_key(&mut app, key(KeyCode::Char('q'))).unwrap());
        assert_eq!(app.ui_mode, UiMode::Normal);
    }
}
