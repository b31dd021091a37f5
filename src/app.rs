use crate::context::{PageContext, PlayerApiState};
use crate::domain::timer::{CUSTOM_BREAK_MINUTES, CUSTOM_WORK_MINUTES};
use crate::domain::{ColorTheme, FocusPane, QueueVariant, TaskList, TimerEngine, TimerMode, TimerPreset, UiMode};
use crate::notifications::{self, Chime};
use crate::persistence::{AppConfig, SharedStore};
use crate::playback::{PlayerFactory, QueueController};
use crate::ticker::SecondTicker;
use chrono::{DateTime, Local};
use std::rc::Rc;
use std::time::Instant;

/// What the single-line input form is collecting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPurpose {
    Task,
    Media(QueueVariant),
}

/// Input form state for adding tasks and media links
#[derive(Debug, Clone)]
pub struct InputFormState {
    pub purpose: InputPurpose,
    pub text: String,
}

/// Rows of the timer settings dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsRow {
    Preset(TimerPreset),
    WorkMinutes,
    BreakMinutes,
    MovieBreaks,
}

impl SettingsRow {
    pub fn all() -> [SettingsRow; 7] {
        [
            SettingsRow::Preset(TimerPreset::Short),
            SettingsRow::Preset(TimerPreset::Long),
            SettingsRow::Preset(TimerPreset::Deep),
            SettingsRow::Preset(TimerPreset::Custom),
            SettingsRow::WorkMinutes,
            SettingsRow::BreakMinutes,
            SettingsRow::MovieBreaks,
        ]
    }
}

/// Timer settings dialog state
#[derive(Debug, Clone)]
pub struct SettingsFormState {
    pub selected: usize,
    pub custom_work_minutes: u32,
    pub custom_break_minutes: u32,
}

impl SettingsFormState {
    pub fn row(&self) -> SettingsRow {
        SettingsRow::all()[self.selected]
    }
}

/// Main application state
pub struct AppState {
    pub ctx: PageContext,
    pub timer: TimerEngine,
    pub tasks: TaskList,
    pub music: QueueController,
    pub movies: QueueController,
    pub ticker: SecondTicker,
    pub focus: FocusPane,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
    pub settings_form: Option<SettingsFormState>,
    pub theme_cursor: usize,
    pub alert: Option<String>,
    pub status: Option<String>,
    pub task_selected: usize,
    pub music_selected: usize,
    pub movie_selected: usize,
    pub now: DateTime<Local>,
}

impl AppState {
    pub fn new(
        store: SharedStore,
        config: &AppConfig,
        factory: Rc<dyn PlayerFactory>,
        chime: Box<dyn Chime>,
    ) -> Self {
        let ctx = PageContext::load(store.clone());
        let timer = TimerEngine::new(store.clone(), chime, config.sound_enabled);
        let tasks = TaskList::load(store.clone());
        let music = QueueController::new(QueueVariant::Music, store.clone(), factory.clone(), config.default_volume);
        let movies = QueueController::new(QueueVariant::Movies, store, factory, config.default_volume);

        Self {
            theme_cursor: ctx.theme().index(),
            ctx,
            timer,
            tasks,
            music,
            movies,
            ticker: SecondTicker::new(Instant::now()),
            focus: FocusPane::Timer,
            ui_mode: UiMode::Normal,
            input_form: None,
            settings_form: None,
            alert: None,
            status: None,
            task_selected: 0,
            music_selected: 0,
            movie_selected: 0,
            now: Local::now(),
        }
    }

    /// Show the always-visible widgets
    pub fn start(&mut self) {
        self.music.mount(&self.ctx);
    }

    /// Release playback surfaces before exit
    pub fn shutdown(&mut self) {
        self.music.unmount();
        self.movies.unmount();
    }

    /// Advance clocks and drain notifications; called on every loop iteration
    pub fn tick(&mut self, now: Instant) {
        for _ in 0..self.ticker.due(now) {
            if let Some(change) = self.timer.tick() {
                notifications::notify_mode_change(change.to);
                self.status = Some(match change.to {
                    TimerMode::Break => "Focus period done, take a break".to_string(),
                    TimerMode::Work => "Break over, back to focus".to_string(),
                });
            }
        }
        self.sync_overlay();
        self.music.pump();
        self.movies.pump();
        self.clamp_selections();
        self.now = Local::now();
    }

    /// Mount the movie queue while the timer asks for it, tear it down otherwise
    pub fn sync_overlay(&mut self) {
        let visible = self.timer.overlay_visible();
        if visible && !self.movies.is_mounted() {
            self.movies.mount(&self.ctx);
        } else if !visible && self.movies.is_mounted() {
            self.movies.unmount();
        }
        if !visible && self.focus == FocusPane::Movies {
            self.focus = FocusPane::Timer;
        }
    }

    /// Human-readable player availability, for the status line
    pub fn player_status(&self) -> &'static str {
        match self.ctx.player_api() {
            PlayerApiState::NotRequested => "player idle",
            PlayerApiState::Loading => "player loading",
            PlayerApiState::Ready => "player ready",
            PlayerApiState::Unavailable(_) => "player unavailable",
        }
    }

    fn clamp_selections(&mut self) {
        self.task_selected = self.task_selected.min(self.tasks.len().saturating_sub(1));
        self.music_selected = self.music_selected.min(self.music.len().saturating_sub(1));
        self.movie_selected = self.movie_selected.min(self.movies.len().saturating_sub(1));
    }

    // ---- focus -------------------------------------------------------------

    pub fn focus_next(&mut self) {
        let mut panes = vec![FocusPane::Timer, FocusPane::Tasks, FocusPane::Music];
        if self.timer.overlay_visible() {
            panes.push(FocusPane::Movies);
        }
        let index = panes.iter().position(|p| *p == self.focus).unwrap_or(0);
        self.focus = panes[(index + 1) % panes.len()];
    }

    // ---- timer -------------------------------------------------------------

    pub fn toggle_timer(&mut self) {
        if !self.timer.is_running() {
            self.ticker.restart(Instant::now());
        }
        self.timer.toggle();
    }

    pub fn reset_timer(&mut self) {
        self.timer.reset();
        self.status = None;
        self.sync_overlay();
    }

    pub fn toggle_overlay(&mut self) {
        self.timer.toggle_overlay();
        self.sync_overlay();
    }

    // ---- settings dialog ---------------------------------------------------

    pub fn open_settings(&mut self) {
        let settings = self.timer.settings();
        let selected = SettingsRow::all()
            .iter()
            .position(|row| *row == SettingsRow::Preset(settings.preset_id))
            .unwrap_or(0);
        self.settings_form = Some(SettingsFormState {
            selected,
            custom_work_minutes: settings.work_duration_seconds / 60,
            custom_break_minutes: settings.break_duration_seconds / 60,
        });
        self.ui_mode = UiMode::Settings;
    }

    pub fn close_settings(&mut self) {
        self.settings_form = None;
        self.ui_mode = UiMode::Normal;
    }

    pub fn settings_move(&mut self, delta: isize) {
        if let Some(form) = self.settings_form.as_mut() {
            let rows = SettingsRow::all().len() as isize;
            form.selected = (form.selected as isize + delta).rem_euclid(rows) as usize;
        }
    }

    /// Step the custom minutes on the selected row
    pub fn settings_adjust(&mut self, direction: i32) {
        let Some(form) = self.settings_form.as_mut() else {
            return;
        };
        match form.row() {
            SettingsRow::WorkMinutes => {
                let (min, max, step) = CUSTOM_WORK_MINUTES;
                form.custom_work_minutes = step_minutes(form.custom_work_minutes, direction, min, max, step);
            }
            SettingsRow::BreakMinutes => {
                let (min, max, step) = CUSTOM_BREAK_MINUTES;
                form.custom_break_minutes = step_minutes(form.custom_break_minutes, direction, min, max, step);
            }
            _ => {}
        }
    }

    /// Apply the selected row. Every applied change stops the timer.
    pub fn settings_confirm(&mut self) {
        let Some(form) = self.settings_form.clone() else {
            return;
        };
        let result = match form.row() {
            SettingsRow::Preset(TimerPreset::Custom) | SettingsRow::WorkMinutes | SettingsRow::BreakMinutes => self
                .timer
                .apply_custom(form.custom_work_minutes, form.custom_break_minutes),
            SettingsRow::Preset(preset) => self.timer.apply_preset(preset),
            SettingsRow::MovieBreaks => {
                let enabled = !self.timer.settings().movie_breaks_enabled;
                self.timer.set_movie_breaks(enabled)
            }
        };
        if let Err(e) = result {
            self.show_alert(e.to_string());
            return;
        }
        self.sync_overlay();
    }

    // ---- theme picker ------------------------------------------------------

    pub fn open_theme_picker(&mut self) {
        self.theme_cursor = self.ctx.theme().index();
        self.ui_mode = UiMode::ThemePicker;
    }

    pub fn theme_move(&mut self, delta: isize) {
        let count = ColorTheme::all().len() as isize;
        self.theme_cursor = (self.theme_cursor as isize + delta).rem_euclid(count) as usize;
    }

    pub fn confirm_theme(&mut self) {
        if let Some(theme) = ColorTheme::all().get(self.theme_cursor) {
            self.ctx.set_theme(*theme);
        }
        self.ui_mode = UiMode::Normal;
    }

    // ---- input form --------------------------------------------------------

    pub fn open_input(&mut self, purpose: InputPurpose) {
        self.input_form = Some(InputFormState {
            purpose,
            text: String::new(),
        });
        self.ui_mode = UiMode::Input;
    }

    pub fn cancel_input(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    pub fn input_push(&mut self, c: char) {
        if let Some(form) = self.input_form.as_mut() {
            form.text.push(c);
        }
    }

    pub fn input_backspace(&mut self) {
        if let Some(form) = self.input_form.as_mut() {
            form.text.pop();
        }
    }

    /// Submit the form. Blank input just closes it.
    pub fn submit_input(&mut self) {
        let Some(form) = self.input_form.take() else {
            return;
        };
        self.ui_mode = UiMode::Normal;
        if form.text.trim().is_empty() {
            return;
        }

        match form.purpose {
            InputPurpose::Task => {
                if let Err(e) = self.tasks.add(&form.text) {
                    self.show_alert(e.to_string());
                } else {
                    self.task_selected = self.tasks.len() - 1;
                }
            }
            InputPurpose::Media(variant) => {
                if let Err(e) = self.queue_mut(variant).add_item(&form.text) {
                    self.show_alert(e.to_string());
                }
            }
        }
    }

    // ---- alert -------------------------------------------------------------

    pub fn show_alert(&mut self, message: String) {
        tracing::info!("Alert: {}", message);
        self.alert = Some(message);
        self.ui_mode = UiMode::Alert;
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
        self.ui_mode = UiMode::Normal;
    }

    // ---- tasks -------------------------------------------------------------

    pub fn move_selection(&mut self, delta: isize) {
        let (selected, len) = match self.focus {
            FocusPane::Tasks => (&mut self.task_selected, self.tasks.len()),
            FocusPane::Music => (&mut self.music_selected, self.music.len()),
            FocusPane::Movies => (&mut self.movie_selected, self.movies.len()),
            FocusPane::Timer => return,
        };
        if len == 0 {
            *selected = 0;
            return;
        }
        *selected = (*selected as isize + delta).clamp(0, len as isize - 1) as usize;
    }

    pub fn toggle_selected_task(&mut self) {
        if let Some(id) = self.tasks.tasks().get(self.task_selected).map(|t| t.id.clone()) {
            if let Err(e) = self.tasks.toggle(&id) {
                tracing::warn!("{}", e);
            }
        }
    }

    pub fn remove_selected_task(&mut self) {
        if let Some(id) = self.tasks.tasks().get(self.task_selected).map(|t| t.id.clone()) {
            if let Err(e) = self.tasks.remove(&id) {
                tracing::warn!("{}", e);
            }
            self.clamp_selections();
        }
    }

    // ---- queues ------------------------------------------------------------

    pub fn queue_mut(&mut self, variant: QueueVariant) -> &mut QueueController {
        match variant {
            QueueVariant::Music => &mut self.music,
            QueueVariant::Movies => &mut self.movies,
        }
    }

    /// Queue under keyboard focus
    pub fn focused_queue(&self) -> Option<QueueVariant> {
        match self.focus {
            FocusPane::Music => Some(QueueVariant::Music),
            FocusPane::Movies => Some(QueueVariant::Movies),
            _ => None,
        }
    }

    fn queue_selection(&self, variant: QueueVariant) -> usize {
        match variant {
            QueueVariant::Music => self.music_selected,
            QueueVariant::Movies => self.movie_selected,
        }
    }

    pub fn play_selected(&mut self, variant: QueueVariant) {
        let index = self.queue_selection(variant);
        let queue = self.queue_mut(variant);
        if queue.is_empty() {
            return;
        }
        if let Err(e) = queue.select_and_play(index) {
            tracing::warn!("{}", e);
        }
    }

    pub fn remove_selected_media(&mut self, variant: QueueVariant) {
        let index = self.queue_selection(variant);
        let queue = self.queue_mut(variant);
        if queue.is_empty() {
            return;
        }
        if let Err(e) = queue.remove_item(index) {
            tracing::warn!("{}", e);
        }
        self.clamp_selections();
    }
}

fn step_minutes(value: u32, direction: i32, min: u32, max: u32, step: u32) -> u32 {
    let next = if direction < 0 {
        value.saturating_sub(step)
    } else {
        value.saturating_add(step)
    };
    next.clamp(min, max)
}
