use super::enums::{TimerMode, TimerPreset};
use crate::notifications::Chime;
use crate::persistence::{load_record, persist_quietly, SharedStore, TIMER_SETTINGS_KEY};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bounds of the custom preset sliders, in minutes
pub const CUSTOM_WORK_MINUTES: (u32, u32, u32) = (5, 120, 5);
pub const CUSTOM_BREAK_MINUTES: (u32, u32, u32) = (1, 30, 1);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimerError {
    #[error("{0} duration must be greater than zero")]
    InvalidDuration(&'static str),
}

/// Persisted timer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSettings {
    pub work_duration_seconds: u32,
    pub break_duration_seconds: u32,
    pub preset_id: TimerPreset,
    pub movie_breaks_enabled: bool,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self::from_preset(TimerPreset::Long, false)
    }
}

impl TimerSettings {
    /// Settings for a fixed preset. `Custom` falls back to the default durations.
    pub fn from_preset(preset: TimerPreset, movie_breaks_enabled: bool) -> Self {
        let (work, brk) = preset.minutes().unwrap_or((50, 10));
        Self {
            work_duration_seconds: work * 60,
            break_duration_seconds: brk * 60,
            preset_id: preset,
            movie_breaks_enabled,
        }
    }

    /// Custom settings from minutes, clamped to the slider ranges
    pub fn custom(work_minutes: u32, break_minutes: u32, movie_breaks_enabled: bool) -> Self {
        let work = work_minutes.clamp(CUSTOM_WORK_MINUTES.0, CUSTOM_WORK_MINUTES.1);
        let brk = break_minutes.clamp(CUSTOM_BREAK_MINUTES.0, CUSTOM_BREAK_MINUTES.1);
        Self {
            work_duration_seconds: work * 60,
            break_duration_seconds: brk * 60,
            preset_id: TimerPreset::Custom,
            movie_breaks_enabled,
        }
    }

    pub fn validate(&self) -> Result<(), TimerError> {
        if self.work_duration_seconds == 0 {
            return Err(TimerError::InvalidDuration("Work"));
        }
        if self.break_duration_seconds == 0 {
            return Err(TimerError::InvalidDuration("Break"));
        }
        Ok(())
    }

    pub fn duration_for(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Work => self.work_duration_seconds,
            TimerMode::Break => self.break_duration_seconds,
        }
    }

    /// Load from the store, using defaults for missing or invalid records
    pub fn load(store: &SharedStore) -> Self {
        let settings: TimerSettings = load_record(store.as_ref(), TIMER_SETTINGS_KEY);
        match settings.validate() {
            Ok(()) => settings,
            Err(e) => {
                tracing::warn!("Ignoring stored timer settings: {}", e);
                Self::default()
            }
        }
    }
}

/// A completed work or break period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeChange {
    pub from: TimerMode,
    pub to: TimerMode,
}

/// Work/break countdown that cycles until paused
pub struct TimerEngine {
    settings: TimerSettings,
    mode: TimerMode,
    remaining_seconds: u32,
    is_running: bool,
    sound_enabled: bool,
    overlay_visible: bool,
    chime: Box<dyn Chime>,
    store: SharedStore,
}

impl TimerEngine {
    /// Create the engine from stored settings, idle at the start of a work period
    pub fn new(store: SharedStore, chime: Box<dyn Chime>, sound_enabled: bool) -> Self {
        let settings = TimerSettings::load(&store);
        Self {
            remaining_seconds: settings.work_duration_seconds,
            settings,
            mode: TimerMode::Work,
            is_running: false,
            sound_enabled,
            overlay_visible: false,
            chime,
            store,
        }
    }

    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    /// Whether the break-time movie queue should be shown
    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    pub fn start(&mut self) {
        if !self.is_running {
            self.is_running = true;
            tracing::debug!("Timer started in {:?} mode", self.mode);
        }
    }

    pub fn pause(&mut self) {
        self.is_running = false;
    }

    pub fn toggle(&mut self) {
        if self.is_running {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Back to an idle work period at full length
    pub fn reset(&mut self) {
        self.mode = TimerMode::Work;
        self.remaining_seconds = self.settings.work_duration_seconds;
        self.is_running = false;
        self.overlay_visible = false;
    }

    pub fn toggle_sound(&mut self) {
        self.sound_enabled = !self.sound_enabled;
    }

    /// Replace the settings. Always stops the countdown and re-arms the
    /// current mode with its new duration.
    pub fn apply_settings(&mut self, settings: TimerSettings) -> Result<(), TimerError> {
        settings.validate()?;
        self.settings = settings;
        persist_quietly(self.store.as_ref(), TIMER_SETTINGS_KEY, &self.settings);

        self.is_running = false;
        self.remaining_seconds = self.settings.duration_for(self.mode);
        if !self.settings.movie_breaks_enabled {
            self.overlay_visible = false;
        }
        tracing::info!(
            "Timer settings applied: {:?} {}s/{}s",
            self.settings.preset_id,
            self.settings.work_duration_seconds,
            self.settings.break_duration_seconds
        );
        Ok(())
    }

    /// Switch to a fixed preset, keeping the movie-break choice
    pub fn apply_preset(&mut self, preset: TimerPreset) -> Result<(), TimerError> {
        let settings = TimerSettings::from_preset(preset, self.settings.movie_breaks_enabled);
        self.apply_settings(settings)
    }

    pub fn apply_custom(&mut self, work_minutes: u32, break_minutes: u32) -> Result<(), TimerError> {
        let settings =
            TimerSettings::custom(work_minutes, break_minutes, self.settings.movie_breaks_enabled);
        self.apply_settings(settings)
    }

    /// Enable or disable movie breaks. Goes through `apply_settings`, so it stops the timer.
    pub fn set_movie_breaks(&mut self, enabled: bool) -> Result<(), TimerError> {
        let settings = TimerSettings {
            movie_breaks_enabled: enabled,
            ..self.settings
        };
        self.apply_settings(settings)
    }

    /// Show or hide the movie queue by hand; only meaningful during a movie break
    pub fn toggle_overlay(&mut self) {
        if self.mode == TimerMode::Break && self.settings.movie_breaks_enabled {
            self.overlay_visible = !self.overlay_visible;
        }
    }

    /// Advance the countdown by one second. Returns the mode change when a period expired.
    pub fn tick(&mut self) -> Option<ModeChange> {
        if !self.is_running {
            return None;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds > 0 {
            return None;
        }

        self.ring_chime();

        let from = self.mode;
        let to = from.other();
        self.mode = to;
        self.remaining_seconds = self.settings.duration_for(to);
        self.overlay_visible = match to {
            TimerMode::Break => self.settings.movie_breaks_enabled,
            TimerMode::Work => false,
        };
        tracing::info!("Timer period finished: {:?} -> {:?}", from, to);

        Some(ModeChange { from, to })
    }

    fn ring_chime(&mut self) {
        if !self.sound_enabled {
            return;
        }
        if let Err(e) = self.chime.ring() {
            tracing::warn!("Error playing sound: {}", e);
        }
    }

    /// Fraction of the current period already elapsed, in [0, 1]
    pub fn progress(&self) -> f64 {
        let total = self.settings.duration_for(self.mode);
        if total == 0 {
            return 1.0;
        }
        let elapsed = total.saturating_sub(self.remaining_seconds) as f64;
        (elapsed / total as f64).clamp(0.0, 1.0)
    }

    /// Remaining time as `MM:SS`
    pub fn format_remaining(&self) -> String {
        format_countdown(self.remaining_seconds)
    }
}

/// Format seconds as zero-padded `MM:SS` (minutes may exceed 59)
pub fn format_countdown(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::ChimeError;
    use crate::persistence::store::memory::MemoryStore;
    use crate::persistence::try_load_record;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingChime {
        rings: Rc<Cell<u32>>,
        fail: bool,
    }

    impl Chime for CountingChime {
        fn ring(&mut self) -> Result<(), ChimeError> {
            self.rings.set(self.rings.get() + 1);
            if self.fail {
                Err(ChimeError::Blocked("autoplay denied".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn engine_with(settings: TimerSettings, fail: bool) -> (TimerEngine, Rc<Cell<u32>>, Rc<MemoryStore>) {
        let store = MemoryStore::shared();
        let rings = Rc::new(Cell::new(0));
        let chime = CountingChime { rings: rings.clone(), fail };
        let mut engine = TimerEngine::new(store.clone(), Box::new(chime), true);
        engine.apply_settings(settings).unwrap();
        (engine, rings, store)
    }

    fn settings(work: u32, brk: u32, movies: bool) -> TimerSettings {
        TimerSettings {
            work_duration_seconds: work,
            break_duration_seconds: brk,
            preset_id: TimerPreset::Custom,
            movie_breaks_enabled: movies,
        }
    }

    #[test]
    fn test_new_engine_uses_defaults() {
        let engine = TimerEngine::new(MemoryStore::shared(), Box::new(crate::notifications::SilentChime), true);
        assert_eq!(engine.settings(), &TimerSettings::default());
        assert_eq!(engine.mode(), TimerMode::Work);
        assert_eq!(engine.remaining_seconds(), 50 * 60);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_invalid_stored_settings_fall_back() {
        let store = MemoryStore::shared();
        store.put_raw(
            TIMER_SETTINGS_KEY,
            r#"{"workDurationSeconds":0,"breakDurationSeconds":60,"presetId":"custom","movieBreaksEnabled":false}"#,
        );
        let engine = TimerEngine::new(store, Box::new(crate::notifications::SilentChime), true);
        assert_eq!(engine.settings(), &TimerSettings::default());
    }

    #[test]
    fn test_tick_when_idle_does_nothing() {
        let (mut engine, _, _) = engine_with(settings(10, 5, false), false);
        assert_eq!(engine.tick(), None);
        assert_eq!(engine.remaining_seconds(), 10);
    }

    #[test]
    fn test_work_expiry_switches_to_break_and_keeps_running() {
        let (mut engine, rings, _) = engine_with(settings(1500, 300, false), false);
        engine.remaining_seconds = 1;
        engine.start();

        let change = engine.tick();

        assert_eq!(change, Some(ModeChange { from: TimerMode::Work, to: TimerMode::Break }));
        assert_eq!(engine.mode(), TimerMode::Break);
        assert_eq!(engine.remaining_seconds(), 300);
        assert!(engine.is_running());
        assert_eq!(rings.get(), 1);
        assert!(!engine.overlay_visible());
    }

    #[test]
    fn test_break_expiry_switches_back_to_work() {
        let (mut engine, _, _) = engine_with(settings(3, 2, true), false);
        engine.start();
        for _ in 0..3 {
            engine.tick();
        }
        assert_eq!(engine.mode(), TimerMode::Break);
        assert!(engine.overlay_visible());

        engine.tick();
        let change = engine.tick();
        assert_eq!(change, Some(ModeChange { from: TimerMode::Break, to: TimerMode::Work }));
        assert_eq!(engine.remaining_seconds(), 3);
        assert!(!engine.overlay_visible());
        assert!(engine.is_running());
    }

    #[test]
    fn test_chime_failure_does_not_block_transition() {
        let (mut engine, rings, _) = engine_with(settings(1, 4, false), true);
        engine.start();

        assert!(engine.tick().is_some());
        assert_eq!(rings.get(), 1);
        assert_eq!(engine.mode(), TimerMode::Break);
        assert_eq!(engine.remaining_seconds(), 4);
    }

    #[test]
    fn test_sound_disabled_skips_chime() {
        let (mut engine, rings, _) = engine_with(settings(1, 4, false), false);
        engine.toggle_sound();
        engine.start();
        engine.tick();
        assert_eq!(rings.get(), 0);
    }

    #[test]
    fn test_apply_settings_stops_and_rearms_current_mode() {
        let (mut engine, _, store) = engine_with(settings(2, 300, false), false);
        engine.start();
        engine.tick();
        engine.tick();
        assert_eq!(engine.mode(), TimerMode::Break);
        assert!(engine.is_running());

        engine.apply_settings(settings(600, 120, false)).unwrap();

        assert!(!engine.is_running());
        assert_eq!(engine.mode(), TimerMode::Break);
        assert_eq!(engine.remaining_seconds(), 120);
        let stored: Option<TimerSettings> = try_load_record(store.as_ref(), TIMER_SETTINGS_KEY).unwrap();
        assert_eq!(stored, Some(settings(600, 120, false)));
    }

    #[test]
    fn test_apply_settings_when_idle_stays_idle() {
        let (mut engine, _, _) = engine_with(settings(60, 30, false), false);
        engine.apply_settings(settings(90, 30, false)).unwrap();
        assert!(!engine.is_running());
        assert_eq!(engine.remaining_seconds(), 90);
    }

    #[test]
    fn test_apply_settings_rejects_zero_duration() {
        let (mut engine, _, _) = engine_with(settings(60, 30, false), false);
        engine.start();
        assert_eq!(
            engine.apply_settings(settings(0, 30, false)),
            Err(TimerError::InvalidDuration("Work"))
        );
        assert!(engine.is_running());
        assert_eq!(engine.settings().work_duration_seconds, 60);
    }

    #[test]
    fn test_preset_keeps_movie_breaks() {
        let (mut engine, _, _) = engine_with(settings(60, 30, true), false);
        engine.apply_preset(TimerPreset::Short).unwrap();
        assert_eq!(engine.settings(), &TimerSettings::from_preset(TimerPreset::Short, true));
        assert_eq!(engine.remaining_seconds(), 25 * 60);
    }

    #[test]
    fn test_custom_minutes_are_clamped() {
        let custom = TimerSettings::custom(500, 0, false);
        assert_eq!(custom.work_duration_seconds, 120 * 60);
        assert_eq!(custom.break_duration_seconds, 60);
        assert_eq!(custom.preset_id, TimerPreset::Custom);
    }

    #[test]
    fn test_disabling_movie_breaks_hides_overlay() {
        let (mut engine, _, _) = engine_with(settings(1, 30, true), false);
        engine.start();
        engine.tick();
        assert!(engine.overlay_visible());

        engine.set_movie_breaks(false).unwrap();
        assert!(!engine.overlay_visible());
        assert!(!engine.is_running());
    }

    #[test]
    fn test_toggle_overlay_only_during_movie_break() {
        let (mut engine, _, _) = engine_with(settings(1, 30, true), false);
        engine.toggle_overlay();
        assert!(!engine.overlay_visible());

        engine.start();
        engine.tick();
        engine.toggle_overlay();
        assert!(!engine.overlay_visible());
        engine.toggle_overlay();
        assert!(engine.overlay_visible());
    }

    #[test]
    fn test_reset_returns_to_idle_work() {
        let (mut engine, _, _) = engine_with(settings(1, 30, true), false);
        engine.start();
        engine.tick();
        engine.tick();

        engine.reset();

        assert_eq!(engine.mode(), TimerMode::Work);
        assert_eq!(engine.remaining_seconds(), 1);
        assert!(!engine.is_running());
        assert!(!engine.overlay_visible());
    }

    #[test]
    fn test_start_pause_toggle() {
        let (mut engine, _, _) = engine_with(settings(60, 30, false), false);
        engine.start();
        engine.start();
        assert!(engine.is_running());
        engine.toggle();
        assert!(!engine.is_running());
        engine.toggle();
        assert!(engine.is_running());
        engine.pause();
        assert!(!engine.is_running());
    }

    #[test]
    fn test_progress_and_format() {
        let (mut engine, _, _) = engine_with(settings(100, 30, false), false);
        assert_eq!(engine.progress(), 0.0);
        engine.start();
        for _ in 0..25 {
            engine.tick();
        }
        assert!((engine.progress() - 0.25).abs() < f64::EPSILON);
        assert_eq!(engine.format_remaining(), "01:15");
        assert_eq!(format_countdown(90 * 60), "90:00");
    }
}
