pub mod clock;
pub mod enums;
pub mod media;
pub mod task;
pub mod timer;

pub use clock::{format_kanji_date, format_time};
pub use enums::{ColorTheme, FocusPane, QueueVariant, TimerMode, TimerPreset, UiMode};
pub use media::{extract_id, watch_url, MediaItem};
pub use task::{Task, TaskError, TaskList};
pub use timer::{format_countdown, ModeChange, TimerEngine, TimerError, TimerSettings};
