pub mod config;
pub mod files;
pub mod store;

pub use config::{load_config, save_config, AppConfig};
pub use files::{config_file, ensure_dir, get_data_dir, init_local_data_dir, log_file};
pub use store::{
    load_record, persist_quietly, try_load_record, JsonFileStore, KeyValueStore, SharedStore,
    COLOR_THEME_KEY, TASK_LIST_KEY, TIMER_SETTINGS_KEY,
};
