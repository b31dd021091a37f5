use super::files::{atomic_write, ensure_dir, read_file};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Store key for the interval timer settings
pub const TIMER_SETTINGS_KEY: &str = "timerSettings";
/// Store key for the task list
pub const TASK_LIST_KEY: &str = "taskList";
/// Store key for the colour theme
pub const COLOR_THEME_KEY: &str = "colorTheme";

/// Durable string records addressed by key. Each key is independent:
/// there is no transaction spanning several keys.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Store handle shared by every widget of the dashboard
pub type SharedStore = Rc<dyn KeyValueStore>;

/// One JSON file per key inside the data directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = ensure_dir(dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing a key. `playbackQueue:music` becomes `playbackQueue-music.json`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '-' })
            .collect();
        self.dir.join(format!("{}.json", file_name))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        read_file(self.path_for(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        atomic_write(self.path_for(key), value)
    }
}

/// Read and decode a record. Absent records yield `Ok(None)`.
pub fn try_load_record<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.get(key)? {
        Some(raw) => {
            let value = serde_json::from_str(&raw)
                .with_context(|| format!("Malformed record for key '{}'", key))?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

/// Read a record, falling back to the default when it is absent or unreadable
pub fn load_record<T: DeserializeOwned + Default>(store: &dyn KeyValueStore, key: &str) -> T {
    match try_load_record(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!("Falling back to default for '{}': {:#}", key, e);
            T::default()
        }
    }
}

/// Encode and write a record
pub fn save_record<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    store
        .set(key, &json)
        .with_context(|| format!("Failed to save record '{}'", key))
}

/// Write a record, logging instead of failing. Widgets persist on every
/// change and must keep working when the disk does not cooperate.
pub fn persist_quietly<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) {
    if let Err(e) = save_record(store, key, value) {
        tracing::warn!("{:#}", e);
    }
}
