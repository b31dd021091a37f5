use super::files::atomic_write;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// User configuration stored in config.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Ring the chime when a work or break period ends
    #[serde(default = "default_true")]
    pub sound_enabled: bool,

    /// Media player program used for music and movies
    #[serde(default = "default_player_command")]
    pub player_command: String,

    /// Command used as the expiry chime. Empty means the terminal bell.
    #[serde(default)]
    pub chime_command: Vec<String>,

    /// Initial music volume, 0-100
    #[serde(default = "default_volume")]
    pub default_volume: u8,
}

fn default_true() -> bool {
    true
}

fn default_player_command() -> String {
    "mpv".to_string()
}

fn default_volume() -> u8 {
    70
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            player_command: default_player_command(),
            chime_command: Vec::new(),
            default_volume: default_volume(),
        }
    }
}

/// Load config from config.json, defaults when the file is missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let mut config: AppConfig = serde_json::from_str(&content)
        .with_context(|| format!("Invalid config: {}", path.display()))?;
    config.default_volume = config.default_volume.min(100);
    Ok(config)
}

/// Save config to config.json
pub fn save_config<P: AsRef<Path>>(path: P, config: &AppConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    atomic_write(path, &json)?;
    Ok(())
}
