use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Phase of the interval timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    Work,
    Break,
}

impl TimerMode {
    /// The mode that follows this one when the countdown expires
    pub fn other(&self) -> Self {
        match self {
            Self::Work => Self::Break,
            Self::Break => Self::Work,
        }
    }

    /// Label shown under the countdown
    pub fn label(&self) -> &'static str {
        match self {
            Self::Work => "focus",
            Self::Break => "break",
        }
    }
}

/// Timer preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPreset {
    /// 25 / 5 minutes
    Short,
    /// 50 / 10 minutes
    Long,
    /// 90 / 20 minutes
    Deep,
    Custom,
}

impl TimerPreset {
    /// Work and break minutes for the fixed presets
    pub fn minutes(&self) -> Option<(u32, u32)> {
        match self {
            Self::Short => Some((25, 5)),
            Self::Long => Some((50, 10)),
            Self::Deep => Some((90, 20)),
            Self::Custom => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Short => "25/5 (Pomodoro)",
            Self::Long => "50/10 (Extended)",
            Self::Deep => "90/20 (Deep Work)",
            Self::Custom => "Custom",
        }
    }

    pub fn all() -> &'static [TimerPreset] {
        &[Self::Short, Self::Long, Self::Deep, Self::Custom]
    }
}

/// Colour theme applied to the whole dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    #[default]
    Green,
    Blue,
    Purple,
    Red,
    Cyan,
    Amber,
    Teal,
    Indigo,
    Pink,
    Emerald,
    Sky,
    Violet,
    Rose,
    Gray,
    Slate,
    Zinc,
    Neutral,
    Stone,
}

impl ColorTheme {
    /// All themes, vibrant first, then muted, then grayscale
    pub fn all() -> &'static [ColorTheme] {
        &[
            Self::Green,
            Self::Blue,
            Self::Purple,
            Self::Red,
            Self::Cyan,
            Self::Amber,
            Self::Teal,
            Self::Indigo,
            Self::Pink,
            Self::Emerald,
            Self::Sky,
            Self::Violet,
            Self::Rose,
            Self::Gray,
            Self::Slate,
            Self::Zinc,
            Self::Neutral,
            Self::Stone,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Red => "red",
            Self::Cyan => "cyan",
            Self::Amber => "amber",
            Self::Teal => "teal",
            Self::Indigo => "indigo",
            Self::Pink => "pink",
            Self::Emerald => "emerald",
            Self::Sky => "sky",
            Self::Violet => "violet",
            Self::Rose => "rose",
            Self::Gray => "gray",
            Self::Slate => "slate",
            Self::Zinc => "zinc",
            Self::Neutral => "neutral",
            Self::Stone => "stone",
        }
    }

    /// Position in `all()`
    pub fn index(&self) -> usize {
        Self::all().iter().position(|t| t == self).unwrap_or(0)
    }
}

impl fmt::Display for ColorTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorTheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| format!("Unknown theme '{}'", s))
    }
}

/// Which playback queue a controller manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueVariant {
    /// Looping background music, with volume control
    Music,
    /// Break-time movies, stop at the end of the list
    Movies,
}

impl QueueVariant {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Music => "music",
            Self::Movies => "movies",
        }
    }
}

impl FromStr for QueueVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "music" | "track" | "tracks" => Ok(Self::Music),
            "movies" | "movie" => Ok(Self::Movies),
            other => Err(format!("Unknown queue '{}' (expected music or movies)", other)),
        }
    }
}

/// Dashboard pane that receives keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Timer,
    Tasks,
    Music,
    Movies,
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    /// Typing into the single-line input form
    Input,
    /// Timer settings dialog
    Settings,
    ThemePicker,
    /// Blocking notice, dismissed with any key
    Alert,
}
