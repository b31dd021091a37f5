use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Length of a provider video id
pub const PROVIDER_ID_LEN: usize = 11;

static PROVIDER_URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^.*(youtu\.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*).*")
        .expect("provider url regex should compile")
});

/// Extract the 11-character provider id from a media link.
///
/// Recognised shapes: `youtu.be/<id>`, `/v/<id>`, `/u/<x>/<id>`,
/// `/embed/<id>`, `watch?v=<id>` and `&v=<id>`. The capture stops at the
/// first `#`, `&` or `?`.
pub fn extract_id(url: &str) -> Option<String> {
    let captures = PROVIDER_URL_PATTERN.captures(url.trim())?;
    let id = captures.get(2)?.as_str();
    (id.chars().count() == PROVIDER_ID_LEN).then(|| id.to_string())
}

/// Canonical watch URL for a provider id
pub fn watch_url(id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", id)
}

/// An entry of a playback queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: String,
    pub title: String,
    pub source_url: String,
}

impl MediaItem {
    /// Build an item from a user-supplied link. Returns None when no id can be extracted.
    pub fn from_url(url: &str, title_prefix: &str) -> Option<Self> {
        let id = extract_id(url)?;
        let short: String = id.chars().take(6).collect();
        Some(Self {
            title: format!("{} ({}...)", title_prefix, short),
            id,
            source_url: url.trim().to_string(),
        })
    }

    /// Whether the stored id is still the one its URL yields
    pub fn is_consistent(&self) -> bool {
        extract_id(&self.source_url).as_deref() == Some(self.id.as_str())
    }
}
