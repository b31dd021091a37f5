use super::capability::{PlaybackCapability, PlayerEvent, PlayerFactory, PlayerOptions, PlayerState};
use crate::context::{ContextEvent, PageContext};
use crate::domain::{MediaItem, QueueVariant};
use crate::persistence::{load_record, persist_quietly, SharedStore};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use std::sync::mpsc::Receiver;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueueError {
    #[error("Invalid YouTube URL: {0}")]
    InvalidSourceUrl(String),
    #[error("No item at position {index} (queue has {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// What distinguishes the music queue from the movie queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueConfig {
    pub store_key: String,
    /// Wrap to the first item when the last one ends
    pub loop_at_end: bool,
    pub has_volume: bool,
    pub title_prefix: &'static str,
    pub audio_only: bool,
    /// Select the first item when shown with nothing selected
    pub select_on_mount: bool,
}

impl QueueConfig {
    pub fn for_variant(variant: QueueVariant) -> Self {
        match variant {
            QueueVariant::Music => Self {
                store_key: format!("playbackQueue:{}", variant.name()),
                loop_at_end: true,
                has_volume: true,
                title_prefix: "YouTube",
                audio_only: true,
                select_on_mount: false,
            },
            QueueVariant::Movies => Self {
                store_key: format!("playbackQueue:{}", variant.name()),
                loop_at_end: false,
                has_volume: false,
                title_prefix: "Movie",
                audio_only: false,
                select_on_mount: true,
            },
        }
    }
}

/// Persisted shape of a queue. The current index is never stored.
#[derive(Debug, Default, Serialize, Deserialize)]
struct QueueRecord {
    items: Vec<MediaItem>,
}

/// A load of the current selection waiting for the player to become ready
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingLoad {
    autoplay: bool,
}

/// Ordered media list with a current pointer, driving one playback capability
pub struct QueueController {
    variant: QueueVariant,
    config: QueueConfig,
    items: Vec<MediaItem>,
    current: Option<usize>,
    is_playing: bool,
    volume: u8,
    store: SharedStore,
    factory: Rc<dyn PlayerFactory>,
    player: Option<Box<dyn PlaybackCapability>>,
    player_ready: bool,
    loaded_id: Option<String>,
    pending: Option<PendingLoad>,
    mounted: bool,
    context_events: Option<Receiver<ContextEvent>>,
    last_error: Option<String>,
}

impl QueueController {
    /// Load the stored queue. Nothing is selected after a reload.
    pub fn new(variant: QueueVariant, store: SharedStore, factory: Rc<dyn PlayerFactory>, volume: u8) -> Self {
        let config = QueueConfig::for_variant(variant);
        let record: QueueRecord = load_record(store.as_ref(), &config.store_key);
        let total = record.items.len();
        let items: Vec<MediaItem> = record.items.into_iter().filter(MediaItem::is_consistent).collect();
        if items.len() != total {
            tracing::warn!(
                "Dropped {} stored {} item(s) without a valid id",
                total - items.len(),
                variant.name()
            );
        }

        Self {
            variant,
            config,
            items,
            current: None,
            is_playing: false,
            volume: volume.min(100),
            store,
            factory,
            player: None,
            player_ready: false,
            loaded_id: None,
            pending: None,
            mounted: false,
            context_events: None,
            last_error: None,
        }
    }

    pub fn variant(&self) -> QueueVariant {
        self.variant
    }

    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_item(&self) -> Option<&MediaItem> {
        self.current.and_then(|i| self.items.get(i))
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Volume, for queues that have one
    pub fn volume(&self) -> Option<u8> {
        self.config.has_volume.then_some(self.volume)
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Whether the playback surface exists and has reported ready
    pub fn is_ready(&self) -> bool {
        self.player.is_some() && self.player_ready
    }

    pub fn has_pending_load(&self) -> bool {
        self.pending.is_some()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Show the queue: make sure exactly one playback surface exists, now
    /// if the player API is ready, otherwise once the context says so.
    pub fn mount(&mut self, ctx: &PageContext) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        match &self.context_events {
            // Stale notifications from while the queue was hidden; readiness is checked below
            Some(rx) => rx.try_iter().for_each(drop),
            None => self.context_events = Some(ctx.subscribe()),
        }
        if ctx.is_player_api_ready() {
            self.ensure_player();
        }

        if self.config.select_on_mount && self.current.is_none() && !self.items.is_empty() {
            self.current = Some(0);
            self.request_load(true);
        }
        tracing::debug!("{} queue mounted", self.variant.name());
    }

    /// Hide the queue and release its playback surface
    pub fn unmount(&mut self) {
        if let Some(mut player) = self.player.take() {
            player.destroy();
        }
        self.player_ready = false;
        self.loaded_id = None;
        self.pending = None;
        self.is_playing = false;
        if self.config.select_on_mount {
            self.current = None;
        }
        if self.mounted {
            tracing::debug!("{} queue unmounted", self.variant.name());
        }
        self.mounted = false;
    }

    fn ensure_player(&mut self) {
        if self.player.is_some() {
            return;
        }
        let surface_id = format!("{}-{}", self.variant.name(), Uuid::new_v4());
        let options = PlayerOptions {
            audio_only: self.config.audio_only,
            initial_volume: self.volume(),
        };
        match self.factory.construct(&surface_id, &options) {
            Ok(player) => {
                self.player = Some(player);
                self.player_ready = false;
            }
            Err(e) => {
                tracing::warn!("Could not create {} player: {}", self.variant.name(), e);
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Drain context and player notifications. Called on every loop iteration.
    pub fn pump(&mut self) {
        let context_events: Vec<ContextEvent> = match &self.context_events {
            Some(rx) => rx.try_iter().collect(),
            None => Vec::new(),
        };
        for event in context_events {
            match event {
                ContextEvent::PlayerApiReady if self.mounted => self.ensure_player(),
                ContextEvent::PlayerApiUnavailable(reason) => self.last_error = Some(reason),
                _ => {}
            }
        }

        while let Some(event) = self.player.as_mut().and_then(|p| p.poll_event()) {
            self.handle_event(event);
        }
    }

    /// React to one player notification. Notifications are the source of truth for `is_playing`.
    pub fn handle_event(&mut self, event: PlayerEvent) {
        match event {
            PlayerEvent::Ready => {
                self.player_ready = true;
                self.push_volume();
                if let Some(pending) = self.pending.take() {
                    self.load_current(pending.autoplay);
                }
            }
            PlayerEvent::StateChange(PlayerState::Ended) => self.on_ended(),
            PlayerEvent::StateChange(PlayerState::Playing) => {
                self.is_playing = self.current.is_some();
                self.push_volume();
            }
            PlayerEvent::StateChange(PlayerState::Paused) => self.is_playing = false,
            PlayerEvent::StateChange(_) => {}
            PlayerEvent::Error(code) => {
                tracing::warn!("{} player reported error {}", self.variant.name(), code);
                self.last_error = Some(format!("Player error {}", code));
                self.is_playing = false;
            }
        }
    }

    fn on_ended(&mut self) {
        if self.config.loop_at_end {
            self.play_next();
            return;
        }
        match self.current {
            Some(index) if index + 1 < self.items.len() => self.start_item(index + 1),
            _ => self.is_playing = false,
        }
    }

    /// Append an item from a user-supplied link
    pub fn add_item(&mut self, url: &str) -> Result<(), QueueError> {
        let item = MediaItem::from_url(url, self.config.title_prefix)
            .ok_or_else(|| QueueError::InvalidSourceUrl(url.trim().to_string()))?;
        tracing::info!("Added {} to {} queue", item.id, self.variant.name());

        let was_empty = self.items.is_empty();
        self.items.push(item);
        self.save();

        if was_empty && self.current.is_none() {
            self.current = Some(0);
            self.request_load(true);
        }
        Ok(())
    }

    pub fn remove_item(&mut self, index: usize) -> Result<(), QueueError> {
        self.check_index(index)?;
        let removed = self.items.remove(index);
        tracing::info!("Removed {} from {} queue", removed.id, self.variant.name());

        match self.current {
            Some(current) if current == index => {
                if self.is_playing {
                    self.stop_player();
                    self.is_playing = false;
                }
                self.pending = None;
                self.current = if self.items.is_empty() { None } else { Some(0) };
            }
            // The same item stays selected, nothing is reloaded
            Some(current) if index < current => self.current = Some(current - 1),
            _ => {}
        }

        self.save();
        Ok(())
    }

    pub fn select_and_play(&mut self, index: usize) -> Result<(), QueueError> {
        self.check_index(index)?;
        self.start_item(index);
        Ok(())
    }

    pub fn toggle_play_pause(&mut self) {
        let Some(index) = self.current else {
            if !self.items.is_empty() {
                self.start_item(0);
            }
            return;
        };

        if !self.is_ready() {
            match self.pending.as_mut() {
                Some(pending) => pending.autoplay = !pending.autoplay,
                None => self.pending = Some(PendingLoad { autoplay: true }),
            }
            return;
        }

        if self.loaded_id.as_deref() != self.items.get(index).map(|item| item.id.as_str()) {
            self.load_current(true);
            return;
        }

        let result = match self.player.as_mut() {
            Some(player) if self.is_playing => player.pause(),
            Some(player) => player.play(),
            None => return,
        };
        match result {
            Ok(()) => self.is_playing = !self.is_playing,
            Err(e) => tracing::warn!("Play/pause failed: {}", e),
        }
    }

    pub fn play_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let next = self.current.map_or(0, |i| (i + 1) % self.items.len());
        self.start_item(next);
    }

    pub fn play_previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let previous = match self.current {
            None | Some(0) => self.items.len() - 1,
            Some(i) => i - 1,
        };
        self.start_item(previous);
    }

    /// Set the output level (music queue only)
    pub fn set_volume(&mut self, volume: u8) {
        if !self.config.has_volume {
            return;
        }
        self.volume = volume.min(100);
        self.push_volume();
    }

    pub fn adjust_volume(&mut self, delta: i16) {
        let volume = (self.volume as i16 + delta).clamp(0, 100) as u8;
        self.set_volume(volume);
    }

    fn check_index(&self, index: usize) -> Result<(), QueueError> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(QueueError::IndexOutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }

    fn start_item(&mut self, index: usize) {
        self.current = Some(index);
        self.request_load(true);
    }

    /// Load the current selection now, or keep it as the single pending load.
    /// A newer request replaces an older one.
    fn request_load(&mut self, autoplay: bool) {
        if self.is_ready() {
            self.load_current(autoplay);
        } else {
            tracing::debug!("{} player not ready, deferring load", self.variant.name());
            self.pending = Some(PendingLoad { autoplay });
        }
    }

    fn load_current(&mut self, autoplay: bool) {
        if !autoplay {
            return;
        }
        let Some(id) = self.current_item().map(|item| item.id.clone()) else {
            return;
        };
        let Some(player) = self.player.as_mut() else {
            return;
        };

        match player.load_by_id(&id) {
            Ok(()) => {
                self.loaded_id = Some(id);
                self.is_playing = true;
                self.push_volume();
            }
            Err(e) => {
                tracing::warn!("Could not load {}: {}", id, e);
                self.last_error = Some(e.to_string());
                self.is_playing = false;
            }
        }
    }

    fn stop_player(&mut self) {
        if let Some(player) = self.player.as_mut() {
            if let Err(e) = player.stop() {
                tracing::warn!("Stop failed: {}", e);
            }
        }
        self.loaded_id = None;
    }

    fn push_volume(&mut self) {
        if !self.config.has_volume || !self.player_ready {
            return;
        }
        if let Some(player) = self.player.as_mut() {
            if let Err(e) = player.set_volume(self.volume) {
                tracing::debug!("Volume not applied: {}", e);
            }
        }
    }

    fn save(&self) {
        let record = QueueRecord {
            items: self.items.clone(),
        };
        persist_quietly(self.store.as_ref(), &self.config.store_key, &record);
    }
}

impl Drop for QueueController {
    fn drop(&mut self) {
        self.unmount();
    }
}
