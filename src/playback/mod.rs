pub mod capability;
pub mod controller;
pub mod mpv;

pub use capability::{PlaybackCapability, PlaybackError, PlayerEvent, PlayerFactory, PlayerOptions, PlayerState};
pub use controller::{QueueConfig, QueueController, QueueError};
pub use mpv::{probe_player_api, MpvFactory};
