use thiserror::Error;

/// Player state codes, numbered like the embed API reports them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Unstarted = -1,
    Ended = 0,
    Playing = 1,
    Paused = 2,
    Buffering = 3,
    Cued = 5,
}

impl PlayerState {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(Self::Unstarted),
            0 => Some(Self::Ended),
            1 => Some(Self::Playing),
            2 => Some(Self::Paused),
            3 => Some(Self::Buffering),
            5 => Some(Self::Cued),
            _ => None,
        }
    }
}

/// Notification emitted by a playback capability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    /// Bootstrap finished; commands are now accepted
    Ready,
    StateChange(PlayerState),
    Error(i32),
}

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("player is not available: {0}")]
    Unavailable(String),
    #[error("failed to start player: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("player did not accept command: {0}")]
    Control(String),
}

/// Construction options for a playback surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerOptions {
    /// Play sound only, no video window
    pub audio_only: bool,
    pub initial_volume: Option<u8>,
}

/// A loaded player able to stream one provider id at a time
pub trait PlaybackCapability {
    fn load_by_id(&mut self, id: &str) -> Result<(), PlaybackError>;
    fn play(&mut self) -> Result<(), PlaybackError>;
    fn pause(&mut self) -> Result<(), PlaybackError>;
    fn stop(&mut self) -> Result<(), PlaybackError>;
    /// 0-100
    fn set_volume(&mut self, volume: u8) -> Result<(), PlaybackError>;
    /// Release the surface and any background playback. Idempotent.
    fn destroy(&mut self);
    /// Next pending notification, if any
    fn poll_event(&mut self) -> Option<PlayerEvent>;
}

/// Creates playback surfaces once the player API is ready
pub trait PlayerFactory {
    fn construct(
        &self,
        surface_id: &str,
        options: &PlayerOptions,
    ) -> Result<Box<dyn PlaybackCapability>, PlaybackError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_codes() {
        for state in [
            PlayerState::Unstarted,
            PlayerState::Ended,
            PlayerState::Playing,
            PlayerState::Paused,
            PlayerState::Buffering,
            PlayerState::Cued,
        ] {
            assert_eq!(PlayerState::from_code(state as i32), Some(state));
        }
        assert_eq!(PlayerState::from_code(4), None);
    }
}
