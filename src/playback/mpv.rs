/// Playback through an external `mpv` process, one process per loaded item.
/// Pause, resume and volume go through mpv's JSON IPC socket, so they only
/// work on Unix. Process exit is reported as `Ended` or `Error(code)`.
use super::capability::{PlaybackCapability, PlaybackError, PlayerEvent, PlayerFactory, PlayerOptions, PlayerState};
use crate::context::PageContext;
use crate::domain::watch_url;
use serde_json::json;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// How often a waiter thread checks whether its process has exited
const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Mark the player API loaded once `<program> --version` runs. Only the
/// first call in a process does anything.
pub fn probe_player_api(ctx: &PageContext, program: &str) -> bool {
    let program = program.to_string();
    ctx.request_player_api(move |signal| {
        thread::spawn(move || {
            let status = Command::new(&program)
                .arg("--version")
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status();
            match status {
                Ok(status) if status.success() => signal.ready(),
                Ok(status) => signal.unavailable(format!("{} --version exited with {}", program, status)),
                Err(e) => signal.unavailable(format!("{} could not be started: {}", program, e)),
            }
        });
    })
}

pub struct MpvFactory {
    program: String,
}

impl MpvFactory {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl PlayerFactory for MpvFactory {
    fn construct(
        &self,
        surface_id: &str,
        options: &PlayerOptions,
    ) -> Result<Box<dyn PlaybackCapability>, PlaybackError> {
        Ok(Box::new(MpvPlayer::new(&self.program, surface_id, options)))
    }
}

pub struct MpvPlayer {
    program: String,
    audio_only: bool,
    volume: u8,
    socket_path: PathBuf,
    child: Option<Arc<Mutex<Child>>>,
    /// Bumped whenever the running process is replaced or stopped, so its
    /// waiter stays quiet
    generation: Arc<AtomicU64>,
    events_tx: Sender<PlayerEvent>,
    events_rx: Receiver<PlayerEvent>,
    destroyed: bool,
}

impl MpvPlayer {
    pub fn new(program: &str, surface_id: &str, options: &PlayerOptions) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        // Nothing to bootstrap per surface; readiness is delivered like any other notification
        let _ = events_tx.send(PlayerEvent::Ready);

        Self {
            program: program.to_string(),
            audio_only: options.audio_only,
            volume: options.initial_volume.unwrap_or(100).min(100),
            socket_path: std::env::temp_dir().join(format!("satori-{}.sock", surface_id)),
            child: None,
            generation: Arc::new(AtomicU64::new(0)),
            events_tx,
            events_rx,
            destroyed: false,
        }
    }

    fn emit(&self, state: PlayerState) {
        let _ = self.events_tx.send(PlayerEvent::StateChange(state));
    }

    fn kill_current(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(child) = self.child.take() {
            let mut child = child.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            let _ = child.kill();
            let _ = child.wait();
        }
    }

    fn spawn_waiter(&self, child: Arc<Mutex<Child>>, generation: u64) {
        let current = Arc::clone(&self.generation);
        let tx = self.events_tx.clone();
        thread::spawn(move || loop {
            thread::sleep(EXIT_POLL_INTERVAL);
            if current.load(Ordering::SeqCst) != generation {
                return;
            }
            let status = {
                let mut child = child.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                child.try_wait()
            };
            let event = match status {
                Ok(None) => continue,
                Ok(Some(status)) if status.success() => PlayerEvent::StateChange(PlayerState::Ended),
                Ok(Some(status)) => PlayerEvent::Error(status.code().unwrap_or(-1)),
                Err(_) => PlayerEvent::Error(-1),
            };
            if current.load(Ordering::SeqCst) == generation {
                let _ = tx.send(event);
            }
            return;
        });
    }

    #[cfg(unix)]
    fn send_ipc(&self, command: serde_json::Value) -> Result<(), PlaybackError> {
        use std::io::Write;
        use std::os::unix::net::UnixStream;

        if self.child.is_none() {
            return Err(PlaybackError::Control("nothing is loaded".to_string()));
        }
        let mut line = serde_json::to_string(&json!({ "command": command }))
            .map_err(|e| PlaybackError::Control(e.to_string()))?;
        line.push('\n');

        let mut stream = UnixStream::connect(&self.socket_path)
            .map_err(|e| PlaybackError::Control(format!("{}: {}", self.socket_path.display(), e)))?;
        stream
            .write_all(line.as_bytes())
            .map_err(|e| PlaybackError::Control(e.to_string()))
    }

    #[cfg(not(unix))]
    fn send_ipc(&self, _command: serde_json::Value) -> Result<(), PlaybackError> {
        Err(PlaybackError::Control(
            "player control needs a Unix socket".to_string(),
        ))
    }
}

impl PlaybackCapability for MpvPlayer {
    fn load_by_id(&mut self, id: &str) -> Result<(), PlaybackError> {
        if self.destroyed {
            return Err(PlaybackError::Unavailable("player was destroyed".to_string()));
        }
        self.kill_current();
        let generation = self.generation.load(Ordering::SeqCst);

        let mut command = Command::new(&self.program);
        command
            .arg("--no-terminal")
            .arg(format!("--input-ipc-server={}", self.socket_path.display()))
            .arg(format!("--volume={}", self.volume));
        if self.audio_only {
            command.arg("--no-video");
        }
        command
            .arg(watch_url(id))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let child = Arc::new(Mutex::new(command.spawn()?));
        tracing::debug!("Started {} for {}", self.program, id);
        self.spawn_waiter(Arc::clone(&child), generation);
        self.child = Some(child);

        self.emit(PlayerState::Buffering);
        self.emit(PlayerState::Playing);
        Ok(())
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        self.send_ipc(json!(["set_property", "pause", false]))?;
        self.emit(PlayerState::Playing);
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PlaybackError> {
        self.send_ipc(json!(["set_property", "pause", true]))?;
        self.emit(PlayerState::Paused);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), PlaybackError> {
        self.kill_current();
        self.emit(PlayerState::Cued);
        Ok(())
    }

    fn set_volume(&mut self, volume: u8) -> Result<(), PlaybackError> {
        self.volume = volume.min(100);
        if self.child.is_none() {
            // Applied on the next load
            return Ok(());
        }
        self.send_ipc(json!(["set_property", "volume", self.volume]))
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.kill_current();
        let _ = std::fs::remove_file(&self.socket_path);
        self.destroyed = true;
    }

    fn poll_event(&mut self) -> Option<PlayerEvent> {
        self.events_rx.try_recv().ok()
    }
}

impl Drop for MpvPlayer {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ContextEvent, PlayerApiState};
    use crate::persistence::store::memory::MemoryStore;
    use std::time::Instant;

    fn options() -> PlayerOptions {
        PlayerOptions {
            audio_only: true,
            initial_volume: Some(40),
        }
    }

    fn wait_for_event(player: &mut MpvPlayer, wanted: PlayerEvent) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            match player.poll_event() {
                Some(event) if event == wanted => return true,
                Some(_) => {}
                None => thread::sleep(Duration::from_millis(20)),
            }
        }
        false
    }

    #[test]
    fn test_ready_is_first_notification() {
        let mut player = MpvPlayer::new("mpv", "music-test", &options());
        assert_eq!(player.poll_event(), Some(PlayerEvent::Ready));
        assert_eq!(player.poll_event(), None);
    }

    #[test]
    fn test_control_without_load_fails() {
        let mut player = MpvPlayer::new("mpv", "music-test", &options());
        assert!(player.play().is_err());
        assert!(player.pause().is_err());
        assert!(player.set_volume(80).is_ok());
        assert_eq!(player.volume, 80);
    }

    #[test]
    fn test_missing_program_fails_to_load() {
        let mut player = MpvPlayer::new("satori-no-such-player", "music-test", &options());
        assert!(matches!(player.load_by_id("abcdefghijk"), Err(PlaybackError::Spawn(_))));
    }

    #[test]
    fn test_destroyed_player_refuses_loads() {
        let mut player = MpvPlayer::new("mpv", "movies-test", &options());
        player.destroy();
        player.destroy();
        assert!(matches!(player.load_by_id("abcdefghijk"), Err(PlaybackError::Unavailable(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_clean_exit_reports_ended() {
        let mut player = MpvPlayer::new("true", "music-ended", &options());
        player.load_by_id("abcdefghijk").unwrap();
        assert!(wait_for_event(&mut player, PlayerEvent::StateChange(PlayerState::Ended)));
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_exit_reports_error() {
        let mut player = MpvPlayer::new("false", "music-error", &options());
        player.load_by_id("abcdefghijk").unwrap();
        assert!(wait_for_event(&mut player, PlayerEvent::Error(1)));
    }

    #[cfg(unix)]
    #[test]
    fn test_probe_marks_api_ready() {
        let ctx = PageContext::load(MemoryStore::shared());
        let rx = ctx.subscribe();

        assert!(probe_player_api(&ctx, "true"));
        assert!(!probe_player_api(&ctx, "true"));

        assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok(ContextEvent::PlayerApiReady));
        assert_eq!(ctx.player_api(), PlayerApiState::Ready);
    }

    #[test]
    fn test_probe_reports_missing_program() {
        let ctx = PageContext::load(MemoryStore::shared());
        let rx = ctx.subscribe();

        probe_player_api(&ctx, "satori-no-such-player");

        let event = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(event, ContextEvent::PlayerApiUnavailable(_)));
    }
}
