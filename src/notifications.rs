/// Expiry chime and desktop notifications
/// Desktop notifications are only implemented on macOS
use crate::domain::TimerMode;
use std::io::{self, Write};
use std::process::Command;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChimeError {
    #[error("sound output unavailable: {0}")]
    Io(#[from] io::Error),
    #[error("sound command exited with {0}")]
    CommandFailed(std::process::ExitStatus),
    #[error("sound blocked: {0}")]
    Blocked(String),
}

/// Something that can play the end-of-period sound
pub trait Chime {
    fn ring(&mut self) -> Result<(), ChimeError>;
}

/// Rings the terminal bell
pub struct TerminalBell;

impl Chime for TerminalBell {
    fn ring(&mut self) -> Result<(), ChimeError> {
        let mut stdout = io::stdout();
        stdout.write_all(b"\x07")?;
        stdout.flush()?;
        Ok(())
    }
}

/// Runs an external command, e.g. `paplay /usr/share/sounds/freedesktop/stereo/complete.oga`
pub struct CommandChime {
    program: String,
    args: Vec<String>,
}

impl CommandChime {
    pub fn new(program: String, args: Vec<String>) -> Self {
        Self { program, args }
    }
}

impl Chime for CommandChime {
    fn ring(&mut self) -> Result<(), ChimeError> {
        let status = Command::new(&self.program).args(&self.args).status()?;
        if status.success() {
            Ok(())
        } else {
            Err(ChimeError::CommandFailed(status))
        }
    }
}

/// Never makes a sound
pub struct SilentChime;

impl Chime for SilentChime {
    fn ring(&mut self) -> Result<(), ChimeError> {
        Ok(())
    }
}

/// Pick the chime described by the configured command line
pub fn build_chime(command: &[String]) -> Box<dyn Chime> {
    match command.split_first() {
        Some((program, args)) if !program.trim().is_empty() => {
            Box::new(CommandChime::new(program.clone(), args.to_vec()))
        }
        _ => Box::new(TerminalBell),
    }
}

/// Send a notification when a work or break period starts
pub fn notify_mode_change(mode: TimerMode) {
    #[cfg(target_os = "macos")]
    {
        let message = match mode {
            TimerMode::Work => "Break is over, back to focus",
            TimerMode::Break => "Time for a break",
        };
        let script = format!(r#"display notification "{}" with title "Satori""#, message);

        if let Err(e) = Command::new("osascript").arg("-e").arg(&script).output() {
            tracing::debug!("Desktop notification failed: {}", e);
        }
    }

    #[cfg(not(target_os = "macos"))]
    {
        let _ = mode;
    }
}
