//! Interval-boundary audio cue.
//!
//! `play` must return promptly and never wait for the sound to finish.

use std::io::Write;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

use crate::error::PlaybackError;
use crate::storage::NotificationsConfig;

pub trait Chime {
    fn play(&self) -> Result<(), PlaybackError>;
}

impl<T: Chime + ?Sized> Chime for Box<T> {
    fn play(&self) -> Result<(), PlaybackError> {
        (**self).play()
    }
}

/// Writes BEL to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl Chime for TerminalBell {
    fn play(&self) -> Result<(), PlaybackError> {
        let mut err = std::io::stderr().lock();
        err.write_all(b"\x07")?;
        err.flush()?;
        Ok(())
    }
}

/// Spawns an external player. A detached thread waits on the child so no
/// zombie is left behind, while `play` itself returns immediately.
#[derive(Debug, Clone)]
pub struct SoundCommand {
    command: String,
}

impl SoundCommand {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl SoundCommand {
    /// Start the player and hand the child to a reaper thread. The returned
    /// handle yields the exit status once the sound has finished.
    fn spawn_reaped(&self) -> Result<JoinHandle<std::io::Result<ExitStatus>>, PlaybackError> {
        let spawn_error = |source| PlaybackError::Spawn {
            command: self.command.clone(),
            source,
        };
        let mut parts = self.command.split_whitespace();
        let program = parts.next().ok_or_else(|| {
            spawn_error(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "empty command",
            ))
        })?;
        let mut child = Command::new(program)
            .args(parts)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(spawn_error)?;
        thread::Builder::new()
            .name("tomatick-sound".into())
            .spawn(move || {
                let status = child.wait();
                if let Err(e) = &status {
                    tracing::warn!(error = %e, "failed to wait on sound command");
                }
                status
            })
            .map_err(spawn_error)
    }
}

impl Chime for SoundCommand {
    fn play(&self) -> Result<(), PlaybackError> {
        self.spawn_reaped().map(drop)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Chime for Silent {
    fn play(&self) -> Result<(), PlaybackError> {
        Ok(())
    }
}

pub fn chime_from_config(cfg: &NotificationsConfig) -> Box<dyn Chime> {
    if !cfg.enabled {
        return Box::new(Silent);
    }
    match cfg.sound_command.as_deref().map(str::trim) {
        Some(cmd) if !cmd.is_empty() => Box::new(SoundCommand::new(cmd)),
        _ if cfg.bell => Box::new(TerminalBell),
        _ => Box::new(Silent),
    }
}
