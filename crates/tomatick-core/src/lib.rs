//! # tomatick core library
//!
//! Business logic for the tomatick Pomodoro timer. The CLI is a thin layer
//! over this crate.
//!
//! ## Architecture
//!
//! - **Timer**: a pure state machine (`transition`) over a [`Snapshot`] that
//!   returns the side effects each input causes
//! - **Controller**: owns the snapshot, performs persistence and audio effects
//! - **Runtime**: single-task event loop with a cancellable one-second ticker
//! - **Storage**: SQLite key-value store for preferences, TOML configuration
//! - **Settings**: validation of raw settings input
//!
//! ## Key Components
//!
//! - [`TimerController`]: state owner and effect executor
//! - [`Driver`]: event loop tying input, ticks and the view together
//! - [`Preferences`]: persisted durations and completed count
//! - [`SettingsForm`]: raw settings input and its validation

pub mod audio;
pub mod controller;
pub mod error;
pub mod runtime;
pub mod settings;
pub mod storage;
pub mod timer;

pub use audio::{chime_from_config, Chime, Silent, SoundCommand, TerminalBell};
pub use controller::{Outcome, TimerController};
pub use error::{
    ConfigError, CoreError, PlaybackError, SettingsField, StorageError, ValidationError,
};
pub use runtime::{Driver, TickerHandle, UserInput, View};
pub use settings::{SettingsForm, SettingsUpdate};
pub use storage::{Config, Database, KvStore, MemoryStore, Preferences};
pub use timer::{DurationSettings, Effect, Input, Intent, Mode, Prompt, Snapshot, TimerState};
