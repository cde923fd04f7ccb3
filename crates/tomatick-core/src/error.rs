//! Core error types for tomatick-core.
//!
//! Nothing here is fatal to a running session: storage and playback errors
//! are logged and swallowed by the controller, validation errors keep the
//! save action disabled. The hierarchy exists so one-shot CLI commands can
//! still report what went wrong.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for tomatick-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Key-value store errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Settings input rejected
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Audio cue failed
    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value store errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the backing database
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Reading a key failed (store unavailable or content malformed)
    #[error("Failed to read '{key}': {message}")]
    ReadFailed { key: String, message: String },

    /// Writing a key failed (store unavailable or full)
    #[error("Failed to write '{key}': {message}")]
    WriteFailed { key: String, message: String },

    /// Could not determine or create the data directory
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Which settings field a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    WorkMinutes,
    BreakMinutes,
    CompletedCount,
}

impl std::fmt::Display for SettingsField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SettingsField::WorkMinutes => "work",
            SettingsField::BreakMinutes => "break",
            SettingsField::CompletedCount => "count",
        })
    }
}

/// Settings input errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Input is empty or contains something other than decimal digits
    #[error("'{field}' must be a whole number, got {input:?}")]
    NotDigits { field: SettingsField, input: String },

    /// Parsed value below the field minimum
    #[error("'{field}' must be at least {min}, got {value}")]
    BelowMinimum {
        field: SettingsField,
        value: u64,
        min: u64,
    },

    /// Value does not fit
    #[error("'{field}' is too large: {input}")]
    TooLarge { field: SettingsField, input: String },
}

impl ValidationError {
    pub fn field(&self) -> SettingsField {
        match self {
            ValidationError::NotDigits { field, .. }
            | ValidationError::BelowMinimum { field, .. }
            | ValidationError::TooLarge { field, .. } => *field,
        }
    }
}

/// Audio cue errors.
#[derive(Error, Debug)]
pub enum PlaybackError {
    /// External player could not be started
    #[error("Failed to start sound command '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Output device rejected the cue
    #[error("Audio device error: {0}")]
    Device(#[from] std::io::Error),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
