//! Persisted preferences: interval durations and the completed-session count.
//!
//! Reads never fail: missing keys, malformed JSON and store errors all
//! degrade to defaults. Writes report their error so the caller can log it.

use serde_json::Value;
use tracing::{debug, warn};

use super::KvStore;
use crate::error::StorageError;
use crate::timer::{DurationSettings, Mode, MIN_DURATION_SECS};

pub const DURATION_SETTINGS_KEY: &str = "durationSettings";
pub const COMPLETED_COUNT_KEY: &str = "completedCount";

pub struct Preferences<S> {
    store: S,
}

impl<S: KvStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn load_durations(&self) -> DurationSettings {
        let Some(raw) = self.read(DURATION_SETTINGS_KEY) else {
            return DurationSettings::default();
        };
        let parsed: Value = match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(e) => {
                warn!(
                    key = DURATION_SETTINGS_KEY,
                    error = %e,
                    "malformed durations, using defaults"
                );
                return DurationSettings::default();
            }
        };
        DurationSettings::new(
            mode_secs(&parsed, Mode::Work),
            mode_secs(&parsed, Mode::Break),
        )
    }

    pub fn load_completed(&self) -> u64 {
        let Some(raw) = self.read(COMPLETED_COUNT_KEY) else {
            return 0;
        };
        match raw.trim().parse::<u64>() {
            Ok(n) => n,
            Err(e) => {
                warn!(
                    key = COMPLETED_COUNT_KEY,
                    value = %raw,
                    error = %e,
                    "malformed count, using 0"
                );
                0
            }
        }
    }

    pub fn save_durations(&self, durations: &DurationSettings) -> Result<(), StorageError> {
        let json = serde_json::to_string(durations).map_err(|e| StorageError::WriteFailed {
            key: DURATION_SETTINGS_KEY.to_string(),
            message: e.to_string(),
        })?;
        self.store.set(DURATION_SETTINGS_KEY, &json)
    }

    pub fn save_completed(&self, completed: u64) -> Result<(), StorageError> {
        self.store.set(COMPLETED_COUNT_KEY, &completed.to_string())
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(Some(v)) => Some(v),
            Ok(None) => {
                debug!(key, "no stored value");
                None
            }
            Err(e) => {
                warn!(key, error = %e, "store read failed, using defaults");
                None
            }
        }
    }
}

/// Per-mode value from the stored object. Anything that is not a whole
/// number of seconds of at least one minute falls back to the default.
fn mode_secs(parsed: &Value, mode: Mode) -> u64 {
    let key = match mode {
        Mode::Work => "WORK",
        Mode::Break => "BREAK",
    };
    match parsed.get(key).and_then(Value::as_u64) {
        Some(secs) if secs >= MIN_DURATION_SECS => secs,
        _ => {
            debug!(key, "stored duration missing or invalid, using default");
            mode.default_secs()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn empty_store_gives_defaults() {
        let prefs = Preferences::new(MemoryStore::new());
        assert_eq!(prefs.load_durations(), DurationSettings::default());
        assert_eq!(prefs.load_completed(), 0);
    }

    #[test]
    fn read_failure_gives_defaults() {
        let store = MemoryStore::with_entries([
            (DURATION_SETTINGS_KEY, r#"{"WORK":600,"BREAK":120}"#),
            (COMPLETED_COUNT_KEY, "7"),
        ]);
        store.fail_reads(true);
        let prefs = Preferences::new(store);
        assert_eq!(prefs.load_durations(), DurationSettings::default());
        assert_eq!(prefs.load_completed(), 0);
    }

    #[test]
    fn round_trip_uses_documented_format() {
        let prefs = Preferences::new(MemoryStore::new());
        prefs.save_durations(&DurationSettings::new(600, 120)).unwrap();
        prefs.save_completed(3).unwrap();
        assert_eq!(
            prefs.store().raw(DURATION_SETTINGS_KEY).as_deref(),
            Some(r#"{"WORK":600,"BREAK":120}"#)
        );
        assert_eq!(prefs.store().raw(COMPLETED_COUNT_KEY).as_deref(), Some("3"));
        assert_eq!(prefs.load_durations(), DurationSettings::new(600, 120));
        assert_eq!(prefs.load_completed(), 3);
    }

    #[test]
    fn legacy_long_break_key_is_ignored() {
        let store = MemoryStore::with_entries([(
            DURATION_SETTINGS_KEY,
            r#"{"WORK":1200,"BREAK":240,"LONG_BREAK":900}"#,
        )]);
        let prefs = Preferences::new(store);
        assert_eq!(prefs.load_durations(), DurationSettings::new(1200, 240));
    }

    #[test]
    fn partial_or_corrupt_modes_fall_back_individually() {
        let store = MemoryStore::with_entries([(
            DURATION_SETTINGS_KEY,
            r#"{"WORK":"soon","BREAK":420}"#,
        )]);
        let prefs = Preferences::new(store);
        assert_eq!(prefs.load_durations(), DurationSettings::new(1500, 420));

        let store = MemoryStore::with_entries([(DURATION_SETTINGS_KEY, r#"{"WORK":900}"#)]);
        let prefs = Preferences::new(store);
        assert_eq!(prefs.load_durations(), DurationSettings::new(900, 300));
    }

    #[test]
    fn malformed_json_gives_defaults() {
        let store = MemoryStore::with_entries([
            (DURATION_SETTINGS_KEY, "{not json"),
            (COMPLETED_COUNT_KEY, "many"),
        ]);
        let prefs = Preferences::new(store);
        assert_eq!(prefs.load_durations(), DurationSettings::default());
        assert_eq!(prefs.load_completed(), 0);
    }

    #[test]
    fn negative_count_reads_as_zero() {
        let store = MemoryStore::with_entries([(COMPLETED_COUNT_KEY, "-2")]);
        assert_eq!(Preferences::new(store).load_completed(), 0);
    }

    #[test]
    fn write_failure_is_reported() {
        let store = MemoryStore::new();
        store.fail_writes(true);
        let prefs = Preferences::new(store);
        assert!(matches!(
            prefs.save_completed(1),
            Err(StorageError::WriteFailed { .. })
        ));
    }
}
