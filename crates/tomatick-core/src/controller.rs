//! Timer controller.
//!
//! Owns the [`Snapshot`] together with the injected store and audio cue.
//! Every input goes through [`transition`]; the controller then performs the
//! persistence and playback effects itself and hands the full effect list
//! back so the driver can manage the ticker and the view.

use tracing::{info, warn};

use crate::audio::Chime;
use crate::storage::{KvStore, Preferences};
use crate::timer::{transition, DurationSettings, Effect, Input, Intent, Mode, Prompt, Snapshot};

/// Result of [`TimerController::request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied(Vec<Effect>),
    /// Nothing changed; ask the user, then call [`TimerController::apply`].
    NeedsConfirmation(Prompt),
}

pub struct TimerController<S, C> {
    state: Snapshot,
    prefs: Preferences<S>,
    chime: C,
}

impl<S: KvStore, C: Chime> TimerController<S, C> {
    /// Read persisted durations and count, starting stopped in WORK.
    pub fn load(store: S, chime: C) -> Self {
        let prefs = Preferences::new(store);
        let state = Snapshot::new(prefs.load_durations(), prefs.load_completed());
        Self {
            state,
            prefs,
            chime,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn snapshot(&self) -> &Snapshot {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.timer.mode
    }

    pub fn remaining_secs(&self) -> u64 {
        self.state.timer.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.state.timer.is_running
    }

    pub fn completed(&self) -> u64 {
        self.state.completed
    }

    pub fn durations(&self) -> &DurationSettings {
        &self.state.durations
    }

    pub fn store(&self) -> &S {
        self.prefs.store()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Apply `intent` unless it needs confirmation first.
    pub fn request(&mut self, intent: Intent) -> Outcome {
        match intent.confirmation(&self.state.timer) {
            Some(prompt) => Outcome::NeedsConfirmation(prompt),
            None => Outcome::Applied(self.apply(intent)),
        }
    }

    /// Apply `intent` unconditionally (the confirmed path).
    pub fn apply(&mut self, intent: Intent) -> Vec<Effect> {
        self.dispatch(Input::Intent(intent))
    }

    /// Deliver one tick.
    pub fn tick(&mut self) -> Vec<Effect> {
        self.dispatch(Input::Tick)
    }

    fn dispatch(&mut self, input: Input) -> Vec<Effect> {
        let next = transition(&self.state, input);
        self.state = next.next;
        for effect in &next.effects {
            self.perform(effect);
        }
        next.effects
    }

    fn perform(&self, effect: &Effect) {
        match effect {
            Effect::PlayCue => {
                if let Err(e) = self.chime.play() {
                    warn!(error = %e, "audio cue failed");
                }
            }
            Effect::PersistDurations(durations) => {
                if let Err(e) = self.prefs.save_durations(durations) {
                    warn!(error = %e, "failed to persist durations");
                }
            }
            Effect::PersistCompleted(n) => {
                if let Err(e) = self.prefs.save_completed(*n) {
                    warn!(error = %e, "failed to persist completed count");
                }
            }
            Effect::Completed { finished, next } => {
                info!(%finished, %next, completed = self.state.completed, "interval completed");
            }
            Effect::StartTicker | Effect::StopTicker => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlaybackError;
    use crate::settings::SettingsForm;
    use crate::storage::{MemoryStore, COMPLETED_COUNT_KEY, DURATION_SETTINGS_KEY};
    use std::cell::Cell;

    #[derive(Default)]
    struct CountingChime {
        plays: Cell<u32>,
        fail: bool,
    }

    impl Chime for &CountingChime {
        fn play(&self) -> Result<(), PlaybackError> {
            self.plays.set(self.plays.get() + 1);
            if self.fail {
                Err(PlaybackError::Device(std::io::Error::other("no device")))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn loads_persisted_state() {
        let store = MemoryStore::with_entries([
            (DURATION_SETTINGS_KEY, r#"{"WORK":600,"BREAK":120}"#),
            (COMPLETED_COUNT_KEY, "9"),
        ]);
        let chime = CountingChime::default();
        let c = TimerController::load(&store, &chime);
        assert_eq!(c.mode(), Mode::Work);
        assert_eq!(c.remaining_secs(), 600);
        assert_eq!(c.completed(), 9);
        assert!(!c.is_running());
    }

    #[test]
    fn unreadable_store_starts_from_defaults() {
        let store = MemoryStore::with_entries([(COMPLETED_COUNT_KEY, "9")]);
        store.fail_reads(true);
        let chime = CountingChime::default();
        let c = TimerController::load(&store, &chime);
        assert_eq!(*c.durations(), DurationSettings::default());
        assert_eq!(c.completed(), 0);
        assert_eq!(c.remaining_secs(), 1500);
    }

    #[test]
    fn completion_plays_cue_and_persists_count() {
        let store = MemoryStore::new();
        let chime = CountingChime::default();
        let mut c = TimerController::load(&store, &chime);
        c.apply(Intent::SaveSettings(
            SettingsForm::new("1", "1", "0").validate().unwrap(),
        ));
        c.apply(Intent::ToggleRun);
        for _ in 0..60 {
            c.tick();
        }
        assert_eq!(c.mode(), Mode::Break);
        assert_eq!(c.completed(), 1);
        assert_eq!(chime.plays.get(), 1);
        assert_eq!(store.raw(COMPLETED_COUNT_KEY).as_deref(), Some("1"));
    }

    #[test]
    fn playback_failure_does_not_block_transition() {
        let store = MemoryStore::new();
        let chime = CountingChime {
            fail: true,
            ..CountingChime::default()
        };
        let mut c = TimerController::load(&store, &chime);
        c.apply(Intent::SelectMode(Mode::Break));
        c.apply(Intent::ToggleRun);
        for _ in 0..300 {
            c.tick();
        }
        assert_eq!(chime.plays.get(), 1);
        assert_eq!(c.mode(), Mode::Work);
        assert!(c.is_running());
        assert_eq!(c.remaining_secs(), 1500);
    }

    #[test]
    fn write_failure_keeps_memory_authoritative() {
        let store = MemoryStore::new();
        store.fail_writes(true);
        let chime = CountingChime::default();
        let mut c = TimerController::load(&store, &chime);
        c.apply(Intent::SaveSettings(
            SettingsForm::new("10", "2", "3").validate().unwrap(),
        ));
        assert_eq!(c.completed(), 3);
        assert_eq!(c.remaining_secs(), 600);
        assert!(store.raw(DURATION_SETTINGS_KEY).is_none());
    }

    #[test]
    fn switching_while_running_needs_confirmation() {
        let store = MemoryStore::new();
        let chime = CountingChime::default();
        let mut c = TimerController::load(&store, &chime);
        c.apply(Intent::ToggleRun);
        c.tick();
        let before = *c.snapshot();

        let outcome = c.request(Intent::SelectMode(Mode::Break));
        assert_eq!(outcome, Outcome::NeedsConfirmation(Prompt::SwitchWhileRunning));
        assert_eq!(*c.snapshot(), before);

        let effects = c.apply(Intent::SelectMode(Mode::Break));
        assert_eq!(effects, vec![Effect::StopTicker]);
        assert!(!c.is_running());
        assert_eq!(c.mode(), Mode::Break);
        assert_eq!(c.remaining_secs(), 300);
    }

    #[test]
    fn switching_while_stopped_applies_directly() {
        let store = MemoryStore::new();
        let chime = CountingChime::default();
        let mut c = TimerController::load(&store, &chime);
        assert_eq!(
            c.request(Intent::SelectMode(Mode::Break)),
            Outcome::Applied(vec![])
        );
        assert_eq!(c.mode(), Mode::Break);
    }

    #[test]
    fn reset_always_needs_confirmation() {
        let store = MemoryStore::with_entries([(COMPLETED_COUNT_KEY, "5")]);
        let chime = CountingChime::default();
        let mut c = TimerController::load(&store, &chime);
        assert_eq!(
            c.request(Intent::ResetSession),
            Outcome::NeedsConfirmation(Prompt::ResetSession)
        );
        assert_eq!(c.completed(), 5);
        c.apply(Intent::ResetSession);
        assert_eq!(c.completed(), 0);
        assert_eq!(store.raw(COMPLETED_COUNT_KEY).as_deref(), Some("0"));
    }
}
