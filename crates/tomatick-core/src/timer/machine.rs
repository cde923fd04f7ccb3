//! Timer state machine.
//!
//! `transition` is pure: it takes the current [`Snapshot`] and one [`Input`]
//! and returns the next snapshot plus the side effects the caller has to
//! perform. It never touches storage, audio, or the clock.
//!
//! ## States
//!
//! ```text
//! {Stopped, Running} x {Work, Break}
//!
//! Running/Work --(remaining hits 0)--> Running/Break
//! Running/Break --(remaining hits 0)--> Running/Work
//! ```

use serde::{Deserialize, Serialize};

use super::durations::{format_clock, DurationSettings, Mode};
use crate::settings::SettingsUpdate;

/// Transient countdown state. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub mode: Mode,
    pub remaining_secs: u64,
    pub is_running: bool,
}

impl TimerState {
    /// Stopped at the start of `mode`.
    pub fn entering(mode: Mode, durations: &DurationSettings) -> Self {
        Self {
            mode,
            remaining_secs: durations.seconds(mode),
            is_running: false,
        }
    }
}

/// Everything the controller owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub durations: DurationSettings,
    pub completed: u64,
    pub timer: TimerState,
}

impl Snapshot {
    pub fn new(durations: DurationSettings, completed: u64) -> Self {
        Self {
            durations,
            completed,
            timer: TimerState::entering(Mode::Work, &durations),
        }
    }

    /// Window/terminal title, e.g. `25:00 - Pomodoro`.
    pub fn title(&self) -> String {
        format!(
            "{} - {}",
            format_clock(self.timer.remaining_secs),
            self.timer.mode.label()
        )
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new(DurationSettings::default(), 0)
    }
}

/// User actions relayed from the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    ToggleRun,
    SelectMode(Mode),
    ResetSession,
    SaveSettings(SettingsUpdate),
}

/// Yes/no questions that must be answered before an intent takes effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    SwitchWhileRunning,
    ResetSession,
}

impl Prompt {
    pub fn message(self) -> &'static str {
        match self {
            Prompt::SwitchWhileRunning => {
                "The timer is running. Are you sure you want to switch? This will reset the current timer."
            }
            Prompt::ResetSession => {
                "Are you sure you want to reset the session? This will reset the completed pomodoros count to 0."
            }
        }
    }
}

impl Intent {
    /// The prompt this intent needs answered given the current timer, if any.
    pub fn confirmation(&self, timer: &TimerState) -> Option<Prompt> {
        match self {
            Intent::SelectMode(_) if timer.is_running => Some(Prompt::SwitchWhileRunning),
            Intent::ResetSession => Some(Prompt::ResetSession),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Tick,
    Intent(Intent),
}

impl From<Intent> for Input {
    fn from(intent: Intent) -> Self {
        Input::Intent(intent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    StartTicker,
    StopTicker,
    PlayCue,
    PersistDurations(DurationSettings),
    PersistCompleted(u64),
    Completed { finished: Mode, next: Mode },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: Snapshot,
    pub effects: Vec<Effect>,
}

pub fn transition(current: &Snapshot, input: Input) -> Transition {
    let mut next = *current;
    let mut effects = Vec::new();

    match input {
        Input::Tick => {
            if next.timer.is_running {
                next.timer.remaining_secs = next.timer.remaining_secs.saturating_sub(1);
                if next.timer.remaining_secs == 0 {
                    complete(&mut next, &mut effects);
                }
            }
        }
        Input::Intent(Intent::ToggleRun) => {
            if next.timer.is_running {
                next.timer.is_running = false;
                effects.push(Effect::StopTicker);
            } else {
                if next.timer.remaining_secs == 0 {
                    next.timer.remaining_secs = next.durations.seconds(next.timer.mode);
                }
                next.timer.is_running = true;
                effects.push(Effect::StartTicker);
            }
        }
        Input::Intent(Intent::SelectMode(mode)) => {
            stop(&mut next, &mut effects);
            next.timer = TimerState::entering(mode, &next.durations);
        }
        Input::Intent(Intent::ResetSession) => {
            stop(&mut next, &mut effects);
            next.completed = 0;
            effects.push(Effect::PersistCompleted(0));
        }
        Input::Intent(Intent::SaveSettings(update)) => {
            stop(&mut next, &mut effects);
            next.durations = update.durations();
            next.completed = update.completed();
            next.timer.remaining_secs = next.durations.seconds(next.timer.mode);
            effects.push(Effect::PersistDurations(next.durations));
            effects.push(Effect::PersistCompleted(next.completed));
        }
    }

    Transition { next, effects }
}

fn stop(state: &mut Snapshot, effects: &mut Vec<Effect>) {
    if state.timer.is_running {
        state.timer.is_running = false;
        effects.push(Effect::StopTicker);
    }
}

fn complete(state: &mut Snapshot, effects: &mut Vec<Effect>) {
    let finished = state.timer.mode;
    effects.push(Effect::PlayCue);
    if finished == Mode::Work {
        state.completed = state.completed.saturating_add(1);
        effects.push(Effect::PersistCompleted(state.completed));
    }
    let next = finished.next();
    state.timer.mode = next;
    state.timer.remaining_secs = state.durations.seconds(next);
    effects.push(Effect::Completed { finished, next });
}
