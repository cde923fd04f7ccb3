mod durations;
mod machine;

pub use durations::{
    format_clock, DurationSettings, Mode, DEFAULT_BREAK_SECS, DEFAULT_WORK_SECS,
    MIN_DURATION_SECS,
};
pub use machine::{transition, Effect, Input, Intent, Prompt, Snapshot, TimerState, Transition};
