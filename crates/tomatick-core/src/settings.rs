//! Settings form validation.
//!
//! The form holds raw text exactly as typed. Only a fully valid form yields a
//! [`SettingsUpdate`], and only a `SettingsUpdate` can be saved, so invalid
//! input cannot reach the controller.

use crate::error::{SettingsField, ValidationError};
use crate::timer::{DurationSettings, Mode, MIN_DURATION_SECS};

const MIN_WORK_MINUTES: u64 = 1;
const MIN_BREAK_MINUTES: u64 = 1;
const MIN_COMPLETED: u64 = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    pub work_minutes: String,
    pub break_minutes: String,
    pub completed_count: String,
}

impl SettingsForm {
    pub fn new(
        work_minutes: impl Into<String>,
        break_minutes: impl Into<String>,
        completed_count: impl Into<String>,
    ) -> Self {
        Self {
            work_minutes: work_minutes.into(),
            break_minutes: break_minutes.into(),
            completed_count: completed_count.into(),
        }
    }

    /// Pre-fill the form from the current state.
    pub fn from_current(durations: &DurationSettings, completed: u64) -> Self {
        Self::new(
            durations.minutes(Mode::Work).to_string(),
            durations.minutes(Mode::Break).to_string(),
            completed.to_string(),
        )
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Check all three fields, reporting the first failure.
    pub fn validate(&self) -> Result<SettingsUpdate, ValidationError> {
        let work = parse_field(
            SettingsField::WorkMinutes,
            &self.work_minutes,
            MIN_WORK_MINUTES,
        )?;
        let brk = parse_field(
            SettingsField::BreakMinutes,
            &self.break_minutes,
            MIN_BREAK_MINUTES,
        )?;
        let completed = parse_field(
            SettingsField::CompletedCount,
            &self.completed_count,
            MIN_COMPLETED,
        )?;

        Ok(SettingsUpdate {
            durations: DurationSettings::new(
                minutes_to_secs(SettingsField::WorkMinutes, &self.work_minutes, work)?,
                minutes_to_secs(SettingsField::BreakMinutes, &self.break_minutes, brk)?,
            ),
            completed,
        })
    }
}

fn parse_field(field: SettingsField, input: &str, min: u64) -> Result<u64, ValidationError> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::NotDigits {
            field,
            input: input.to_string(),
        });
    }
    let value: u64 = input.parse().map_err(|_| ValidationError::TooLarge {
        field,
        input: input.to_string(),
    })?;
    if value < min {
        return Err(ValidationError::BelowMinimum { field, value, min });
    }
    Ok(value)
}

fn minutes_to_secs(
    field: SettingsField,
    input: &str,
    minutes: u64,
) -> Result<u64, ValidationError> {
    minutes.checked_mul(60).ok_or_else(|| ValidationError::TooLarge {
        field,
        input: input.to_string(),
    })
}

/// A validated settings change, ready to save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsUpdate {
    durations: DurationSettings,
    completed: u64,
}

impl SettingsUpdate {
    /// Build directly from seconds. Durations under one minute are rejected.
    pub fn new(work_secs: u64, break_secs: u64, completed: u64) -> Result<Self, ValidationError> {
        for (field, secs) in [
            (SettingsField::WorkMinutes, work_secs),
            (SettingsField::BreakMinutes, break_secs),
        ] {
            if secs < MIN_DURATION_SECS {
                return Err(ValidationError::BelowMinimum {
                    field,
                    value: secs / 60,
                    min: 1,
                });
            }
        }
        Ok(Self {
            durations: DurationSettings::new(work_secs, break_secs),
            completed,
        })
    }

    pub fn durations(&self) -> DurationSettings {
        self.durations
    }

    pub fn completed(&self) -> u64 {
        self.completed
    }
}
