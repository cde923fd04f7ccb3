use serde::{Deserialize, Serialize};

/// Shortest interval the settings form can produce (one minute).
pub const MIN_DURATION_SECS: u64 = 60;

pub const DEFAULT_WORK_SECS: u64 = 25 * 60;
pub const DEFAULT_BREAK_SECS: u64 = 5 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    Work,
    Break,
}

impl Mode {
    /// Fixed two-step cycle. A finished break always goes back to work.
    pub fn next(self) -> Mode {
        match self {
            Mode::Work => Mode::Break,
            Mode::Break => Mode::Work,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Work => "Pomodoro",
            Mode::Break => "Break",
        }
    }

    pub fn default_secs(self) -> u64 {
        match self {
            Mode::Work => DEFAULT_WORK_SECS,
            Mode::Break => DEFAULT_BREAK_SECS,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Configured interval lengths, in seconds.
///
/// Serialized as `{"WORK": 1500, "BREAK": 300}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationSettings {
    #[serde(rename = "WORK")]
    pub work_secs: u64,
    #[serde(rename = "BREAK")]
    pub break_secs: u64,
}

impl DurationSettings {
    pub fn new(work_secs: u64, break_secs: u64) -> Self {
        Self {
            work_secs,
            break_secs,
        }
    }

    /// Duration to load when entering `mode`.
    ///
    /// A value under [`MIN_DURATION_SECS`] can only come from corrupted
    /// storage; the mode's default is used instead.
    pub fn seconds(&self, mode: Mode) -> u64 {
        let raw = match mode {
            Mode::Work => self.work_secs,
            Mode::Break => self.break_secs,
        };
        if raw < MIN_DURATION_SECS {
            mode.default_secs()
        } else {
            raw
        }
    }

    pub fn minutes(&self, mode: Mode) -> u64 {
        self.seconds(mode) / 60
    }
}

impl Default for DurationSettings {
    fn default() -> Self {
        Self::new(DEFAULT_WORK_SECS, DEFAULT_BREAK_SECS)
    }
}

/// Render seconds as zero-padded `MM:SS`.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_alternates() {
        assert_eq!(Mode::Work.next(), Mode::Break);
        assert_eq!(Mode::Break.next(), Mode::Work);
    }

    #[test]
    fn defaults() {
        let d = DurationSettings::default();
        assert_eq!(d.seconds(Mode::Work), 1500);
        assert_eq!(d.seconds(Mode::Break), 300);
    }

    #[test]
    fn corrupt_duration_falls_back_to_mode_default() {
        let d = DurationSettings::new(0, 59);
        assert_eq!(d.seconds(Mode::Work), DEFAULT_WORK_SECS);
        assert_eq!(d.seconds(Mode::Break), DEFAULT_BREAK_SECS);
    }

    #[test]
    fn serializes_with_upper_case_keys() {
        let json = serde_json::to_string(&DurationSettings::default()).unwrap();
        assert_eq!(json, r#"{"WORK":1500,"BREAK":300}"#);
    }

    #[test]
    fn clock_format() {
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(61), "01:01");
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(6000), "100:00");
    }
}
