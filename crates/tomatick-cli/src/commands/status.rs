use serde::Serialize;
use tomatick_core::{DurationSettings, Mode, Preferences};

use crate::store::open_store;

#[derive(Serialize)]
struct StatusReport {
    durations: DurationSettings,
    work_minutes: u64,
    break_minutes: u64,
    completed: u64,
}

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let prefs = Preferences::new(open_store());
    let durations = prefs.load_durations();
    let report = StatusReport {
        durations,
        work_minutes: durations.minutes(Mode::Work),
        break_minutes: durations.minutes(Mode::Break),
        completed: prefs.load_completed(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("work:      {} min", report.work_minutes);
        println!("break:     {} min", report.break_minutes);
        println!("completed: {}", report.completed);
    }
    Ok(())
}
