use clap::Subcommand;
use tomatick_core::{Mode, Preferences, SettingsForm};
use tracing::warn;

use crate::store::open_store;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show current durations (minutes) and completed count
    Show,
    /// Change durations and/or the completed count
    Set {
        /// Work interval in minutes (>= 1)
        #[arg(long)]
        work: Option<String>,
        /// Break interval in minutes (>= 1)
        #[arg(long = "break")]
        break_minutes: Option<String>,
        /// Completed work sessions (>= 0)
        #[arg(long)]
        count: Option<String>,
    },
}

pub fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    let prefs = Preferences::new(open_store());
    let current = SettingsForm::from_current(&prefs.load_durations(), prefs.load_completed());

    match action {
        SettingsAction::Show => {
            println!(
                "work={} break={} count={}",
                current.work_minutes, current.break_minutes, current.completed_count
            );
        }
        SettingsAction::Set {
            work,
            break_minutes,
            count,
        } => {
            let form = SettingsForm {
                work_minutes: work.unwrap_or(current.work_minutes),
                break_minutes: break_minutes.unwrap_or(current.break_minutes),
                completed_count: count.unwrap_or(current.completed_count),
            };
            let update = form.validate()?;
            if let Err(e) = prefs.save_durations(&update.durations()) {
                warn!(error = %e, "failed to persist durations");
            }
            if let Err(e) = prefs.save_completed(update.completed()) {
                warn!(error = %e, "failed to persist completed count");
            }
            println!(
                "work={} break={} count={}",
                update.durations().minutes(Mode::Work),
                update.durations().minutes(Mode::Break),
                update.completed()
            );
        }
    }
    Ok(())
}
