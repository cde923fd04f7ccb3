use std::io::{BufRead, Write};

use clap::Subcommand;
use tomatick_core::{Database, Intent, Outcome, Prompt, Silent, TimerController};

#[derive(Subcommand)]
pub enum SessionAction {
    /// Reset the completed count to 0
    Reset {
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut controller = TimerController::load(&db, Silent);

    match action {
        SessionAction::Reset { yes } => {
            if let Outcome::NeedsConfirmation(prompt) = controller.request(Intent::ResetSession) {
                if !yes && !confirm(prompt)? {
                    println!("cancelled");
                    return Ok(());
                }
                controller.apply(Intent::ResetSession);
            }
            println!("completed count reset to {}", controller.completed());
        }
    }
    Ok(())
}

fn confirm(prompt: Prompt) -> std::io::Result<bool> {
    print!("{} [y/N] ", prompt.message());
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
