use std::io::BufRead;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedSender};
use tomatick_core::{chime_from_config, Config, Driver, TimerController, UserInput};
use tracing::{debug, info};

use super::input::{parse_line, HELP};
use super::view::TerminalView;
use crate::store::open_store;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let controller = TimerController::load(open_store(), chime_from_config(&config.notifications));
    let view = TerminalView::new(config.timer.set_terminal_title);
    let period = Duration::from_millis(config.timer.tick_interval_ms.max(1));
    let driver = Driver::new(controller, view, period);

    let (tx, rx) = mpsc::unbounded_channel();
    spawn_stdin_reader(tx);

    println!("{HELP}");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let driver = runtime.block_on(driver.run(rx));
    info!(completed = driver.controller().completed(), "session ended");
    println!();
    Ok(())
}

/// Forward stdin lines to the driver. EOF drops the sender, which ends the
/// session.
fn spawn_stdin_reader(tx: UnboundedSender<UserInput>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse_line(&line) {
                Ok(Some(input)) => {
                    let quit = input == UserInput::Quit;
                    if tx.send(input).is_err() || quit {
                        break;
                    }
                }
                Ok(None) => println!("{HELP}"),
                Err(e) => eprintln!("{e}"),
            }
        }
        debug!("stdin reader finished");
    });
}
