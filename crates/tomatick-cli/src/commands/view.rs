use std::io::{self, Write};

use chrono::{DateTime, Local};
use tomatick_core::timer::format_clock;
use tomatick_core::{Mode, Prompt, Snapshot, View};

/// Single redrawn status line on stdout.
pub struct TerminalView {
    set_title: bool,
}

impl TerminalView {
    pub fn new(set_title: bool) -> Self {
        Self { set_title }
    }

    fn write(&self, text: &str) {
        let mut out = io::stdout().lock();
        // A closed stdout only loses display output.
        let _ = out.write_all(text.as_bytes()).and_then(|()| out.flush());
    }
}

pub fn status_line(snapshot: &Snapshot) -> String {
    let timer = &snapshot.timer;
    format!(
        "{:<8} {}  {:<7}  completed: {}",
        timer.mode.label(),
        format_clock(timer.remaining_secs),
        if timer.is_running { "running" } else { "paused" },
        snapshot.completed
    )
}

impl View for TerminalView {
    fn render(&mut self, snapshot: &Snapshot, pending: Option<Prompt>) {
        if pending.is_some() {
            return;
        }
        self.write(&format!("\r\x1b[2K{}", status_line(snapshot)));
    }

    fn prompt(&mut self, prompt: Prompt) {
        self.write(&format!("\n{} [y/N] ", prompt.message()));
    }

    fn title(&mut self, title: &str) {
        if self.set_title {
            self.write(&format!("\x1b]0;{title}\x07"));
        }
    }

    fn declined(&mut self) {
        self.write("cancelled\n");
    }

    fn completed(&mut self, finished: Mode, next: Mode, at: DateTime<Local>) {
        self.write(&format!(
            "\n{} finished at {}, starting {}\n",
            finished.label(),
            at.format("%H:%M"),
            next.label().to_lowercase()
        ));
    }
}
