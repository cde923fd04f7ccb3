use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

/// One tick from the ticker started as `generation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub generation: u64,
}

/// Owns the spawned interval task. Cancelled on [`cancel`](Self::cancel)
/// or drop, whichever comes first.
#[derive(Debug)]
pub struct TickerHandle {
    generation: u64,
    task: JoinHandle<()>,
}

impl TickerHandle {
    /// Start posting ticks every `period`. The first tick arrives one full
    /// period after this call.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(period: Duration, generation: u64, tx: UnboundedSender<Tick>) -> Self {
        let task = tokio::spawn(async move {
            let mut ticks = interval(period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick of a tokio interval completes immediately.
            ticks.tick().await;
            loop {
                ticks.tick().await;
                if tx.send(Tick { generation }).is_err() {
                    break;
                }
            }
        });
        debug!(generation, ?period, "ticker started");
        Self { generation, task }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cancel(self) {
        // Drop does the work.
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.task.abort();
        debug!(generation = self.generation, "ticker stopped");
    }
}
