use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use super::ticker::{Tick, TickerHandle};
use crate::audio::Chime;
use crate::controller::{Outcome, TimerController};
use crate::storage::KvStore;
use crate::timer::{Effect, Intent, Mode, Prompt, Snapshot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    Intent(Intent),
    /// Answer to the outstanding prompt. Ignored when nothing is pending.
    Answer(bool),
    Quit,
}

impl From<Intent> for UserInput {
    fn from(intent: Intent) -> Self {
        UserInput::Intent(intent)
    }
}

/// Presentation side. Receives state read-only after every change.
pub trait View {
    /// `pending` is set while a prompt awaits an answer.
    fn render(&mut self, snapshot: &Snapshot, pending: Option<Prompt>);
    fn prompt(&mut self, prompt: Prompt);
    fn title(&mut self, _title: &str) {}
    fn declined(&mut self) {}
    fn completed(&mut self, _finished: Mode, _next: Mode, _at: DateTime<Local>) {}
}

pub struct Driver<S, C, V> {
    controller: TimerController<S, C>,
    view: V,
    period: Duration,
    ticker: Option<TickerHandle>,
    generation: u64,
    pending: Option<(Intent, Prompt)>,
}

impl<S: KvStore, C: Chime, V: View> Driver<S, C, V> {
    pub fn new(controller: TimerController<S, C>, view: V, period: Duration) -> Self {
        Self {
            controller,
            view,
            period,
            ticker: None,
            generation: 0,
            pending: None,
        }
    }

    pub fn controller(&self) -> &TimerController<S, C> {
        &self.controller
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    /// Process input until `Quit` or until every sender is gone. The ticker
    /// is cancelled before returning.
    pub async fn run(mut self, mut inputs: UnboundedReceiver<UserInput>) -> Self {
        let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();
        self.refresh();

        loop {
            tokio::select! {
                biased;
                input = inputs.recv() => match input {
                    Some(UserInput::Quit) | None => break,
                    Some(input) => self.handle_input(input, &tick_tx),
                },
                Some(tick) = tick_rx.recv() => self.handle_tick(tick),
            }
        }

        self.stop_ticker();
        self
    }

    fn handle_input(&mut self, input: UserInput, tick_tx: &UnboundedSender<Tick>) {
        match input {
            UserInput::Intent(intent) => {
                self.pending = None;
                match self.controller.request(intent.clone()) {
                    Outcome::Applied(effects) => self.after(effects, tick_tx),
                    Outcome::NeedsConfirmation(prompt) => {
                        self.pending = Some((intent, prompt));
                        self.view.prompt(prompt);
                    }
                }
            }
            UserInput::Answer(yes) => match self.pending.take() {
                Some((intent, _)) if yes => {
                    let effects = self.controller.apply(intent);
                    self.after(effects, tick_tx);
                }
                Some(_) => {
                    self.view.declined();
                    self.refresh();
                }
                None => {}
            },
            UserInput::Quit => {}
        }
    }

    fn handle_tick(&mut self, tick: Tick) {
        let live = self.ticker.as_ref().map(TickerHandle::generation);
        if live != Some(tick.generation) {
            debug!(generation = tick.generation, "dropping stale tick");
            return;
        }
        // The countdown is frozen until the prompt is answered.
        if self.pending.is_some() {
            debug!(generation = tick.generation, "dropping tick while prompt is open");
            return;
        }
        let effects = self.controller.tick();
        for effect in effects {
            if let Effect::Completed { finished, next } = effect {
                self.view.completed(finished, next, Local::now());
            }
        }
        self.refresh();
    }

    fn after(&mut self, effects: Vec<Effect>, tick_tx: &UnboundedSender<Tick>) {
        for effect in effects {
            match effect {
                Effect::StartTicker => self.start_ticker(tick_tx),
                Effect::StopTicker => self.stop_ticker(),
                Effect::Completed { finished, next } => {
                    self.view.completed(finished, next, Local::now())
                }
                _ => {}
            }
        }
        self.refresh();
    }

    fn start_ticker(&mut self, tick_tx: &UnboundedSender<Tick>) {
        self.stop_ticker();
        self.generation += 1;
        self.ticker = Some(TickerHandle::spawn(
            self.period,
            self.generation,
            tick_tx.clone(),
        ));
    }

    fn stop_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.cancel();
        }
    }

    fn refresh(&mut self) {
        let snapshot = *self.controller.snapshot();
        self.view.render(&snapshot, self.pending.as_ref().map(|(_, p)| *p));
        self.view.title(&snapshot.title());
    }
}
