use crate::logger;
use crate::models::{QuestionId, REVEAL_SECONDS, TimerEvent};
use crate::quiz::Effect;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::AbortHandle;
use tokio::time::{Instant, interval_at, sleep};

const TICK: Duration = Duration::from_secs(1);

/// Owns every pending timer task. Must be used inside a tokio runtime.
#[derive(Debug)]
pub struct Scheduler {
    tx: UnboundedSender<TimerEvent>,
    pending: Vec<AbortHandle>,
}

impl Scheduler {
    pub fn new(tx: UnboundedSender<TimerEvent>) -> Self {
        Self {
            tx,
            pending: Vec::new(),
        }
    }

    pub fn apply(&mut self, effects: &[Effect]) {
        for effect in effects {
            match effect {
                Effect::CancelTimers => self.cancel_all(),
                Effect::StartCountdown(id) => self.start_countdown(*id),
                Effect::ScheduleReveal(id) => self.schedule_reveal(*id),
            }
        }
    }

    pub fn start_countdown(&mut self, id: QuestionId) {
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + TICK, TICK);
            loop {
                interval.tick().await;
                if tx.send(TimerEvent::Tick(id)).is_err() {
                    break;
                }
            }
        });
        self.pending.push(handle.abort_handle());
    }

    pub fn schedule_reveal(&mut self, id: QuestionId) {
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            sleep(Duration::from_secs(REVEAL_SECONDS)).await;
            let _ = tx.send(TimerEvent::RevealElapsed(id));
        });
        self.pending.push(handle.abort_handle());
    }

    pub fn cancel_all(&mut self) {
        if !self.pending.is_empty() {
            logger::log(&format!("Cancelling {} pending timer(s)", self.pending.len()));
        }
        for handle in self.pending.drain(..) {
            handle.abort();
        }
    }

    #[cfg(test)]
    fn pending(&self) -> usize {
        self.pending.iter().filter(|h| !h.is_finished()).count()
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
