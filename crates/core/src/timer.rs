//! Scoped periodic timers for page views.
//!
//! A [`Ticker`] owns the task that drives it. Dropping the ticker aborts the task, so a view that
//! is unmounted can never receive a late tick.

use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Shortest period a ticker runs at; shorter requests are raised to it.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Counts periods elapsed since it was started, optionally stopping after `limit` ticks.
#[derive(Debug)]
pub struct Ticker {
    ticks: watch::Receiver<u64>,
    task: JoinHandle<()>,
}

impl Ticker {
    /// Start a ticker on the current tokio runtime.
    ///
    /// The first tick fires one full `period` after the call. A zero period runs at
    /// [`MIN_PERIOD`].
    pub fn spawn(period: Duration, limit: Option<u64>) -> Self {
        let period = period.max(MIN_PERIOD);
        let (tx, rx) = watch::channel(0u64);
        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut count = 0u64;
            loop {
                if limit.is_some_and(|limit| count >= limit) {
                    break;
                }
                interval.tick().await;
                count += 1;
                if tx.send(count).is_err() {
                    break;
                }
            }
        });
        Self { ticks: rx, task }
    }

    pub fn ticks(&self) -> u64 {
        *self.ticks.borrow()
    }

    /// Wait for the next tick. Returns `false` once the ticker has reached its limit.
    pub async fn changed(&mut self) -> bool {
        self.ticks.changed().await.is_ok()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.task.abort();
    }
}
