//! Background once-per-period tick source for the rest countdown
//!
//! The ticker task is aborted when the handle is dropped, so a screen that
//! unmounts while resting never receives stray ticks.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::trace;

/// Handle to a running tick task
#[derive(Debug)]
pub struct RestTicker {
    handle: JoinHandle<()>,
    rx: mpsc::Receiver<()>,
}

impl RestTicker {
    /// Spawn a task emitting one tick per `period`, first tick after one period
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(period: Duration) -> Self {
        let (tx, rx) = mpsc::channel(16);
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                trace!("rest tick");
                if tx.send(()).await.is_err() {
                    break;
                }
            }
        });
        Self { handle, rx }
    }

    /// Wait for the next tick
    pub async fn recv(&mut self) -> Option<()> {
        self.rx.recv().await
    }

    /// Take every tick that has already arrived without waiting
    pub fn drain(&mut self) -> usize {
        let mut count = 0;
        while self.rx.try_recv().is_ok() {
            count += 1;
        }
        count
    }
}

impl Drop for RestTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
