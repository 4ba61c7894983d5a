//! Cancellable periodic callbacks on the tokio runtime.
//!
//! A [`Ticker`] owns nothing; [`Ticker::start`] hands back a [`TickerHandle`] which is the only
//! way to stop the schedule. Dropping the handle cancels it, so a ticker can never outlive the
//! component that started it.

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

pub struct Ticker;

impl Ticker {
    /// Call `on_tick` every `period`, starting one period from now.
    ///
    /// The schedule stops when `on_tick` returns [`ControlFlow::Break`], when the handle is
    /// cancelled, or when the handle is dropped.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<F>(period: Duration, mut on_tick: F) -> TickerHandle
    where
        F: FnMut(Instant) -> ControlFlow<()> + Send + 'static,
    {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = cancelled.clone();
        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                let now = interval.tick().await;
                if flag.load(Ordering::Acquire) {
                    break;
                }
                if on_tick(now).is_break() {
                    break;
                }
            }
        });

        TickerHandle {
            task: Some(task),
            cancelled,
        }
    }
}

#[derive(Debug)]
pub struct TickerHandle {
    task: Option<JoinHandle<()>>,
    cancelled: Arc<AtomicBool>,
}

impl TickerHandle {
    /// Stop the schedule. Idempotent.
    ///
    /// No new callback starts once this returns. On a multi-thread runtime a callback already
    /// running on another worker is not interrupted and finishes first.
    pub fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::Release);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Whether callbacks may still run.
    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
