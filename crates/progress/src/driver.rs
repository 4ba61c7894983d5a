//! Wires a [`ProgressSimulator`] to a [`Ticker`] and publishes views on a watch channel.

use std::ops::ControlFlow;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use crate::simulator::{ProgressSimulator, TickOutcome, TICK_INTERVAL, TOTAL_DURATION};
use crate::ticker::{Ticker, TickerHandle};
use crate::view::ProgressView;

/// An active progress indicator.
///
/// Activation records the start instant and acquires a ticker; the ticker is released when the
/// simulator completes, on [`ProgressDriver::deactivate`], or when the driver is dropped.
#[derive(Debug)]
pub struct ProgressDriver {
    ticker: TickerHandle,
    views: watch::Receiver<ProgressView>,
}

impl ProgressDriver {
    /// Activate with the standard six second duration and 50 ms ticks.
    pub fn activate_standard() -> Self {
        Self::activate(TOTAL_DURATION, TICK_INTERVAL)
    }

    /// Must be called from within a tokio runtime.
    pub fn activate(total: Duration, interval: Duration) -> Self {
        let start = Instant::now();
        let mut simulator = ProgressSimulator::new(total);
        let (tx, views) = watch::channel(simulator.view());

        let ticker = Ticker::start(interval, move |now| {
            let outcome = simulator.tick(now.saturating_duration_since(start));
            tx.send_replace(simulator.view());
            match outcome {
                TickOutcome::Completed => {
                    tracing::debug!(
                        "progress complete after {:?}",
                        now.saturating_duration_since(start)
                    );
                    ControlFlow::Break(())
                }
                TickOutcome::Progressed(_) => ControlFlow::Continue(()),
                TickOutcome::Ignored => ControlFlow::Break(()),
            }
        });

        Self { ticker, views }
    }

    /// Latest published view.
    pub fn view(&self) -> ProgressView {
        *self.views.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ProgressView> {
        self.views.clone()
    }

    /// Whether the ticker is still scheduled.
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_active()
    }

    /// Wait until the complete view is published.
    ///
    /// Returns the last view seen if the driver stopped before completing.
    pub async fn completed(&self) -> ProgressView {
        let mut rx = self.views.clone();
        let result = rx.wait_for(|v| v.is_complete()).await.map(|v| *v);
        match result {
            Ok(view) => view,
            Err(_) => *rx.borrow(),
        }
    }

    /// Release the ticker. Safe before or after completion.
    pub fn deactivate(mut self) {
        self.ticker.cancel();
    }
}
