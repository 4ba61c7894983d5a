//! Elapsed-time driven progress state machine.

use std::time::Duration;

use crate::view::ProgressView;

/// Time the simulated analysis takes from activation to completion.
pub const TOTAL_DURATION: Duration = Duration::from_millis(6000);

/// Interval between progress ticks.
pub const TICK_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressState {
    /// `progress` is a percentage in `0.0..=100.0`.
    Running { progress: f64 },
    Complete,
}

/// Result of feeding one tick into the simulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    Progressed(f64),
    /// The tick that moved the simulator to `Complete`. Emitted exactly once.
    Completed,
    /// Tick received after completion.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct ProgressSimulator {
    total: Duration,
    state: ProgressState,
}

impl ProgressSimulator {
    pub fn new(total: Duration) -> Self {
        Self {
            total,
            state: ProgressState::Running { progress: 0.0 },
        }
    }

    /// A simulator with the standard six second duration.
    pub fn standard() -> Self {
        Self::new(TOTAL_DURATION)
    }

    pub fn state(&self) -> ProgressState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.state, ProgressState::Complete)
    }

    pub fn progress(&self) -> f64 {
        match self.state {
            ProgressState::Running { progress } => progress,
            ProgressState::Complete => 100.0,
        }
    }

    /// Advance to `elapsed` since activation.
    ///
    /// Progress never moves backwards, even if `elapsed` does.
    pub fn tick(&mut self, elapsed: Duration) -> TickOutcome {
        let ProgressState::Running { progress: current } = self.state else {
            return TickOutcome::Ignored;
        };

        if elapsed >= self.total {
            self.state = ProgressState::Complete;
            return TickOutcome::Completed;
        }

        let computed = (elapsed.as_secs_f64() / self.total.as_secs_f64() * 100.0).min(100.0);
        let progress = current.max(computed);
        self.state = ProgressState::Running { progress };
        TickOutcome::Progressed(progress)
    }

    pub fn view(&self) -> ProgressView {
        match self.state {
            ProgressState::Running { progress } => ProgressView::running(progress),
            ProgressState::Complete => ProgressView::Complete,
        }
    }
}

impl Default for ProgressSimulator {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn starts_running_at_zero() {
        let sim = ProgressSimulator::standard();
        assert_eq!(sim.state(), ProgressState::Running { progress: 0.0 });
        assert_eq!(sim.view().percent(), Some(0));
    }

    #[test]
    fn progress_is_proportional_to_elapsed() {
        let mut sim = ProgressSimulator::standard();
        assert_eq!(sim.tick(ms(1500)), TickOutcome::Progressed(25.0));
        assert_eq!(sim.tick(ms(3000)), TickOutcome::Progressed(50.0));
        assert_eq!(sim.view().percent(), Some(50));
    }

    #[test]
    fn completes_exactly_once() {
        let mut sim = ProgressSimulator::standard();
        let outcomes: Vec<TickOutcome> = [0, 50, 5950, 6000, 6050, 9000]
            .into_iter()
            .map(|t| sim.tick(ms(t)))
            .collect();

        let completed = outcomes
            .iter()
            .filter(|o| **o == TickOutcome::Completed)
            .count();
        assert_eq!(completed, 1);
        assert_eq!(outcomes[3], TickOutcome::Completed);
        assert_eq!(&outcomes[4..], &[TickOutcome::Ignored, TickOutcome::Ignored]);
        assert!(sim.is_complete());
        assert_eq!(sim.progress(), 100.0);
    }

    #[test]
    fn progress_is_monotonic_and_clamped() {
        let mut sim = ProgressSimulator::standard();
        let mut last = 0.0;
        for t in [10, 400, 300, 2000, 1999, 5999, 100] {
            sim.tick(ms(t));
            let p = sim.progress();
            assert!(p >= last, "{p} < {last}");
            assert!(p <= 100.0);
            last = p;
        }
    }

    #[test]
    fn zero_duration_completes_on_first_tick() {
        let mut sim = ProgressSimulator::new(Duration::ZERO);
        assert_eq!(sim.tick(Duration::ZERO), TickOutcome::Completed);
        assert_eq!(sim.tick(ms(1)), TickOutcome::Ignored);
    }
}
