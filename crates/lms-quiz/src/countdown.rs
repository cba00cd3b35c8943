//! Countdown arithmetic and the tick source that drives it.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Below this many remaining seconds the countdown is displayed as urgent.
pub const URGENT_THRESHOLD_SECS: u64 = 300;

/// Shortest period the tick task accepts. Shorter requests are raised to it.
pub const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);

/// Seconds left on a timed quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: u64,
}

impl Countdown {
    #[must_use]
    pub const fn from_seconds(seconds: u64) -> Self {
        Self { remaining: seconds }
    }

    #[must_use]
    pub const fn remaining(self) -> u64 {
        self.remaining
    }

    #[must_use]
    pub const fn is_expired(self) -> bool {
        self.remaining == 0
    }

    /// Consume one second and return what is left. Never goes below zero.
    pub const fn tick(&mut self) -> u64 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }

    /// Styling hint only.
    #[must_use]
    pub const fn is_urgent(self, threshold_secs: u64) -> bool {
        self.remaining < threshold_secs
    }

    #[must_use]
    pub fn display(self) -> String {
        format_clock(self.remaining)
    }
}

/// Format seconds as `minutes:seconds`, seconds padded to two digits.
#[must_use]
pub fn format_clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Background task emitting one tick per period.
///
/// Ticks queue up in an unbounded channel so none are lost while the owner is
/// busy. Dropping the timer aborts the task.
#[derive(Debug)]
pub struct CountdownTimer {
    ticks: mpsc::UnboundedReceiver<()>,
    task: JoinHandle<()>,
}

impl CountdownTimer {
    /// Spawn the tick task on the current tokio runtime. The first tick fires
    /// one full period after the call. A zero period is raised to
    /// [`MIN_TICK_PERIOD`].
    #[must_use]
    pub fn start(period: Duration) -> Self {
        let period = period.max(MIN_TICK_PERIOD);
        let (sender, ticks) = mpsc::unbounded_channel();
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
            loop {
                interval.tick().await;
                if sender.send(()).is_err() {
                    break;
                }
            }
        });
        Self { ticks, task }
    }

    /// Wait for the next tick. `None` once the task has stopped.
    pub async fn tick(&mut self) -> Option<()> {
        self.ticks.recv().await
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
