//! Quiz-taking behavior.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default countdown tick period in milliseconds.
const fn default_tick_millis() -> u64 {
    1000
}

/// Remaining seconds below which the countdown is shown as urgent.
const fn default_urgent_threshold_secs() -> u64 {
    300
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuizConfig {
    /// Wall-clock length of one countdown second.
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,

    #[serde(default = "default_urgent_threshold_secs")]
    pub urgent_threshold_secs: u64,
}

impl QuizConfig {
    #[must_use]
    pub const fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            tick_millis: default_tick_millis(),
            urgent_threshold_secs: default_urgent_threshold_secs(),
        }
    }
}
