//! Status enums for the LMS client.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! Status enums with state machines provide `allowed_next_states()` to enforce
//! valid transitions at the application layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// QuizPhase
// ---------------------------------------------------------------------------

/// Phase of a quiz attempt on the client.
///
/// ```text
/// loading → ready → submitting → submitted
///         → failed → loading (retry)
///                  submitting → ready (rollback on failed submission)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuizPhase {
    Loading,
    Ready,
    Submitting,
    Submitted,
    Failed,
}

impl QuizPhase {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Loading => &[Self::Ready, Self::Failed],
            Self::Ready => &[Self::Submitting],
            Self::Submitting => &[Self::Submitted, Self::Ready],
            Self::Failed => &[Self::Loading],
            Self::Submitted => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// `Submitted` is the only terminal phase; `Failed` is recoverable.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Submitted)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Submitting => "submitting",
            Self::Submitted => "submitted",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for QuizPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
