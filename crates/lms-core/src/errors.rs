//! Cross-cutting error types for the LMS client.
//!
//! Domain-specific errors (`TransportError`, `QuizError`, `ConfigError`) are
//! defined in their respective crates. They converge into `anyhow` in `lms-cli`.

use thiserror::Error;

use crate::enums::QuizPhase;

/// Errors that can be raised by any LMS crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid state transition from {from} to {to}")]
    InvalidTransition { from: QuizPhase, to: QuizPhase },

    /// Data failed validation. The message is shown to the user as is.
    #[error("{0}")]
    Validation(String),
}
