use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::AnswerSubmission;
use crate::ids::QuizId;

/// A submission as recorded by the backend, listed to instructors.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SubmissionRecord {
    pub quiz_id: QuizId,
    pub answers: Vec<AnswerSubmission>,
    /// `true` when the countdown expired and the client sent the answers on its own.
    #[serde(default)]
    pub auto_submitted: bool,
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionRecord {
    /// Number of questions with a non-empty answer.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers
            .iter()
            .filter(|answer| !answer.answer.trim().is_empty())
            .count()
    }
}
