use lms_core::CoreError;
use lms_core::enums::QuizPhase;
use lms_core::ids::QuestionId;
use thiserror::Error;

/// Everything that can go wrong during one quiz attempt. None of these end
/// the session; each is recoverable by the learner.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    /// Quiz content could not be fetched. Recover with `retry`.
    #[error("failed to load quiz: {0}")]
    LoadFailed(String),

    /// Manual submit with unanswered questions. Nothing was sent.
    #[error("{remaining} question(s) remaining")]
    Incomplete { remaining: usize },

    /// The backend rejected or never received the submission. The session is
    /// back in `ready` and can be submitted again.
    #[error("submission failed: {0}")]
    SubmissionFailed(String),

    #[error("cannot {operation} while the quiz is {phase}")]
    InvalidPhase {
        operation: &'static str,
        phase: QuizPhase,
    },

    #[error("unknown question: {0}")]
    UnknownQuestion(QuestionId),

    #[error("'{answer}' is not an option for question {question_id}")]
    InvalidAnswer {
        question_id: QuestionId,
        answer: String,
    },

    #[error("answers are locked after submission")]
    AnswersLocked,

    #[error(transparent)]
    Core(#[from] CoreError),
}
