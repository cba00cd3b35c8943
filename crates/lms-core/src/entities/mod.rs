//! Quiz entities shared by the client, the session state machine, and the CLI.

mod quiz;
mod submission;

pub use quiz::{AnswerSubmission, QuestionKind, QuizContent, QuizQuestion, TRUE_FALSE_OPTIONS};
pub use submission::SubmissionRecord;
