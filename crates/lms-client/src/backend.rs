use std::future::Future;
use std::sync::Arc;

use lms_core::ActionResult;
use lms_core::draft::NewQuiz;
use lms_core::entities::{AnswerSubmission, QuizContent, SubmissionRecord};
use lms_core::ids::{QuizId, SessionToken};

use crate::error::TransportError;

/// `Err` is a call that never completed; `Ok(ActionResult::Err)` is a
/// rejection reported by the backend.
pub type BackendResult<T> = Result<ActionResult<T>, TransportError>;

/// Remote operations the client relies on.
///
/// The transport behind an implementation is opaque to callers. Every
/// operation takes the session token explicitly.
pub trait LmsBackend: Send + Sync {
    fn fetch_quiz(
        &self,
        token: &SessionToken,
        quiz_id: &QuizId,
    ) -> impl Future<Output = BackendResult<QuizContent>> + Send;

    /// `auto_submitted` tells the backend the countdown expired on the client.
    fn submit_quiz(
        &self,
        token: &SessionToken,
        quiz_id: &QuizId,
        answers: &[AnswerSubmission],
        auto_submitted: bool,
    ) -> impl Future<Output = BackendResult<()>> + Send;

    fn create_quiz(
        &self,
        token: &SessionToken,
        quiz: &NewQuiz,
    ) -> impl Future<Output = BackendResult<QuizId>> + Send;

    fn list_submissions(
        &self,
        token: &SessionToken,
        quiz_id: &QuizId,
    ) -> impl Future<Output = BackendResult<Vec<SubmissionRecord>>> + Send;
}

impl<B: LmsBackend> LmsBackend for Arc<B> {
    fn fetch_quiz(
        &self,
        token: &SessionToken,
        quiz_id: &QuizId,
    ) -> impl Future<Output = BackendResult<QuizContent>> + Send {
        (**self).fetch_quiz(token, quiz_id)
    }

    fn submit_quiz(
        &self,
        token: &SessionToken,
        quiz_id: &QuizId,
        answers: &[AnswerSubmission],
        auto_submitted: bool,
    ) -> impl Future<Output = BackendResult<()>> + Send {
        (**self).submit_quiz(token, quiz_id, answers, auto_submitted)
    }

    fn create_quiz(
        &self,
        token: &SessionToken,
        quiz: &NewQuiz,
    ) -> impl Future<Output = BackendResult<QuizId>> + Send {
        (**self).create_quiz(token, quiz)
    }

    fn list_submissions(
        &self,
        token: &SessionToken,
        quiz_id: &QuizId,
    ) -> impl Future<Output = BackendResult<Vec<SubmissionRecord>>> + Send {
        (**self).list_submissions(token, quiz_id)
    }
}
