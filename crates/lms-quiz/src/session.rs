//! One learner's attempt at one quiz.
//!
//! ```text
//! loading ──ok──▶ ready ──submit/expiry──▶ submitting ──ok──▶ submitted
//!    │              ▲                           │
//!    └──err──▶ failed ──retry──▶ loading        └──err──▶ ready
//! ```
//!
//! The countdown only moves when [`QuizSession::tick`] is called. A
//! [`CountdownTimer`] supplies those ticks in real time and exists only while
//! the session is `ready` with time left, so leaving `ready` stops it.

use std::collections::HashMap;
use std::time::Duration;

use lms_client::{ActionExecutor, ExecutionState, LmsBackend};
use lms_core::ActionResult;
use lms_core::CoreError;
use lms_core::entities::{AnswerSubmission, QuizContent};
use lms_core::enums::QuizPhase;
use lms_core::ids::{QuestionId, QuizId, SessionToken};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::countdown::{Countdown, CountdownTimer, URGENT_THRESHOLD_SECS};
use crate::error::QuizError;

const SUBMITTED_MESSAGE: &str = "Quiz submitted successfully!";
const AUTO_SUBMITTED_MESSAGE: &str = "Time's up! Your quiz was auto-submitted.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub tick_period: Duration,
    pub urgent_threshold_secs: u64,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_secs(1),
            urgent_threshold_secs: URGENT_THRESHOLD_SECS,
        }
    }
}

/// Externally visible snapshot of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    Loading,
    /// `remaining_seconds` is `None` for untimed quizzes.
    Ready { remaining_seconds: Option<u64> },
    Submitting,
    Submitted { message: String },
    Failed { error: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted { auto: bool },
    /// The session was already submitted; nothing was sent.
    AlreadySubmitted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing to count: untimed, expired, or not `ready`.
    Idle,
    Counting { remaining: u64 },
    AutoSubmitted,
    /// The expiry submission failed. The session is `ready` with the clock at
    /// zero; a manual submit retries without the completeness check.
    AutoSubmitFailed { error: String },
}

pub struct QuizSession<B> {
    backend: B,
    token: SessionToken,
    quiz_id: QuizId,
    options: SessionOptions,
    executor: ActionExecutor,
    phase: QuizPhase,
    content: Option<QuizContent>,
    answers: HashMap<QuestionId, String>,
    countdown: Option<Countdown>,
    timer: Option<CountdownTimer>,
    load_error: Option<String>,
    message: Option<String>,
    submitted: Option<Vec<AnswerSubmission>>,
}

impl<B: LmsBackend> QuizSession<B> {
    pub fn new(backend: B, token: SessionToken, quiz_id: impl Into<QuizId>) -> Self {
        Self::with_options(backend, token, quiz_id, SessionOptions::default())
    }

    pub fn with_options(
        backend: B,
        token: SessionToken,
        quiz_id: impl Into<QuizId>,
        options: SessionOptions,
    ) -> Self {
        Self {
            backend,
            token,
            quiz_id: quiz_id.into(),
            options,
            executor: ActionExecutor::new(),
            phase: QuizPhase::Loading,
            content: None,
            answers: HashMap::new(),
            countdown: None,
            timer: None,
            load_error: None,
            message: None,
            submitted: None,
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub const fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn state(&self) -> SessionState {
        match self.phase {
            QuizPhase::Loading => SessionState::Loading,
            QuizPhase::Ready => SessionState::Ready {
                remaining_seconds: self.remaining_seconds(),
            },
            QuizPhase::Submitting => SessionState::Submitting,
            QuizPhase::Submitted => SessionState::Submitted {
                message: self.message.clone().unwrap_or_default(),
            },
            QuizPhase::Failed => SessionState::Failed {
                error: self.load_error.clone().unwrap_or_default(),
            },
        }
    }

    pub const fn quiz_id(&self) -> &QuizId {
        &self.quiz_id
    }

    pub const fn content(&self) -> Option<&QuizContent> {
        self.content.as_ref()
    }

    pub fn answer(&self, question_id: &QuestionId) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    /// Answers in question order, unanswered questions omitted.
    pub fn payload(&self) -> Vec<AnswerSubmission> {
        let Some(content) = &self.content else {
            return Vec::new();
        };
        content
            .questions
            .iter()
            .filter_map(|question| {
                self.answers
                    .get(&question.id)
                    .map(|answer| AnswerSubmission::new(question.id.clone(), answer.clone()))
            })
            .collect()
    }

    /// Questions with no answer or a blank one.
    pub fn unanswered_count(&self) -> usize {
        self.content.as_ref().map_or(0, |content| {
            content
                .questions
                .iter()
                .filter(|question| {
                    self.answers
                        .get(&question.id)
                        .is_none_or(|answer| answer.trim().is_empty())
                })
                .count()
        })
    }

    pub fn remaining_seconds(&self) -> Option<u64> {
        self.countdown.map(Countdown::remaining)
    }

    /// `m:ss` for timed quizzes.
    pub fn countdown_display(&self) -> Option<String> {
        self.countdown.map(Countdown::display)
    }

    pub fn is_urgent(&self) -> bool {
        self.countdown
            .is_some_and(|countdown| countdown.is_urgent(self.options.urgent_threshold_secs))
    }

    pub const fn is_counting_down(&self) -> bool {
        self.timer.is_some()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Answers the backend accepted, once submitted.
    pub fn submitted_answers(&self) -> Option<&[AnswerSubmission]> {
        self.submitted.as_deref()
    }

    pub fn execution_state(&self) -> ExecutionState {
        self.executor.state()
    }

    pub fn last_error(&self) -> Option<String> {
        self.executor.error()
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Fetch the quiz content. Valid from `loading` and `failed`.
    ///
    /// On success the answers are reset, the countdown is armed from the time
    /// limit and the session becomes `ready`.
    ///
    /// # Errors
    ///
    /// `QuizError::LoadFailed` when the backend rejects or cannot be reached;
    /// the session is then `failed`. `QuizError::InvalidPhase` from any other
    /// phase.
    pub async fn load(&mut self) -> Result<(), QuizError> {
        match self.phase {
            QuizPhase::Loading => {}
            QuizPhase::Failed => self.transition(QuizPhase::Loading)?,
            phase => {
                return Err(QuizError::InvalidPhase {
                    operation: "load",
                    phase,
                });
            }
        }
        self.load_error = None;

        let (backend, token, quiz_id) = (&self.backend, &self.token, &self.quiz_id);
        let result = self
            .executor
            .execute(|| backend.fetch_quiz(token, quiz_id))
            .await;

        match result {
            ActionResult::Ok(content) => {
                self.countdown = content.time_limit_seconds().map(Countdown::from_seconds);
                self.answers.clear();
                info!(
                    quiz = %self.quiz_id,
                    questions = content.questions.len(),
                    time_limit_secs = ?self.remaining_seconds(),
                    "quiz loaded"
                );
                self.content = Some(content);
                self.transition(QuizPhase::Ready)?;
                self.arm_timer();
                Ok(())
            }
            ActionResult::Err(error) => {
                self.load_error = Some(error.clone());
                self.transition(QuizPhase::Failed)?;
                Err(QuizError::LoadFailed(error))
            }
        }
    }

    /// Re-attempt a failed load.
    ///
    /// # Errors
    ///
    /// `QuizError::InvalidPhase` unless the session is `failed`, otherwise as
    /// [`Self::load`].
    pub async fn retry(&mut self) -> Result<(), QuizError> {
        if self.phase != QuizPhase::Failed {
            return Err(QuizError::InvalidPhase {
                operation: "retry",
                phase: self.phase,
            });
        }
        self.load().await
    }

    /// Set or overwrite the answer to one question. Does not touch the
    /// countdown.
    ///
    /// # Errors
    ///
    /// `QuizError::AnswersLocked` after submission, `QuizError::InvalidPhase`
    /// outside `ready`, `QuizError::UnknownQuestion` for an id not in the quiz
    /// and `QuizError::InvalidAnswer` for a value that is not one of the
    /// question's choices.
    pub fn record_answer(
        &mut self,
        question_id: impl Into<QuestionId>,
        value: impl Into<String>,
    ) -> Result<(), QuizError> {
        match self.phase {
            QuizPhase::Ready => {}
            QuizPhase::Submitted => return Err(QuizError::AnswersLocked),
            phase => {
                return Err(QuizError::InvalidPhase {
                    operation: "record an answer",
                    phase,
                });
            }
        }

        let question_id = question_id.into();
        let value = value.into();
        let question = self
            .content
            .as_ref()
            .and_then(|content| content.question(&question_id))
            .ok_or_else(|| QuizError::UnknownQuestion(question_id.clone()))?;
        if !question.kind.accepts(&value) {
            return Err(QuizError::InvalidAnswer {
                question_id,
                answer: value,
            });
        }

        debug!(question = %question_id, "answer recorded");
        self.answers.insert(question_id, value);
        Ok(())
    }

    /// Submit on the learner's request.
    ///
    /// Every question must have a non-blank answer, unless the countdown has
    /// already reached zero. Calling this after a successful submission is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// `QuizError::Incomplete` when questions are unanswered; nothing is sent.
    /// `QuizError::SubmissionFailed` when the backend call fails; the session
    /// returns to `ready` with answers intact. `QuizError::InvalidPhase` while
    /// loading, failed or already submitting.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, QuizError> {
        match self.phase {
            QuizPhase::Ready => {}
            QuizPhase::Submitted => return Ok(SubmitOutcome::AlreadySubmitted),
            phase => {
                return Err(QuizError::InvalidPhase {
                    operation: "submit",
                    phase,
                });
            }
        }

        let expired = self.countdown.is_some_and(Countdown::is_expired);
        if !expired {
            let remaining = self.unanswered_count();
            if remaining > 0 {
                let error = QuizError::Incomplete { remaining };
                self.executor.set_error(error.to_string());
                return Err(error);
            }
        }

        self.send(expired).await
    }

    /// Consume one second of the countdown. When it reaches zero the current
    /// answers are submitted as they are.
    ///
    /// # Errors
    ///
    /// Only for an illegal phase transition, which indicates a bug.
    pub async fn tick(&mut self) -> Result<TickOutcome, QuizError> {
        if self.phase != QuizPhase::Ready {
            return Ok(TickOutcome::Idle);
        }
        let Some(countdown) = self.countdown.as_mut() else {
            return Ok(TickOutcome::Idle);
        };
        if countdown.is_expired() {
            return Ok(TickOutcome::Idle);
        }

        let remaining = countdown.tick();
        if remaining > 0 {
            return Ok(TickOutcome::Counting { remaining });
        }

        info!(quiz = %self.quiz_id, "time limit reached, auto-submitting");
        match self.send(true).await {
            Ok(_) => Ok(TickOutcome::AutoSubmitted),
            Err(QuizError::SubmissionFailed(error)) => {
                warn!(quiz = %self.quiz_id, %error, "auto-submit failed");
                Ok(TickOutcome::AutoSubmitFailed { error })
            }
            Err(other) => Err(other),
        }
    }

    /// Wait for the running timer's next tick. Returns `None` straight away
    /// when no timer is running.
    pub async fn next_tick(&mut self) -> Option<()> {
        match self.timer.as_mut() {
            Some(timer) => timer.tick().await,
            None => None,
        }
    }

    /// Drive the countdown in real time until it settles: auto-submitted, or
    /// auto-submit failed. Returns `Idle` at once for untimed quizzes or when
    /// the session is not `ready`.
    ///
    /// # Errors
    ///
    /// As [`Self::tick`].
    pub async fn run_countdown(&mut self) -> Result<TickOutcome, QuizError> {
        loop {
            if self.next_tick().await.is_none() {
                return Ok(TickOutcome::Idle);
            }
            match self.tick().await? {
                TickOutcome::Counting { .. } | TickOutcome::Idle => {}
                settled => return Ok(settled),
            }
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    async fn send(&mut self, auto: bool) -> Result<SubmitOutcome, QuizError> {
        self.transition(QuizPhase::Submitting)?;
        let answers = self.payload();

        let (backend, token, quiz_id) = (&self.backend, &self.token, &self.quiz_id);
        let result = self
            .executor
            .execute(|| backend.submit_quiz(token, quiz_id, &answers, auto))
            .await;

        match result {
            ActionResult::Ok(()) => {
                self.transition(QuizPhase::Submitted)?;
                info!(
                    quiz = %self.quiz_id,
                    answers = answers.len(),
                    auto_submitted = auto,
                    "quiz submitted"
                );
                self.submitted = Some(answers);
                self.message = Some(
                    if auto {
                        AUTO_SUBMITTED_MESSAGE
                    } else {
                        SUBMITTED_MESSAGE
                    }
                    .to_owned(),
                );
                Ok(SubmitOutcome::Submitted { auto })
            }
            ActionResult::Err(error) => {
                self.transition(QuizPhase::Ready)?;
                self.arm_timer();
                Err(QuizError::SubmissionFailed(error))
            }
        }
    }

    fn transition(&mut self, next: QuizPhase) -> Result<(), QuizError> {
        if !self.phase.can_transition_to(next) {
            return Err(CoreError::InvalidTransition {
                from: self.phase,
                to: next,
            }
            .into());
        }
        debug!(quiz = %self.quiz_id, from = %self.phase, to = %next, "session transition");
        if next != QuizPhase::Ready {
            self.timer = None;
        }
        self.phase = next;
        Ok(())
    }

    fn arm_timer(&mut self) {
        let has_time_left = self.countdown.is_some_and(|countdown| !countdown.is_expired());
        if self.phase == QuizPhase::Ready && has_time_left && self.timer.is_none() {
            self.timer = Some(CountdownTimer::start(self.options.tick_period));
        }
    }
}
