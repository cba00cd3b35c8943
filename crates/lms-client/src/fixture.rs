//! In-process backend fed from JSON files.
//!
//! Quizzes live in a directory as `<quiz-id>.json` ([`QuizContent`]).
//! Submissions are kept in memory and, when a submissions directory is set,
//! appended to `<dir>/<quiz-id>.jsonl` so they survive between runs.
//!
//! A backend built with [`FixtureBackend::from_dir`] writes created quizzes
//! back into that directory; one built in memory keeps them in memory only.
//! Created quizzes are stored as learner-facing [`QuizContent`], so each
//! question's `correct_answer` is not kept and never reaches `fetch_quiz`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use lms_core::ActionResult;
use lms_core::draft::NewQuiz;
use lms_core::entities::{AnswerSubmission, QuizContent, QuizQuestion, SubmissionRecord};
use lms_core::ids::{QuizId, SessionToken};

use crate::backend::{BackendResult, LmsBackend};
use crate::error::TransportError;

const UNAUTHORIZED: &str = "Unauthorized";

/// Number of calls received per operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub fetch: usize,
    pub submit: usize,
    pub create: usize,
    pub list: usize,
}

#[derive(Debug, Default)]
struct Counters {
    fetch: AtomicUsize,
    submit: AtomicUsize,
    create: AtomicUsize,
    list: AtomicUsize,
}

#[derive(Debug, Default)]
pub struct FixtureBackend {
    quizzes: Mutex<BTreeMap<QuizId, QuizContent>>,
    submissions: Mutex<Vec<SubmissionRecord>>,
    required_token: Option<SessionToken>,
    quiz_dir: Option<PathBuf>,
    submissions_dir: Option<PathBuf>,
    counters: Counters,
}

impl FixtureBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.json` file in `dir` as a quiz keyed by its file stem.
    /// Quizzes created later are written back into the same directory.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Io` if the directory cannot be read and
    /// `TransportError::Decode` for a file that is not valid quiz content.
    pub async fn from_dir(dir: impl AsRef<Path>) -> Result<Self, TransportError> {
        let dir = dir.as_ref();
        let mut quizzes = BTreeMap::new();
        let mut entries = tokio::fs::read_dir(dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let raw = tokio::fs::read_to_string(&path).await?;
            let content: QuizContent = serde_json::from_str(&raw)?;
            tracing::debug!(quiz = stem, path = %path.display(), "loaded quiz fixture");
            quizzes.insert(QuizId::new(stem), content);
        }

        Ok(Self {
            quizzes: Mutex::new(quizzes),
            quiz_dir: Some(dir.to_path_buf()),
            ..Self::default()
        })
    }

    #[must_use]
    pub fn with_quiz(self, quiz_id: impl Into<QuizId>, content: QuizContent) -> Self {
        lock(&self.quizzes).insert(quiz_id.into(), content);
        self
    }

    /// Reject every call whose token differs from `token`.
    #[must_use]
    pub fn require_token(mut self, token: SessionToken) -> Self {
        self.required_token = Some(token);
        self
    }

    /// Persist submissions under `dir`, picking up any already recorded there.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if an existing submission log cannot be read.
    pub fn with_submissions_dir(mut self, dir: impl Into<PathBuf>) -> Result<Self, TransportError> {
        let dir = dir.into();
        if dir.is_dir() {
            let mut recorded = Vec::new();
            for entry in std::fs::read_dir(&dir)? {
                let path = entry?.path();
                if path.extension().and_then(|ext| ext.to_str()) == Some("jsonl") {
                    for record in serde_jsonlines::json_lines::<SubmissionRecord, _>(&path)? {
                        recorded.push(record?);
                    }
                }
            }
            recorded.sort_by_key(|record| record.submitted_at);
            *lock(&self.submissions) = recorded;
        }
        self.submissions_dir = Some(dir);
        Ok(self)
    }

    #[must_use]
    pub fn calls(&self) -> CallCounts {
        CallCounts {
            fetch: self.counters.fetch.load(Ordering::SeqCst),
            submit: self.counters.submit.load(Ordering::SeqCst),
            create: self.counters.create.load(Ordering::SeqCst),
            list: self.counters.list.load(Ordering::SeqCst),
        }
    }

    #[must_use]
    pub fn submissions(&self) -> Vec<SubmissionRecord> {
        lock(&self.submissions).clone()
    }

    #[must_use]
    pub fn quiz_ids(&self) -> Vec<QuizId> {
        lock(&self.quizzes).keys().cloned().collect()
    }

    fn authorized(&self, token: &SessionToken) -> bool {
        self.required_token
            .as_ref()
            .is_none_or(|required| required == token)
    }

    fn next_quiz_id(quizzes: &BTreeMap<QuizId, QuizContent>) -> QuizId {
        (quizzes.len() + 1..)
            .map(|n| QuizId::new(format!("quiz-{n}")))
            .find(|id| !quizzes.contains_key(id))
            .unwrap_or_else(|| QuizId::new(format!("quiz-{}", Utc::now().timestamp_millis())))
    }

    async fn persist_submission(&self, record: &SubmissionRecord) -> Result<(), TransportError> {
        let Some(dir) = &self.submissions_dir else {
            return Ok(());
        };
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(format!("{}.jsonl", record.quiz_id));
        let record = record.clone();
        tokio::task::spawn_blocking(move || serde_jsonlines::append_json_lines(&path, [record]))
            .await
            .map_err(|e| TransportError::Unavailable(format!("spawn_blocking join: {e}")))??;
        Ok(())
    }

    async fn persist_quiz(&self, quiz_id: &QuizId, content: &QuizContent) -> Result<(), TransportError> {
        let Some(dir) = &self.quiz_dir else {
            return Ok(());
        };
        let path = dir.join(format!("{quiz_id}.json"));
        tokio::fs::write(&path, serde_json::to_string_pretty(content)?).await?;
        Ok(())
    }
}

impl LmsBackend for FixtureBackend {
    async fn fetch_quiz(&self, token: &SessionToken, quiz_id: &QuizId) -> BackendResult<QuizContent> {
        self.counters.fetch.fetch_add(1, Ordering::SeqCst);
        if !self.authorized(token) {
            return Ok(ActionResult::err(UNAUTHORIZED));
        }

        Ok(lock(&self.quizzes).get(quiz_id).cloned().map_or_else(
            || ActionResult::err(format!("Quiz not found: {quiz_id}")),
            ActionResult::ok,
        ))
    }

    async fn submit_quiz(
        &self,
        token: &SessionToken,
        quiz_id: &QuizId,
        answers: &[AnswerSubmission],
        auto_submitted: bool,
    ) -> BackendResult<()> {
        self.counters.submit.fetch_add(1, Ordering::SeqCst);
        if !self.authorized(token) {
            return Ok(ActionResult::err(UNAUTHORIZED));
        }
        if !lock(&self.quizzes).contains_key(quiz_id) {
            return Ok(ActionResult::err(format!("Quiz not found: {quiz_id}")));
        }

        let record = SubmissionRecord {
            quiz_id: quiz_id.clone(),
            answers: answers.to_vec(),
            auto_submitted,
            submitted_at: Utc::now(),
        };
        self.persist_submission(&record).await?;
        tracing::info!(
            quiz = %quiz_id,
            answers = record.answers.len(),
            auto_submitted,
            "submission recorded"
        );
        lock(&self.submissions).push(record);
        Ok(ActionResult::ok(()))
    }

    async fn create_quiz(&self, token: &SessionToken, quiz: &NewQuiz) -> BackendResult<QuizId> {
        self.counters.create.fetch_add(1, Ordering::SeqCst);
        if !self.authorized(token) {
            return Ok(ActionResult::err(UNAUTHORIZED));
        }

        let content = QuizContent {
            title: Some(quiz.title.clone()),
            description: Some(quiz.description.clone()).filter(|d| !d.is_empty()),
            instructions: None,
            time_limit_minutes: Some(quiz.time_limit_minutes),
            questions: quiz
                .questions
                .iter()
                .map(|q| {
                    QuizQuestion::new(q.question_id.clone(), q.question_text.clone(), q.kind.clone())
                        .with_points(q.points)
                })
                .collect(),
        };

        // The id is reserved under the lock and released again if the write fails.
        let quiz_id = {
            let mut quizzes = lock(&self.quizzes);
            let quiz_id = Self::next_quiz_id(&quizzes);
            quizzes.insert(quiz_id.clone(), content.clone());
            quiz_id
        };
        if let Err(error) = self.persist_quiz(&quiz_id, &content).await {
            lock(&self.quizzes).remove(&quiz_id);
            tracing::warn!(quiz = %quiz_id, %error, "could not write created quiz");
            return Err(error);
        }
        tracing::info!(quiz = %quiz_id, course = %quiz.course_id, "quiz created");
        Ok(ActionResult::ok(quiz_id))
    }

    async fn list_submissions(
        &self,
        token: &SessionToken,
        quiz_id: &QuizId,
    ) -> BackendResult<Vec<SubmissionRecord>> {
        self.counters.list.fetch_add(1, Ordering::SeqCst);
        if !self.authorized(token) {
            return Ok(ActionResult::err(UNAUTHORIZED));
        }

        Ok(ActionResult::ok(
            lock(&self.submissions)
                .iter()
                .filter(|record| &record.quiz_id == quiz_id)
                .cloned()
                .collect(),
        ))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
