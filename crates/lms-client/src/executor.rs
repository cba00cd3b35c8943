//! Uniform loading/error contract around a single remote call.
//!
//! Every screen owns its own [`ActionExecutor`] and renders busy and error
//! states from [`ActionExecutor::state`]. There is no mutual exclusion: two
//! calls in flight on the same executor both run, and whichever settles last
//! leaves its mark on the state. Callers that need exclusivity disable the
//! trigger while `loading` is true.

use std::fmt;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use lms_core::ActionResult;
use serde::Serialize;

/// Snapshot of an executor's call-site state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionState {
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
pub struct ActionExecutor {
    state: Mutex<ExecutionState>,
}

impl ActionExecutor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> ExecutionState {
        self.lock().clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    /// Record a locally detected error without running a call.
    pub fn set_error(&self, error: impl Into<String>) {
        self.lock().error = Some(error.into());
    }

    pub fn clear_error(&self) {
        self.lock().error = None;
    }

    /// Run `action` and normalize its outcome.
    ///
    /// `loading` is raised and the previous error cleared before the call.
    /// A backend rejection is recorded and returned unchanged; a transport
    /// failure is recorded and returned as `ActionResult::Err`. `loading` is
    /// lowered on every exit path, including a panic inside `action` and the
    /// returned future being dropped before it settles.
    pub async fn execute<T, E, F, Fut>(&self, action: F) -> ActionResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ActionResult<T>, E>>,
        E: fmt::Display,
    {
        {
            let mut state = self.lock();
            state.loading = true;
            state.error = None;
        }
        let _release = LoadingGuard { executor: self };

        match action().await {
            Ok(result) => {
                if let ActionResult::Err(error) = &result {
                    tracing::warn!(%error, "remote action rejected");
                    self.set_error(error.clone());
                }
                result
            }
            Err(error) => {
                let message = error.to_string();
                tracing::warn!(error = %message, "remote action failed");
                self.set_error(message.clone());
                ActionResult::Err(message)
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, ExecutionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct LoadingGuard<'a> {
    executor: &'a ActionExecutor,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.executor.lock().loading = false;
    }
}
