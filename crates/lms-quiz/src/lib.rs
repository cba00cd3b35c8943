//! # lms-quiz
//!
//! Client-side state machine for taking one timed quiz: load the questions,
//! collect answers, run the countdown, and submit exactly once, either on the
//! learner's request or automatically when time runs out.

pub mod countdown;
pub mod error;
pub mod session;

pub use countdown::{Countdown, CountdownTimer, MIN_TICK_PERIOD, URGENT_THRESHOLD_SECS, format_clock};
pub use error::QuizError;
pub use session::{QuizSession, SessionOptions, SessionState, SubmitOutcome, TickOutcome};
