//! # lms-client
//!
//! The remote call surface of the LMS backend and the uniform wrapper every
//! call goes through.
//!
//! - [`LmsBackend`]: the opaque RPC surface (fetch, submit, create, list).
//! - [`ActionExecutor`]: runs one remote call and tracks `loading` / `error`.
//! - [`FixtureBackend`]: an in-process backend fed from JSON files, used by the
//!   CLI and tests.

pub mod backend;
pub mod error;
pub mod executor;
pub mod fixture;

pub use backend::{BackendResult, LmsBackend};
pub use error::TransportError;
pub use executor::{ActionExecutor, ExecutionState};
pub use fixture::{CallCounts, FixtureBackend};
