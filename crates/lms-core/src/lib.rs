//! # lms-core
//!
//! Core types, identifiers, and error types for the LMS quiz client.
//!
//! This crate provides the foundational types shared across all LMS crates:
//! - Identifier newtypes and the explicit session token
//! - The `ActionResult` envelope returned by every remote call
//! - Quiz entities (questions, content, answers, submission records)
//! - The quiz phase enum with state machine transitions
//! - The instructor-side quiz draft builder and its validation
//! - Cross-cutting error types

pub mod action;
pub mod draft;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;

pub use action::{ActionResult, RemoteResult};
pub use errors::CoreError;
