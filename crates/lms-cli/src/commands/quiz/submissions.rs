use anyhow::Context;
use chrono::{DateTime, Utc};
use lms_client::LmsBackend;
use lms_core::entities::SubmissionRecord;
use lms_core::ids::QuizId;
use serde::Serialize;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::remote;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SubmissionRow {
    submitted_at: DateTime<Utc>,
    answered: usize,
    auto_submitted: bool,
}

impl From<&SubmissionRecord> for SubmissionRow {
    fn from(record: &SubmissionRecord) -> Self {
        Self {
            submitted_at: record.submitted_at,
            answered: record.answered_count(),
            auto_submitted: record.auto_submitted,
        }
    }
}

pub async fn run(quiz_id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let quiz_id = QuizId::from(quiz_id);
    let records = remote("Loading submissions...", || {
        ctx.backend.list_submissions(&ctx.token, &quiz_id)
    })
    .await
    .with_context(|| format!("failed to list submissions for {quiz_id}"))?;

    if flags.format == OutputFormat::Table {
        let rows = records.iter().map(SubmissionRow::from).collect::<Vec<_>>();
        return output(&rows, flags.format);
    }
    output(&records, flags.format)
}
