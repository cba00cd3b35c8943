use std::path::Path;

use anyhow::Context;
use lms_client::LmsBackend;
use lms_core::draft::QuizDraft;
use lms_core::ids::QuizId;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::remote;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct CreatedQuiz {
    quiz_id: QuizId,
    title: String,
    questions: usize,
    total_points: u32,
}

pub async fn run(path: &Path, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read draft {}", path.display()))?;
    let draft: QuizDraft = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a valid quiz draft", path.display()))?;

    let total_points = draft.total_points();
    let new_quiz = draft.into_new_quiz().context("draft rejected")?;
    let quiz_id = remote("Creating quiz...", || ctx.backend.create_quiz(&ctx.token, &new_quiz))
        .await
        .context("failed to create quiz")?;

    output(
        &CreatedQuiz {
            quiz_id,
            title: new_quiz.title,
            questions: new_quiz.questions.len(),
            total_points,
        },
        flags.format,
    )
}
