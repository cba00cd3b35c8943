use anyhow::Context;
use lms_client::LmsBackend;
use lms_core::entities::QuizContent;
use lms_core::ids::QuizId;
use serde::Serialize;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::remote;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct QuestionRow<'a> {
    number: usize,
    kind: &'static str,
    points: u32,
    text: &'a str,
    options: String,
}

pub async fn run(quiz_id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let quiz_id = QuizId::from(quiz_id);
    let content = remote("Loading quiz...", || ctx.backend.fetch_quiz(&ctx.token, &quiz_id))
        .await
        .with_context(|| format!("failed to load quiz {quiz_id}"))?;

    if flags.format == OutputFormat::Table {
        return output(&question_rows(&content), flags.format);
    }
    output(&content, flags.format)
}

fn question_rows(content: &QuizContent) -> Vec<QuestionRow<'_>> {
    content
        .questions
        .iter()
        .enumerate()
        .map(|(index, question)| QuestionRow {
            number: index + 1,
            kind: question.kind.as_str(),
            points: question.points,
            text: &question.text,
            options: question
                .kind
                .choices()
                .map(|choices| choices.join(" / "))
                .unwrap_or_default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use lms_core::entities::{QuestionKind, QuizQuestion};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn rows_number_questions_from_one() {
        let content = QuizContent {
            title: None,
            description: None,
            instructions: None,
            time_limit_minutes: None,
            questions: vec![
                QuizQuestion::new("q1", "HTML is a markup language.", QuestionKind::TrueFalse),
                QuizQuestion::new("q2", "Describe the box model.", QuestionKind::Essay).with_points(4),
            ],
        };

        let rows = question_rows(&content);
        assert_eq!(rows[0].number, 1);
        assert_eq!(rows[0].options, "True / False");
        assert_eq!(rows[1].points, 4);
        assert_eq!(rows[1].options, "");
    }
}
