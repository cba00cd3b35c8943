use anyhow::bail;
use lms_core::draft::{NewQuiz, QuizDraft};
use lms_core::entities::{AnswerSubmission, QuizContent, QuizQuestion, SubmissionRecord};
use lms_core::enums::QuizPhase;
use schemars::{Schema, schema_for};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

const SCHEMA_TYPES: [&str; 7] = [
    "quiz-content",
    "quiz-question",
    "answer",
    "submission",
    "quiz-draft",
    "new-quiz",
    "quiz-phase",
];

/// Handle `lms schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = schema_for_type(&args.type_name)?;
    output(&schema, flags.format)
}

fn schema_for_type(type_name: &str) -> anyhow::Result<Schema> {
    let schema = match type_name {
        "quiz-content" => schema_for!(QuizContent),
        "quiz-question" => schema_for!(QuizQuestion),
        "answer" => schema_for!(AnswerSubmission),
        "submission" => schema_for!(SubmissionRecord),
        "quiz-draft" => schema_for!(QuizDraft),
        "new-quiz" => schema_for!(NewQuiz),
        "quiz-phase" => schema_for!(QuizPhase),
        other => bail!(
            "unknown schema type '{other}' (expected one of: {})",
            SCHEMA_TYPES.join(", ")
        ),
    };
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_type_has_a_schema() {
        for type_name in SCHEMA_TYPES {
            let schema = schema_for_type(type_name).expect("schema should exist");
            let value = serde_json::to_value(&schema).expect("schema serializes");
            assert!(value.get("$schema").is_some(), "{type_name} schema lacks $schema");
        }
    }

    #[test]
    fn unknown_type_lists_known_types() {
        let error = schema_for_type("gradebook").unwrap_err();
        let message = error.to_string();
        assert!(message.contains("gradebook"));
        assert!(message.contains("quiz-content"));
    }
}
