//! JsonSchema validation of the payloads exchanged with the backend.

use chrono::Utc;
use lms_core::draft::{DraftAnswer, DraftQuestion, NewQuiz, QuizDraft};
use lms_core::entities::{AnswerSubmission, QuestionKind, QuizContent, QuizQuestion, SubmissionRecord};
use schemars::schema_for;
use serde::Serialize;

fn schema_errors<T: schemars::JsonSchema + Serialize>(value: &T) -> Vec<String> {
    let schema = serde_json::to_value(schema_for!(T)).unwrap();
    let instance = serde_json::to_value(value).unwrap();
    let validator = jsonschema::validator_for(&schema).expect("schema should be valid");
    validator
        .iter_errors(&instance)
        .map(|e| format!("{e}"))
        .collect()
}

fn sample_content() -> QuizContent {
    QuizContent {
        title: Some("Web Basics".into()),
        description: Some("HTML and CSS fundamentals".into()),
        instructions: Some("Answer every question.".into()),
        time_limit_minutes: Some(10),
        questions: vec![
            QuizQuestion::new(
                "q1",
                "What does HTML stand for?",
                QuestionKind::MultipleChoice {
                    options: vec![
                        "Hyperlinks and Text Markup Language".into(),
                        "HyperText Markup Language".into(),
                    ],
                },
            ),
            QuizQuestion::new("q2", "CSS is used for styling.", QuestionKind::TrueFalse),
            QuizQuestion::new("q3", "Explain the DOM.", QuestionKind::Essay).with_points(5),
        ],
    }
}

#[test]
fn quiz_content_conforms_to_schema() {
    let errors = schema_errors(&sample_content());
    assert!(errors.is_empty(), "schema errors: {errors:?}");
}

#[test]
fn quiz_content_reads_fixture_json() {
    let raw = r#"{
        "title": "Web Basics",
        "time_limit_minutes": 0,
        "questions": [
            { "id": "q1", "text": "Pick one", "kind": "multiple_choice", "options": ["A", "B"], "points": 2 },
            { "id": "q2", "text": "True?", "kind": "true_false" }
        ]
    }"#;
    let content: QuizContent = serde_json::from_str(raw).expect("fixture parses");
    assert_eq!(content.time_limit_seconds(), None);
    assert_eq!(content.total_points(), 3);
    assert!(content.instructions.is_none());
}

#[test]
fn submission_record_conforms_to_schema() {
    let record = SubmissionRecord {
        quiz_id: "quiz-1".into(),
        answers: vec![
            AnswerSubmission::new("q1", "HyperText Markup Language"),
            AnswerSubmission::new("q2", ""),
        ],
        auto_submitted: true,
        submitted_at: Utc::now(),
    };
    let errors = schema_errors(&record);
    assert!(errors.is_empty(), "schema errors: {errors:?}");
    assert_eq!(record.answered_count(), 1);
}

#[test]
fn new_quiz_conforms_to_schema() {
    let draft = QuizDraft {
        title: "Web Basics".into(),
        course_id: "course-1".into(),
        questions: vec![DraftQuestion {
            text: "Is HTML a markup language?".into(),
            answer: DraftAnswer::TrueFalse { correct: true },
            points: 1,
        }],
        ..QuizDraft::default()
    };
    let quiz: NewQuiz = draft.into_new_quiz().expect("draft is valid");
    let errors = schema_errors(&quiz);
    assert!(errors.is_empty(), "schema errors: {errors:?}");
}
