use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids::QuestionId;

/// Fixed option labels for true/false questions.
pub const TRUE_FALSE_OPTIONS: [&str; 2] = ["True", "False"];

/// The kind of a question, carrying only the fields that kind needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice { options: Vec<String> },
    TrueFalse,
    Essay,
}

impl QuestionKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MultipleChoice { .. } => "multiple_choice",
            Self::TrueFalse => "true_false",
            Self::Essay => "essay",
        }
    }

    /// Selectable options, or `None` for free-text questions.
    #[must_use]
    pub fn choices(&self) -> Option<Vec<&str>> {
        match self {
            Self::MultipleChoice { options } => Some(options.iter().map(String::as_str).collect()),
            Self::TrueFalse => Some(TRUE_FALSE_OPTIONS.to_vec()),
            Self::Essay => None,
        }
    }

    /// Whether `answer` is an acceptable value for this kind.
    ///
    /// Choice questions accept only one of their options; essays accept any text.
    #[must_use]
    pub fn accepts(&self, answer: &str) -> bool {
        self.choices()
            .is_none_or(|choices| choices.iter().any(|choice| *choice == answer))
    }
}

/// A single question of a loaded quiz. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QuizQuestion {
    pub id: QuestionId,
    pub text: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
    #[serde(default = "default_points")]
    pub points: u32,
}

const fn default_points() -> u32 {
    1
}

impl QuizQuestion {
    #[must_use]
    pub fn new(id: impl Into<QuestionId>, text: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            kind,
            points: default_points(),
        }
    }

    #[must_use]
    pub const fn with_points(mut self, points: u32) -> Self {
        self.points = points;
        self
    }
}

/// Everything `fetch_quiz` returns for one quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QuizContent {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub time_limit_minutes: Option<u32>,
    pub questions: Vec<QuizQuestion>,
}

impl QuizContent {
    /// Countdown length in seconds. `None` when the quiz is untimed
    /// (limit absent or zero).
    #[must_use]
    pub fn time_limit_seconds(&self) -> Option<u64> {
        self.time_limit_minutes
            .filter(|minutes| *minutes > 0)
            .map(|minutes| u64::from(minutes) * 60)
    }

    #[must_use]
    pub fn total_points(&self) -> u32 {
        self.questions.iter().map(|q| q.points).sum()
    }

    #[must_use]
    pub fn question(&self, id: &QuestionId) -> Option<&QuizQuestion> {
        self.questions.iter().find(|q| &q.id == id)
    }
}

/// One answered question in a submission payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AnswerSubmission {
    pub question_id: QuestionId,
    pub answer: String,
}

impl AnswerSubmission {
    #[must_use]
    pub fn new(question_id: impl Into<QuestionId>, answer: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            answer: answer.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn content(limit: Option<u32>) -> QuizContent {
        QuizContent {
            title: Some("Web Basics".into()),
            description: None,
            instructions: None,
            time_limit_minutes: limit,
            questions: vec![
                QuizQuestion::new(
                    "q1",
                    "Which language is used for styling web pages?",
                    QuestionKind::MultipleChoice {
                        options: vec!["HTML".into(), "CSS".into()],
                    },
                ),
                QuizQuestion::new("q2", "HTML is a programming language.", QuestionKind::TrueFalse)
                    .with_points(2),
            ],
        }
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(0), None)]
    #[case(Some(1), Some(60))]
    #[case(Some(30), Some(1800))]
    fn time_limit_converts_to_seconds(#[case] minutes: Option<u32>, #[case] expected: Option<u64>) {
        assert_eq!(content(minutes).time_limit_seconds(), expected);
    }

    #[test]
    fn question_kind_is_tagged_inline() {
        let question = &content(None).questions[0];
        let json = serde_json::to_value(question).unwrap();
        assert_eq!(json["kind"], "multiple_choice");
        assert_eq!(json["options"][1], "CSS");
        assert_eq!(json["id"], "q1");

        let essay: QuizQuestion = serde_json::from_value(serde_json::json!({
            "id": "q3",
            "text": "Explain the impact of frameworks.",
            "kind": "essay"
        }))
        .unwrap();
        assert_eq!(&essay.kind, &QuestionKind::Essay);
        assert_eq!(essay.points, 1);
    }

    #[test]
    fn choice_kinds_accept_only_their_options() {
        let quiz = content(None);
        assert!(quiz.questions[0].kind.accepts("CSS"));
        assert!(!quiz.questions[0].kind.accepts("XML"));
        assert!(quiz.questions[1].kind.accepts("False"));
        assert!(!quiz.questions[1].kind.accepts("false"));
        assert!(QuestionKind::Essay.accepts("anything at all"));
    }

    #[test]
    fn total_points_sums_questions() {
        assert_eq!(content(None).total_points(), 3);
    }
}
