//! Instructor-side quiz builder.
//!
//! A [`QuizDraft`] is edited freely, validated with [`QuizDraft::validate`],
//! then turned into the [`NewQuiz`] payload sent to `create_quiz`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{QuestionKind, TRUE_FALSE_OPTIONS};
use crate::errors::CoreError;
use crate::ids::{CourseId, QuestionId};

const fn default_time_limit() -> u32 {
    30
}

const fn default_passing_score() -> u32 {
    70
}

const fn default_points() -> u32 {
    1
}

/// Minimum number of options a multiple-choice question keeps while editing.
pub const MIN_OPTIONS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QuizDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub course_id: String,
    /// Minutes; zero publishes an untimed quiz.
    #[serde(default = "default_time_limit")]
    pub time_limit_minutes: u32,
    #[serde(default = "default_passing_score")]
    pub passing_score: u32,
    #[serde(default)]
    pub questions: Vec<DraftQuestion>,
}

impl Default for QuizDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            course_id: String::new(),
            time_limit_minutes: default_time_limit(),
            passing_score: default_passing_score(),
            questions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DraftQuestion {
    #[serde(default)]
    pub text: String,
    #[serde(flatten)]
    pub answer: DraftAnswer,
    #[serde(default = "default_points")]
    pub points: u32,
}

impl Default for DraftQuestion {
    fn default() -> Self {
        Self {
            text: String::new(),
            answer: DraftAnswer::MultipleChoice {
                options: vec![String::new(); MIN_OPTIONS],
                correct_index: 0,
            },
            points: default_points(),
        }
    }
}

/// Kind-specific part of a draft question, including the expected answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DraftAnswer {
    MultipleChoice {
        options: Vec<String>,
        #[serde(default)]
        correct_index: usize,
    },
    TrueFalse {
        correct: bool,
    },
    Essay {
        #[serde(default)]
        reference_answer: String,
    },
}

/// Question as sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NewQuestion {
    pub question_id: QuestionId,
    pub question_text: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
    pub correct_answer: String,
    pub points: u32,
}

/// Payload for `create_quiz`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NewQuiz {
    pub title: String,
    pub description: String,
    pub course_id: CourseId,
    pub time_limit_minutes: u32,
    pub passing_score: u32,
    pub questions: Vec<NewQuestion>,
}

impl QuizDraft {
    /// Append a blank multiple-choice question and return its index.
    pub fn add_question(&mut self) -> usize {
        self.questions.push(DraftQuestion::default());
        self.questions.len() - 1
    }

    /// Remove the question at `index`, if present.
    pub fn remove_question(&mut self, index: usize) -> Option<DraftQuestion> {
        (index < self.questions.len()).then(|| self.questions.remove(index))
    }

    /// Append a blank option to a multiple-choice question.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` for an unknown question and
    /// `CoreError::Validation` when the question is not multiple choice.
    pub fn add_option(&mut self, question: usize) -> Result<(), CoreError> {
        let (options, _) = self.options_mut(question)?;
        options.push(String::new());
        Ok(())
    }

    /// Remove an option from a multiple-choice question.
    ///
    /// Questions never drop below [`MIN_OPTIONS`]; the call is then a no-op and
    /// returns `Ok(false)`. The correct index follows the option it pointed at
    /// when an earlier option is removed.
    ///
    /// # Errors
    ///
    /// Same as [`add_option`](Self::add_option).
    pub fn remove_option(&mut self, question: usize, option: usize) -> Result<bool, CoreError> {
        let (options, correct_index) = self.options_mut(question)?;
        if options.len() <= MIN_OPTIONS || option >= options.len() {
            return Ok(false);
        }
        options.remove(option);
        if *correct_index >= option && *correct_index > 0 {
            *correct_index -= 1;
        }
        Ok(true)
    }

    #[must_use]
    pub fn total_points(&self) -> u32 {
        self.questions.iter().map(|q| q.points).sum()
    }

    /// Check the draft, reporting the first problem found.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` with a user-facing message.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.title.trim().is_empty() {
            return Err(invalid("Quiz title is required"));
        }
        if self.course_id.trim().is_empty() {
            return Err(invalid("Course ID is required"));
        }
        if self.questions.is_empty() {
            return Err(invalid("At least one question is required"));
        }

        for (index, question) in self.questions.iter().enumerate() {
            let number = index + 1;
            if question.text.trim().is_empty() {
                return Err(invalid(format!("Question {number} text is required")));
            }

            if let DraftAnswer::MultipleChoice {
                options,
                correct_index,
            } = &question.answer
            {
                let valid = options.iter().filter(|o| !o.trim().is_empty()).count();
                if valid < MIN_OPTIONS {
                    return Err(invalid(format!(
                        "Question {number} must have at least 2 valid options"
                    )));
                }
                if options
                    .get(*correct_index)
                    .is_none_or(|o| o.trim().is_empty())
                {
                    return Err(invalid(format!(
                        "Question {number} must have a valid correct answer selected"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Validate and build the backend payload. Question ids are assigned
    /// `q_1..q_n` in order and blank options are dropped.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure.
    pub fn into_new_quiz(self) -> Result<NewQuiz, CoreError> {
        self.validate()?;

        let questions = self
            .questions
            .into_iter()
            .enumerate()
            .map(|(index, question)| {
                let (kind, correct_answer) = match question.answer {
                    DraftAnswer::MultipleChoice {
                        options,
                        correct_index,
                    } => {
                        let correct = options[correct_index].clone();
                        let options = options
                            .into_iter()
                            .filter(|o| !o.trim().is_empty())
                            .collect();
                        (QuestionKind::MultipleChoice { options }, correct)
                    }
                    DraftAnswer::TrueFalse { correct } => {
                        let label = if correct {
                            TRUE_FALSE_OPTIONS[0]
                        } else {
                            TRUE_FALSE_OPTIONS[1]
                        };
                        (QuestionKind::TrueFalse, label.to_string())
                    }
                    DraftAnswer::Essay { reference_answer } => {
                        (QuestionKind::Essay, reference_answer)
                    }
                };

                NewQuestion {
                    question_id: QuestionId::new(format!("q_{}", index + 1)),
                    question_text: question.text,
                    kind,
                    correct_answer,
                    points: question.points,
                }
            })
            .collect();

        Ok(NewQuiz {
            title: self.title,
            description: self.description,
            course_id: CourseId::new(self.course_id),
            time_limit_minutes: self.time_limit_minutes,
            passing_score: self.passing_score,
            questions,
        })
    }

    fn options_mut(&mut self, question: usize) -> Result<(&mut Vec<String>, &mut usize), CoreError> {
        let draft = self
            .questions
            .get_mut(question)
            .ok_or_else(|| CoreError::NotFound {
                entity_type: "question".into(),
                id: (question + 1).to_string(),
            })?;

        match &mut draft.answer {
            DraftAnswer::MultipleChoice {
                options,
                correct_index,
            } => Ok((options, correct_index)),
            _ => Err(invalid(format!(
                "Question {} is not multiple choice",
                question + 1
            ))),
        }
    }
}

fn invalid(message: impl Into<String>) -> CoreError {
    CoreError::Validation(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn mc(text: &str, options: &[&str], correct_index: usize) -> DraftQuestion {
        DraftQuestion {
            text: text.into(),
            answer: DraftAnswer::MultipleChoice {
                options: options.iter().map(ToString::to_string).collect(),
                correct_index,
            },
            points: 1,
        }
    }

    fn valid_draft() -> QuizDraft {
        QuizDraft {
            title: "Web Basics".into(),
            description: "Intro quiz".into(),
            course_id: "course-7".into(),
            questions: vec![
                mc("What does HTML stand for?", &["HyperText Markup Language", "Home Tool", ""], 0),
                DraftQuestion {
                    text: "CSS styles pages.".into(),
                    answer: DraftAnswer::TrueFalse { correct: true },
                    points: 2,
                },
                DraftQuestion {
                    text: "Explain the impact of React.".into(),
                    answer: DraftAnswer::Essay {
                        reference_answer: String::new(),
                    },
                    points: 5,
                },
            ],
            ..QuizDraft::default()
        }
    }

    #[rstest]
    #[case::missing_title(|d: &mut QuizDraft| d.title = "  ".into(), "Quiz title is required")]
    #[case::missing_course(|d: &mut QuizDraft| d.course_id.clear(), "Course ID is required")]
    #[case::no_questions(|d: &mut QuizDraft| d.questions.clear(), "At least one question is required")]
    #[case::blank_text(|d: &mut QuizDraft| d.questions[1].text.clear(), "Question 2 text is required")]
    #[case::one_option(
        |d: &mut QuizDraft| d.questions[0] = mc("Pick", &["only", " "], 0),
        "Question 1 must have at least 2 valid options"
    )]
    #[case::blank_correct(
        |d: &mut QuizDraft| d.questions[0] = mc("Pick", &["a", "b", ""], 2),
        "Question 1 must have a valid correct answer selected"
    )]
    #[case::correct_out_of_range(
        |d: &mut QuizDraft| d.questions[0] = mc("Pick", &["a", "b"], 5),
        "Question 1 must have a valid correct answer selected"
    )]
    fn validation_reports_first_problem(
        #[case] edit: fn(&mut QuizDraft),
        #[case] expected: &str,
    ) {
        let mut draft = valid_draft();
        edit(&mut draft);
        assert_eq!(draft.validate(), Err(CoreError::Validation(expected.into())));
    }

    #[test]
    fn new_quiz_payload_is_formatted() {
        let quiz = valid_draft().into_new_quiz().expect("draft is valid");

        assert_eq!(quiz.course_id.as_str(), "course-7");
        assert_eq!(quiz.time_limit_minutes, 30);
        assert_eq!(quiz.passing_score, 70);

        let ids: Vec<_> = quiz.questions.iter().map(|q| q.question_id.as_str()).collect();
        assert_eq!(ids, vec!["q_1", "q_2", "q_3"]);

        assert_eq!(
            quiz.questions[0].kind,
            QuestionKind::MultipleChoice {
                options: vec!["HyperText Markup Language".into(), "Home Tool".into()],
            }
        );
        assert_eq!(quiz.questions[0].correct_answer, "HyperText Markup Language");
        assert_eq!(quiz.questions[1].correct_answer, "True");
        assert_eq!(quiz.questions[2].kind, QuestionKind::Essay);
    }

    #[test]
    fn new_questions_default_to_blank_multiple_choice() {
        let mut draft = QuizDraft::default();
        let index = draft.add_question();
        assert_eq!(index, 0);
        assert_eq!(draft.questions[0], DraftQuestion::default());
        assert_eq!(draft.total_points(), 1);
    }

    #[test]
    fn remove_option_keeps_minimum_and_shifts_correct_index() {
        let mut draft = QuizDraft {
            questions: vec![mc("Pick", &["a", "b", "c", "d"], 2)],
            ..QuizDraft::default()
        };

        assert_eq!(draft.remove_option(0, 0), Ok(true));
        assert_eq!(
            draft.questions[0].answer,
            DraftAnswer::MultipleChoice {
                options: vec!["b".into(), "c".into(), "d".into()],
                correct_index: 1,
            }
        );

        assert_eq!(draft.remove_option(0, 2), Ok(true));
        assert_eq!(draft.remove_option(0, 0), Ok(false));
    }

    #[test]
    fn option_edits_reject_other_kinds() {
        let mut draft = valid_draft();
        assert!(matches!(draft.add_option(1), Err(CoreError::Validation(_))));
        assert!(matches!(draft.add_option(9), Err(CoreError::NotFound { .. })));
        draft.add_option(0).expect("multiple choice accepts options");
        assert_eq!(draft.remove_question(1).map(|q| q.points), Some(2));
        assert!(draft.remove_question(7).is_none());
    }
}
