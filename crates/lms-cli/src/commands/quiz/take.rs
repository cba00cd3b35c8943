//! `lms quiz take`: interactive attempt over stdin.
//!
//! The transcript goes to stderr; stdout carries only the final session state
//! in the requested format.

use std::fmt::Write as _;
use std::sync::Arc;

use anyhow::Context;
use lms_client::LmsBackend;
use lms_core::entities::QuizContent;
use lms_core::enums::QuizPhase;
use lms_core::ids::QuestionId;
use lms_quiz::{QuizSession, SubmitOutcome, TickOutcome};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;
use crate::ui;

const HELP: &str = "\
Commands:
  answer <n> <text>   answer question n (choices may be given by number)
  status              show progress and time remaining
  submit              submit your answers
  retry               reload a quiz that failed to load
  quit                leave without submitting";

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Answer { number: usize, text: String },
    Status,
    Submit,
    Retry,
    Help,
    Quit,
    Empty,
}

enum Event {
    Line(Option<String>),
    Tick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

pub async fn run(quiz_id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut session = QuizSession::with_options(
        Arc::clone(&ctx.backend),
        ctx.token.clone(),
        quiz_id,
        ctx.options,
    );
    let urgent_threshold = ctx.options.urgent_threshold_secs;
    load(&mut session).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let event = tokio::select! {
            line = lines.next_line() => Event::Line(line.context("failed to read from stdin")?),
            Some(()) = session.next_tick() => Event::Tick,
        };

        let flow = match event {
            Event::Tick => on_tick(&mut session, urgent_threshold).await?,
            Event::Line(Some(line)) => on_input(&mut session, &line).await,
            Event::Line(None) => {
                if session.phase() != QuizPhase::Submitted {
                    eprintln!("Input closed before submitting.");
                }
                Flow::Stop
            }
        };
        if flow == Flow::Stop {
            break;
        }
    }

    output(&session.state(), flags.format)
}

async fn load<B: LmsBackend>(session: &mut QuizSession<B>) {
    let spinner = Progress::spinner("Loading quiz...");
    let result = session.load().await;
    spinner.finish_clear();

    match result {
        Ok(()) => {
            if let Some(content) = session.content() {
                eprintln!("{}", describe_quiz(content));
            }
            eprintln!("{}", status_line(session));
            eprintln!("Type 'help' for commands.");
        }
        Err(error) => eprintln!("{error}. Type 'retry' to try again or 'quit' to leave."),
    }
}

async fn on_tick<B: LmsBackend>(
    session: &mut QuizSession<B>,
    urgent_threshold: u64,
) -> anyhow::Result<Flow> {
    match session.tick().await? {
        TickOutcome::Counting { remaining } => {
            if should_announce(remaining, urgent_threshold) {
                eprintln!("{}", status_line(session));
            }
            Ok(Flow::Continue)
        }
        TickOutcome::AutoSubmitted => {
            eprintln!("{}", session.message().unwrap_or_default());
            Ok(Flow::Stop)
        }
        TickOutcome::AutoSubmitFailed { error } => {
            eprintln!("Time's up, but the auto-submit failed: {error}. Type 'submit' to try again.");
            Ok(Flow::Continue)
        }
        TickOutcome::Idle => Ok(Flow::Continue),
    }
}

async fn on_input<B: LmsBackend>(session: &mut QuizSession<B>, line: &str) -> Flow {
    let input = match parse_input(line) {
        Ok(input) => input,
        Err(message) => {
            eprintln!("{message}");
            return Flow::Continue;
        }
    };

    match input {
        Input::Empty => {}
        Input::Help => eprintln!("{HELP}"),
        Input::Status => eprintln!("{}", status_line(session)),
        Input::Retry => {
            if session.phase() == QuizPhase::Failed {
                load(session).await;
            } else {
                eprintln!("Nothing to retry.");
            }
        }
        Input::Answer { number, text } => {
            let Some(content) = session.content() else {
                eprintln!("The quiz is not loaded.");
                return Flow::Continue;
            };
            let resolved = resolve_answer(content, number, &text);
            match resolved.map(|(id, answer)| session.record_answer(id, answer)) {
                Ok(Ok(())) => eprintln!("Answer {number} recorded."),
                Ok(Err(error)) => eprintln!("{error}"),
                Err(message) => eprintln!("{message}"),
            }
        }
        Input::Submit => {
            let spinner = Progress::spinner("Submitting...");
            let result = session.submit().await;
            spinner.finish_clear();
            match result {
                Ok(SubmitOutcome::Submitted { .. } | SubmitOutcome::AlreadySubmitted) => {
                    eprintln!("{}", session.message().unwrap_or_default());
                    return Flow::Stop;
                }
                Err(error) => eprintln!("{error}"),
            }
        }
        Input::Quit => {
            if session.phase() != QuizPhase::Submitted {
                eprintln!("Leaving without submitting.");
            }
            return Flow::Stop;
        }
    }
    Flow::Continue
}

fn parse_input(line: &str) -> Result<Input, String> {
    let line = line.trim();
    let (command, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(command, rest)| (command, rest.trim()));

    match command.to_ascii_lowercase().as_str() {
        "" => Ok(Input::Empty),
        "answer" | "a" => {
            let (number, text) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| String::from("usage: answer <n> <text>"))?;
            let number = number
                .parse::<usize>()
                .ok()
                .filter(|number| *number > 0)
                .ok_or_else(|| format!("'{number}' is not a question number"))?;
            Ok(Input::Answer {
                number,
                text: text.trim().to_string(),
            })
        }
        "status" | "s" => Ok(Input::Status),
        "submit" => Ok(Input::Submit),
        "retry" => Ok(Input::Retry),
        "help" | "?" => Ok(Input::Help),
        "quit" | "exit" | "q" => Ok(Input::Quit),
        other => Err(format!("unknown command '{other}'; type 'help'")),
    }
}

/// Map a 1-based question number to its id. For choice questions the text
/// may be the option's number or its label in any case.
fn resolve_answer(
    content: &QuizContent,
    number: usize,
    text: &str,
) -> Result<(QuestionId, String), String> {
    let question = content
        .questions
        .get(number - 1)
        .ok_or_else(|| format!("there is no question {number}; the quiz has {}", content.questions.len()))?;

    let answer = question.kind.choices().and_then(|choices| {
        text.parse::<usize>()
            .ok()
            .and_then(|index| index.checked_sub(1))
            .and_then(|index| choices.get(index).copied())
            .or_else(|| {
                choices
                    .iter()
                    .find(|choice| choice.eq_ignore_ascii_case(text))
                    .copied()
            })
            .map(str::to_string)
    });
    Ok((question.id.clone(), answer.unwrap_or_else(|| text.to_string())))
}

fn should_announce(remaining: u64, urgent_threshold: u64) -> bool {
    remaining % 60 == 0 || remaining == urgent_threshold || remaining == 30 || remaining <= 10
}

fn status_line<B: LmsBackend>(session: &QuizSession<B>) -> String {
    let total = session.content().map_or(0, |content| content.questions.len());
    let answered = total - session.unanswered_count();
    let mut line = format!("Answered {answered}/{total}");
    if let Some(clock) = session.countdown_display() {
        let clock = if session.is_urgent() { ui::urgent(&clock) } else { clock };
        let _ = write!(line, " | Time remaining: {clock}");
    }
    line
}

fn describe_quiz(content: &QuizContent) -> String {
    let mut out = String::new();
    if let Some(title) = &content.title {
        let _ = writeln!(out, "{title}");
    }
    for text in [&content.description, &content.instructions].into_iter().flatten() {
        let _ = writeln!(out, "{text}");
    }
    match content.time_limit_minutes.filter(|minutes| *minutes > 0) {
        Some(minutes) => {
            let _ = writeln!(out, "Time limit: {minutes} minute(s)");
        }
        None => {
            let _ = writeln!(out, "No time limit");
        }
    }
    let _ = writeln!(out, "Total points: {}", content.total_points());

    for (index, question) in content.questions.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}. {} ({} pt)", index + 1, question.text, question.points);
        if let Some(choices) = question.kind.choices() {
            for (choice_index, choice) in choices.iter().enumerate() {
                let _ = writeln!(out, "   {}) {choice}", choice_index + 1);
            }
        }
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use lms_client::FixtureBackend;
    use lms_core::entities::{QuestionKind, QuizQuestion};
    use lms_core::ids::SessionToken;
    use pretty_assertions::assert_eq;

    use super::*;

    fn content() -> QuizContent {
        QuizContent {
            title: Some("Web Basics".into()),
            description: None,
            instructions: Some("Pick the best answer.".into()),
            time_limit_minutes: Some(5),
            questions: vec![
                QuizQuestion::new(
                    "q1",
                    "Which language is used for styling web pages?",
                    QuestionKind::MultipleChoice {
                        options: vec!["HTML".into(), "CSS".into(), "XML".into()],
                    },
                ),
                QuizQuestion::new("q2", "HTML is a markup language.", QuestionKind::TrueFalse),
                QuizQuestion::new("q3", "What is the DOM?", QuestionKind::Essay).with_points(3),
            ],
        }
    }

    #[test]
    fn parses_answer_with_multi_word_text() {
        assert_eq!(
            parse_input("answer 3  The document object model "),
            Ok(Input::Answer {
                number: 3,
                text: "The document object model".into(),
            })
        );
        assert_eq!(parse_input("  SUBMIT "), Ok(Input::Submit));
        assert_eq!(parse_input(""), Ok(Input::Empty));
    }

    #[test]
    fn rejects_malformed_answers() {
        assert!(parse_input("answer").is_err());
        assert!(parse_input("answer 0 CSS").is_err());
        assert!(parse_input("answer two CSS").is_err());
        assert!(parse_input("grade").is_err());
    }

    #[test]
    fn choices_resolve_by_number_or_label() {
        let content = content();
        assert_eq!(
            resolve_answer(&content, 1, "2"),
            Ok((QuestionId::from("q1"), "CSS".into()))
        );
        assert_eq!(
            resolve_answer(&content, 2, "true"),
            Ok((QuestionId::from("q2"), "True".into()))
        );
        assert_eq!(
            resolve_answer(&content, 3, "42"),
            Ok((QuestionId::from("q3"), "42".into()))
        );
        assert!(resolve_answer(&content, 4, "anything").is_err());
    }

    #[test]
    fn announces_minutes_and_final_seconds() {
        assert!(should_announce(240, 300));
        assert!(should_announce(300, 300));
        assert!(should_announce(7, 300));
        assert!(!should_announce(299, 300));
        assert!(!should_announce(45, 300));
    }

    #[test]
    fn description_lists_numbered_options() {
        let text = describe_quiz(&content());
        assert!(text.starts_with("Web Basics\nPick the best answer.\nTime limit: 5 minute(s)"));
        assert!(text.contains("Total points: 5"));
        assert!(text.contains("1. Which language is used for styling web pages? (1 pt)\n   1) HTML"));
        assert!(text.contains("   2) False"));
    }

    #[tokio::test]
    async fn answering_then_submitting_stops_the_loop() {
        let backend = Arc::new(FixtureBackend::new().with_quiz("web", content()));
        let mut session = QuizSession::new(Arc::clone(&backend), SessionToken::new("t"), "web");
        load(&mut session).await;
        assert_eq!(status_line(&session), "Answered 0/3 | Time remaining: 5:00");

        for line in ["answer 1 2", "answer 2 true"] {
            assert_eq!(on_input(&mut session, line).await, Flow::Continue);
        }
        assert_eq!(on_input(&mut session, "submit").await, Flow::Continue);
        assert_eq!(backend.calls().submit, 0);

        on_input(&mut session, "a 3 A tree of nodes").await;
        assert_eq!(on_input(&mut session, "submit").await, Flow::Stop);
        assert_eq!(backend.submissions()[0].answers.len(), 3);
        assert_eq!(session.phase(), QuizPhase::Submitted);
    }

    #[tokio::test]
    async fn failed_load_waits_for_retry() {
        let backend = Arc::new(FixtureBackend::new());
        let mut session = QuizSession::new(Arc::clone(&backend), SessionToken::new("t"), "missing");
        load(&mut session).await;
        assert_eq!(session.phase(), QuizPhase::Failed);

        assert_eq!(on_input(&mut session, "retry").await, Flow::Continue);
        assert_eq!(backend.calls().fetch, 2);
        assert_eq!(on_input(&mut session, "quit").await, Flow::Stop);
    }
}
