use clap::{Args, Subcommand};

use crate::cli::subcommands::QuizCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Show, take, create and review quizzes.
    Quiz {
        #[command(subcommand)]
        action: QuizCommands,
    },
    /// Print the JSON schema of a payload type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// One of: quiz-content, quiz-question, answer, submission, quiz-draft, new-quiz, quiz-phase
    pub type_name: String,
}
