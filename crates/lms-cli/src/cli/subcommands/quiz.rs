use std::path::PathBuf;

use clap::Subcommand;

/// Quiz commands.
#[derive(Clone, Debug, Subcommand)]
pub enum QuizCommands {
    /// Fetch and display a quiz.
    Show { quiz_id: String },
    /// Take a quiz interactively.
    Take { quiz_id: String },
    /// Create a quiz from a draft JSON file.
    Create { draft: PathBuf },
    /// List recorded submissions for a quiz.
    Submissions { quiz_id: String },
}
