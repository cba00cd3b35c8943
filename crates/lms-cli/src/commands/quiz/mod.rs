mod create;
mod show;
mod submissions;
mod take;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::QuizCommands;
use crate::context::AppContext;

/// Handle `lms quiz`.
pub async fn handle(action: &QuizCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        QuizCommands::Show { quiz_id } => show::run(quiz_id, ctx, flags).await,
        QuizCommands::Take { quiz_id } => take::run(quiz_id, ctx, flags).await,
        QuizCommands::Create { draft } => create::run(draft, ctx, flags).await,
        QuizCommands::Submissions { quiz_id } => submissions::run(quiz_id, ctx, flags).await,
    }
}
