pub mod quiz;
pub mod schema;
mod shared;

use crate::cli::{Commands, GlobalFlags};
use crate::context::AppContext;

/// Route a parsed command to its handler.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Quiz { action } => quiz::handle(&action, ctx, flags).await,
        Commands::Schema(args) => schema::handle(&args, flags),
    }
}
