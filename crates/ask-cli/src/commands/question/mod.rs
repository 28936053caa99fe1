mod create;
mod get;
mod resolve;
mod search;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::QuestionCommands;
use crate::context::AppContext;

/// Handle `askb question`.
pub async fn handle(
    action: &QuestionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        QuestionCommands::Search { tag, status } => {
            search::run(tag.as_deref(), status.as_deref(), ctx, flags).await
        }
        QuestionCommands::Resolve { id } => resolve::run(id, ctx, flags).await,
        QuestionCommands::Get { id } => get::run(id, ctx, flags).await,
        QuestionCommands::Create {
            title,
            content,
            tag,
        } => create::run(title, content, tag.as_deref(), ctx, flags).await,
    }
}
