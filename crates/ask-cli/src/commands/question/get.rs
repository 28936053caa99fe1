use anyhow::Context;
use ask_db::retry::with_retry;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_question_id;
use crate::context::AppContext;
use crate::output::output_question;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let id = parse_question_id(id)?;
    let question = with_retry(&ctx.retry, || ctx.service.get_question(id))
        .await
        .with_context(|| format!("failed to get question {id}"))?;

    output_question(&question, flags.format)
}
