use anyhow::Context;
use ask_core::query::QuestionQuery;
use ask_db::retry::with_retry;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output_questions;

pub async fn run(
    tag: Option<&str>,
    status: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let query = QuestionQuery::from_params(tag, status);
    let questions = with_retry(&ctx.retry, || ctx.service.search_questions(&query))
        .await
        .context("failed to search questions")?;

    output_questions(&questions, flags.format)
}
