use anyhow::Context;
use ask_core::entities::NewQuestion;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::split_tags;
use crate::context::AppContext;
use crate::output::output_question;

pub async fn run(
    title: &str,
    content: &str,
    tag: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let new = NewQuestion::new(title, content).with_tags(split_tags(tag));

    // Not retried: a timeout after commit would post the question twice.
    let question = ctx
        .service
        .create_question(&new)
        .await
        .context("failed to create question")?;

    output_question(&question, flags.format)
}
