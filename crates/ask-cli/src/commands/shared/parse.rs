use ask_core::ids::QuestionId;

/// Parse a question id argument, rejecting anything but a positive integer.
pub fn parse_question_id(raw: &str) -> anyhow::Result<QuestionId> {
    raw.parse::<QuestionId>().map_err(anyhow::Error::from)
}

/// Split a comma-separated `--tag` argument. Absent means no tags.
pub fn split_tags(raw: Option<&str>) -> Vec<&str> {
    raw.map(|value| value.split(',').collect())
        .unwrap_or_default()
}
