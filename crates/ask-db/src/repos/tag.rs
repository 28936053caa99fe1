//! Tag lookups shared by the question repository.
//!
//! These run on a borrowed connection (usually a transaction) so that the
//! caller controls atomicity.

use std::collections::HashMap;

use ask_core::entities::{Question, Tag};
use ask_core::ids::QuestionId;

use crate::error::DatabaseError;

/// Question ids per tag-loading statement, well under `SQLite`'s variable limit.
const TAG_BATCH: usize = 500;

/// Return the id of the tag named `name`, creating the row if missing.
pub(crate) async fn ensure_tag(conn: &libsql::Connection, name: &str) -> Result<i64, DatabaseError> {
    conn.execute("INSERT OR IGNORE INTO tags (name) VALUES (?1)", [name])
        .await?;
    let mut rows = conn
        .query("SELECT id FROM tags WHERE name = ?1", [name])
        .await?;
    let row = rows
        .next()
        .await?
        .ok_or_else(|| DatabaseError::Query(format!("tag '{name}' vanished after insert")))?;
    Ok(row.get::<i64>(0)?)
}

/// Link a question to a tag. Linking twice is a no-op.
pub(crate) async fn attach_tag(
    conn: &libsql::Connection,
    question_id: QuestionId,
    tag_id: i64,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT OR IGNORE INTO question_tags (question_id, tag_id) VALUES (?1, ?2)",
        libsql::params![question_id.get(), tag_id],
    )
    .await?;
    Ok(())
}

/// Fill `tags` on every question with one query per batch of ids.
///
/// Tags come back in ascending tag id order.
pub(crate) async fn load_tags(
    conn: &libsql::Connection,
    questions: &mut [Question],
) -> Result<(), DatabaseError> {
    if questions.is_empty() {
        return Ok(());
    }

    let mut by_question: HashMap<i64, Vec<Tag>> = HashMap::new();
    for chunk in questions.chunks(TAG_BATCH) {
        let placeholders = (1..=chunk.len())
            .map(|idx| format!("?{idx}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT qt.question_id, t.id, t.name
             FROM question_tags qt
             JOIN tags t ON t.id = qt.tag_id
             WHERE qt.question_id IN ({placeholders})
             ORDER BY qt.question_id, t.id"
        );
        let params: Vec<libsql::Value> = chunk.iter().map(|q| q.id.get().into()).collect();
        let mut rows = conn.query(&sql, libsql::params_from_iter(params)).await?;
        while let Some(row) = rows.next().await? {
            by_question
                .entry(row.get::<i64>(0)?)
                .or_default()
                .push(Tag {
                    id: row.get::<i64>(1)?,
                    name: row.get::<String>(2)?,
                });
        }
    }

    for question in questions.iter_mut() {
        question.tags = by_question.remove(&question.id.get()).unwrap_or_default();
    }
    Ok(())
}
