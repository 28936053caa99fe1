//! Question repository: ingestion, lookup, filtered search, resolution.

use chrono::Utc;

use ask_core::entities::{NewQuestion, Question};
use ask_core::errors::CoreError;
use ask_core::ids::QuestionId;
use ask_core::query::{QuestionQuery, normalize_tag_names};

use crate::error::DatabaseError;
use crate::helpers::{format_datetime, get_flag, parse_datetime};
use crate::repos::tag::{attach_tag, ensure_tag, load_tags};
use crate::service::AskService;

const SELECT_COLS: &str = "q.id, q.title, q.content, q.is_resolved, q.created_at";

/// Newest first; equal timestamps fall back to the higher id.
const ORDER_NEWEST_FIRST: &str = "ORDER BY q.created_at DESC, q.id DESC";

fn row_to_question(row: &libsql::Row) -> Result<Question, DatabaseError> {
    Ok(Question {
        id: QuestionId::new(row.get::<i64>(0)?),
        title: row.get::<String>(1)?,
        content: row.get::<String>(2)?,
        is_resolved: get_flag(row, 3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
        tags: Vec::new(),
    })
}

/// Build the WHERE fragment and its parameters for a normalized query.
///
/// Tag matching is "any of": a question qualifies when at least one of its
/// tags is named in the query. The status clause is ANDed on top.
///
/// Tag names travel as a single JSON array parameter, so the statement never
/// outgrows `SQLite`'s bound-variable limit however many names are requested.
fn question_filter(query: &QuestionQuery) -> (String, Vec<libsql::Value>) {
    let mut clauses = String::new();
    let mut params: Vec<libsql::Value> = Vec::new();

    if query.has_tag_filter() {
        params.push(serde_json::Value::from(query.tags.clone()).to_string().into());
        clauses.push_str(&format!(
            " AND EXISTS (SELECT 1 FROM question_tags qt JOIN tags t ON t.id = qt.tag_id
                          WHERE qt.question_id = q.id
                            AND t.name IN (SELECT value FROM json_each(?{})))",
            params.len()
        ));
    }
    if let Some(resolved) = query.status.required_state() {
        params.push(i64::from(resolved).into());
        clauses.push_str(&format!(" AND q.is_resolved = ?{}", params.len()));
    }

    (clauses, params)
}

/// Read one question with its tags on the given connection.
async fn fetch_question(
    conn: &libsql::Connection,
    id: QuestionId,
) -> Result<Question, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SELECT_COLS} FROM questions q WHERE q.id = ?1"),
            libsql::params![id.get()],
        )
        .await?;
    let row = rows
        .next()
        .await?
        .ok_or_else(|| DatabaseError::not_found("question", id))?;
    let mut question = [row_to_question(&row)?];
    load_tags(conn, &mut question).await?;
    let [question] = question;
    Ok(question)
}

async fn insert_question(
    conn: &libsql::Connection,
    new: &NewQuestion,
    tags: &[String],
) -> Result<QuestionId, DatabaseError> {
    let created_at = new.created_at.unwrap_or_else(Utc::now);
    conn.execute(
        "INSERT INTO questions (title, content, is_resolved, created_at) VALUES (?1, ?2, 0, ?3)",
        libsql::params![
            new.title.as_str(),
            new.content.as_str(),
            format_datetime(&created_at)
        ],
    )
    .await?;
    let id = QuestionId::new(conn.last_insert_rowid());

    for name in tags {
        let tag_id = ensure_tag(conn, name).await?;
        attach_tag(conn, id, tag_id).await?;
    }
    Ok(id)
}

async fn select_questions(
    conn: &libsql::Connection,
    query: &QuestionQuery,
) -> Result<Vec<Question>, DatabaseError> {
    let (filter, params) = question_filter(query);
    let sql = format!("SELECT {SELECT_COLS} FROM questions q WHERE 1=1{filter} {ORDER_NEWEST_FIRST}");
    let mut rows = conn.query(&sql, libsql::params_from_iter(params)).await?;

    let mut questions = Vec::new();
    while let Some(row) = rows.next().await? {
        questions.push(row_to_question(&row)?);
    }
    load_tags(conn, &mut questions).await?;
    Ok(questions)
}

async fn mark_resolved(
    conn: &libsql::Connection,
    id: QuestionId,
) -> Result<Question, DatabaseError> {
    // Unconditional: an already-resolved row still counts as matched.
    let matched = conn
        .execute(
            "UPDATE questions SET is_resolved = 1 WHERE id = ?1",
            libsql::params![id.get()],
        )
        .await?;
    if matched == 0 {
        return Err(DatabaseError::not_found("question", id));
    }
    fetch_question(conn, id).await
}

impl AskService {
    /// Ingest a question and link its tags, creating missing tag rows.
    ///
    /// Tag names are trimmed and de-duplicated; blank names are dropped.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Core` for a blank title, `StoreUnavailable` if
    /// the store cannot be reached. Nothing is written on failure.
    #[tracing::instrument(skip(self, new), fields(title = %new.title))]
    pub async fn create_question(&self, new: &NewQuestion) -> Result<Question, DatabaseError> {
        if new.title.trim().is_empty() {
            return Err(CoreError::InvalidInput("question title must not be blank".into()).into());
        }
        let tags = normalize_tag_names(&new.tags);

        let question = self
            .in_transaction("create_question", |conn| async move {
                let id = insert_question(&conn, new, &tags).await?;
                fetch_question(&conn, id).await
            })
            .await?;
        tracing::debug!(id = %question.id, tags = ?question.tag_names(), "question created");
        Ok(question)
    }

    /// Fetch a single question with its tags.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for an unknown id.
    pub async fn get_question(&self, id: QuestionId) -> Result<Question, DatabaseError> {
        self.in_transaction("get_question", |conn| async move {
            fetch_question(&conn, id).await
        })
        .await
    }

    /// Resolve a normalized query into the ordered result set.
    ///
    /// Questions match when they carry any of the requested tags (or no tags
    /// were requested) and their resolution state passes the status filter.
    /// Results are newest first, ties broken by descending id, each with its
    /// full tag list. Both reads share one transaction, so the tags always
    /// belong to the same snapshot as the questions.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::StoreUnavailable` if the store cannot be
    /// reached or the request times out. No partial results are returned.
    #[tracing::instrument(skip(self), fields(tags = ?query.tags, status = %query.status))]
    pub async fn search_questions(
        &self,
        query: &QuestionQuery,
    ) -> Result<Vec<Question>, DatabaseError> {
        let questions = self
            .in_transaction("search_questions", |conn| async move {
                select_questions(&conn, query).await
            })
            .await?;
        tracing::debug!(count = questions.len(), "question search complete");
        Ok(questions)
    }

    /// Ensure a question is resolved and return its post-transition state.
    ///
    /// Idempotent: resolving an already-resolved question succeeds and
    /// returns the same record. There is no way back to unresolved.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` for an unknown id and
    /// `DatabaseError::StoreUnavailable` if the write could not be committed;
    /// in both cases the stored state is unchanged.
    #[tracing::instrument(skip(self))]
    pub async fn resolve_question(&self, id: QuestionId) -> Result<Question, DatabaseError> {
        let question = self
            .in_transaction("resolve_question", |conn| async move {
                mark_resolved(&conn, id).await
            })
            .await?;
        tracing::info!(%id, "question resolved");
        Ok(question)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone};
    use pretty_assertions::assert_eq;

    use super::*;
    use ask_core::enums::ResolutionFilter;
    use crate::test_support::helpers::{ids, seed_scenario, test_service};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_770_000_000 + secs, 0).unwrap()
    }

    #[tokio::test]
    async fn create_question_roundtrip() {
        let svc = test_service().await;

        let created = svc
            .create_question(
                &NewQuestion::new("How does mmap work?", "Some **markdown**")
                    .with_tags(["os", "memory"])
                    .created_at(at(0)),
            )
            .await
            .unwrap();

        assert!(!created.is_resolved);
        assert_eq!(created.created_at, at(0));
        assert_eq!(created.tag_names(), vec!["os", "memory"]);

        let fetched = svc.get_question(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn create_question_normalizes_and_shares_tags() {
        let svc = test_service().await;

        let first = svc
            .create_question(&NewQuestion::new("a", "").with_tags([" os ", "os", ""]))
            .await
            .unwrap();
        let second = svc
            .create_question(&NewQuestion::new("b", "").with_tags(["os"]))
            .await
            .unwrap();

        assert_eq!(first.tag_names(), vec!["os"]);
        assert_eq!(first.tags, second.tags, "tag rows are shared, not duplicated");
    }

    #[tokio::test]
    async fn create_question_rejects_blank_title() {
        let svc = test_service().await;
        let err = svc
            .create_question(&NewQuestion::new("   ", "body"))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Core(CoreError::InvalidInput(_))));
        assert!(svc.search_questions(&QuestionQuery::all()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_question_binds_content_verbatim() {
        let svc = test_service().await;
        let content = "'); DROP TABLE questions; --";
        let created = svc
            .create_question(&NewQuestion::new("quote", content))
            .await
            .unwrap();
        assert_eq!(svc.get_question(created.id).await.unwrap().content, content);
    }

    #[tokio::test]
    async fn get_question_unknown_id_is_not_found() {
        let svc = test_service().await;
        let err = svc.get_question(QuestionId::new(404)).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn search_scenario_filters() {
        let svc = test_service().await;
        let seeded = seed_scenario(&svc).await;

        let unresolved_os = svc
            .search_questions(&QuestionQuery::new(["os"], ResolutionFilter::Unresolved))
            .await
            .unwrap();
        assert_eq!(ids(&unresolved_os), vec![seeded.a]);

        let resolved = svc
            .search_questions(&QuestionQuery::new(
                Vec::<String>::new(),
                ResolutionFilter::Resolved,
            ))
            .await
            .unwrap();
        assert_eq!(ids(&resolved), vec![seeded.b]);

        let either = svc
            .search_questions(&QuestionQuery::new(["networking", "os"], ResolutionFilter::Any))
            .await
            .unwrap();
        assert_eq!(ids(&either), vec![seeded.c, seeded.b, seeded.a]);
    }

    #[tokio::test]
    async fn search_eager_loads_all_tags() {
        let svc = test_service().await;
        let seeded = seed_scenario(&svc).await;

        // Filtering on one tag still returns the full tag set.
        let results = svc
            .search_questions(&QuestionQuery::new(["malloc"], ResolutionFilter::Any))
            .await
            .unwrap();
        assert_eq!(ids(&results), vec![seeded.a]);
        assert_eq!(results[0].tag_names(), vec!["os", "malloc"]);
    }

    #[tokio::test]
    async fn search_unknown_tag_is_empty() {
        let svc = test_service().await;
        seed_scenario(&svc).await;

        let results = svc
            .search_questions(&QuestionQuery::from_params(Some("nonexistent-tag"), None))
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn search_tag_match_is_case_sensitive() {
        let svc = test_service().await;
        seed_scenario(&svc).await;

        let results = svc
            .search_questions(&QuestionQuery::from_params(Some("OS"), None))
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn search_breaks_timestamp_ties_by_descending_id() {
        let svc = test_service().await;
        let mut created = Vec::new();
        for title in ["first", "second", "third"] {
            let q = svc
                .create_question(&NewQuestion::new(title, "").created_at(at(10)))
                .await
                .unwrap();
            created.push(q.id);
        }
        created.reverse();

        for _ in 0..3 {
            let results = svc.search_questions(&QuestionQuery::all()).await.unwrap();
            assert_eq!(ids(&results), created);
        }
    }

    #[tokio::test]
    async fn search_untagged_questions_only_without_tag_filter() {
        let svc = test_service().await;
        let untagged = svc
            .create_question(&NewQuestion::new("untagged", ""))
            .await
            .unwrap();

        let all = svc.search_questions(&QuestionQuery::all()).await.unwrap();
        assert_eq!(ids(&all), vec![untagged.id]);
        assert!(all[0].tags.is_empty());

        let tagged = svc
            .search_questions(&QuestionQuery::from_params(Some("os"), None))
            .await
            .unwrap();
        assert!(tagged.is_empty());
    }

    #[tokio::test]
    async fn resolve_question_sets_flag() {
        let svc = test_service().await;
        let seeded = seed_scenario(&svc).await;

        let resolved = svc.resolve_question(seeded.a).await.unwrap();
        assert!(resolved.is_resolved);
        assert_eq!(resolved.tag_names(), vec!["os", "malloc"]);
        assert!(svc.get_question(seeded.a).await.unwrap().is_resolved);
    }

    #[tokio::test]
    async fn resolve_question_is_idempotent() {
        let svc = test_service().await;
        let seeded = seed_scenario(&svc).await;

        let before = svc.get_question(seeded.b).await.unwrap();
        let first = svc.resolve_question(seeded.b).await.unwrap();
        let second = svc.resolve_question(seeded.b).await.unwrap();

        assert_eq!(first, before);
        assert_eq!(second, before);
    }

    #[tokio::test]
    async fn resolve_question_unknown_id_is_not_found() {
        let svc = test_service().await;
        seed_scenario(&svc).await;

        let err = svc.resolve_question(QuestionId::new(999)).await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { entity: "question", .. }));

        // The failed request left the connection usable.
        assert_eq!(svc.search_questions(&QuestionQuery::all()).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn resolved_question_shows_up_in_resolved_search() {
        let svc = test_service().await;
        let seeded = seed_scenario(&svc).await;

        svc.resolve_question(seeded.c).await.unwrap();

        let resolved = svc
            .search_questions(&QuestionQuery::from_params(None, Some("resolved")))
            .await
            .unwrap();
        assert_eq!(ids(&resolved), vec![seeded.c, seeded.b]);

        let unresolved = svc
            .search_questions(&QuestionQuery::from_params(None, Some("unresolved")))
            .await
            .unwrap();
        assert_eq!(ids(&unresolved), vec![seeded.a]);
    }

    #[tokio::test]
    async fn store_rejects_unresolving_and_created_at_rewrites() {
        let svc = test_service().await;
        let seeded = seed_scenario(&svc).await;
        let conn = svc.db().acquire().await.unwrap();

        let unresolve = conn
            .execute(
                "UPDATE questions SET is_resolved = 0 WHERE id = ?1",
                libsql::params![seeded.b.get()],
            )
            .await;
        assert!(unresolve.is_err());

        let rewrite = conn
            .execute(
                "UPDATE questions SET created_at = '2000-01-01T00:00:00.000000Z' WHERE id = ?1",
                libsql::params![seeded.a.get()],
            )
            .await;
        assert!(rewrite.is_err());
    }

    #[tokio::test]
    async fn busy_connection_times_out_as_store_unavailable() {
        let svc = test_service()
            .await
            .with_query_timeout(std::time::Duration::from_millis(20));
        let _held = svc.db().acquire().await.unwrap();

        let err = svc
            .search_questions(&QuestionQuery::all())
            .await
            .unwrap_err();
        assert!(err.is_retryable(), "{err}");
    }

    #[test]
    fn filter_sql_for_unfiltered_query_is_empty() {
        let (sql, params) = question_filter(&QuestionQuery::all());
        assert!(sql.is_empty());
        assert!(params.is_empty());
    }

    #[test]
    fn filter_sql_binds_tag_names_as_one_json_array() {
        let query = QuestionQuery::new(["os", "malloc"], ResolutionFilter::Resolved);
        let (sql, params) = question_filter(&query);
        assert!(sql.contains("json_each(?1)"));
        assert!(sql.contains("q.is_resolved = ?2"));
        assert_eq!(params.len(), 2);
        assert!(matches!(&params[0], libsql::Value::Text(json) if json == r#"["os","malloc"]"#));
    }

    #[test]
    fn filter_sql_status_only_uses_first_placeholder() {
        let query = QuestionQuery::new(Vec::<String>::new(), ResolutionFilter::Unresolved);
        let (sql, params) = question_filter(&query);
        assert!(sql.contains("q.is_resolved = ?1"));
        assert_eq!(params.len(), 1);
        assert!(matches!(params[0], libsql::Value::Integer(0)));
    }

    #[tokio::test]
    async fn search_with_more_tags_than_sqlite_variables() {
        let svc = test_service().await;
        let q = svc
            .create_question(&NewQuestion::new("needle", "").with_tags(["os"]))
            .await
            .unwrap();

        let mut tags: Vec<String> = (0..40_000).map(|n| format!("missing-{n}")).collect();
        tags.push("os".to_string());
        let query = QuestionQuery::new(tags, ResolutionFilter::Any);

        let results = svc.search_questions(&query).await.unwrap();
        assert_eq!(ids(&results), vec![q.id]);
    }

    #[tokio::test]
    async fn search_json_bound_names_stay_exact() {
        let svc = test_service().await;
        let plain = svc
            .create_question(&NewQuestion::new("plain", "").with_tags(["c++"]))
            .await
            .unwrap();
        svc.create_question(&NewQuestion::new("quoted", "").with_tags([r#"say "hi""#]))
            .await
            .unwrap();

        let results = svc
            .search_questions(&QuestionQuery::new(["c++", "say"], ResolutionFilter::Any))
            .await
            .unwrap();
        assert_eq!(ids(&results), vec![plain.id]);

        let quoted = svc
            .search_questions(&QuestionQuery::new([r#"say "hi""#], ResolutionFilter::Any))
            .await
            .unwrap();
        assert_eq!(quoted.len(), 1);
        assert_eq!(quoted[0].title, "quoted");
    }
}
