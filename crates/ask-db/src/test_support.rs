//! Shared test utilities for ask-db unit tests.

pub(crate) mod helpers {
    use ask_core::entities::{NewQuestion, Question};
    use ask_core::ids::QuestionId;
    use chrono::{TimeZone, Utc};

    use crate::AskDb;
    use crate::service::AskService;

    /// Create an in-memory AskService.
    pub async fn test_service() -> AskService {
        let db = AskDb::open_local(":memory:").await.unwrap();
        AskService::from_db(db)
    }

    /// Ids of the board's three reference questions.
    pub struct Seeded {
        pub a: QuestionId,
        pub b: QuestionId,
        pub c: QuestionId,
    }

    /// Seed the reference board:
    ///
    /// ```text
    /// A  [os, malloc]   unresolved  t1
    /// B  [os]           resolved    t2 > t1
    /// C  [networking]   unresolved  t3 > t2
    /// ```
    pub async fn seed_scenario(svc: &AskService) -> Seeded {
        let t = |secs: i64| Utc.timestamp_opt(1_770_000_000 + secs, 0).unwrap();

        let a = svc
            .create_question(
                &NewQuestion::new("A", "first")
                    .with_tags(["os", "malloc"])
                    .created_at(t(1)),
            )
            .await
            .unwrap();
        let b = svc
            .create_question(
                &NewQuestion::new("B", "second")
                    .with_tags(["os"])
                    .created_at(t(2)),
            )
            .await
            .unwrap();
        let c = svc
            .create_question(
                &NewQuestion::new("C", "third")
                    .with_tags(["networking"])
                    .created_at(t(3)),
            )
            .await
            .unwrap();
        svc.resolve_question(b.id).await.unwrap();

        Seeded {
            a: a.id,
            b: b.id,
            c: c.id,
        }
    }

    pub fn ids(questions: &[Question]) -> Vec<QuestionId> {
        questions.iter().map(|q| q.id).collect()
    }
}
