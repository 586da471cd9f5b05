//! Repository for the `questions` table.

use qanda_core::models::NewQuestion;
use qanda_core::types::{DbId, UserId};
use sqlx::PgPool;

use crate::models::question::QuestionRow;

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "qid, uid, title, body, topic, created_at";

/// Feed ordering: newest first, qid as tiebreaker.
const NEWEST_FIRST: &str = "ORDER BY created_at DESC, qid DESC";

pub struct QuestionRepo;

impl QuestionRepo {
    /// Insert a question and register its topic in the catalogue, in one
    /// transaction.
    pub async fn create(pool: &PgPool, input: &NewQuestion) -> Result<QuestionRow, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("INSERT INTO topics (topic_path) VALUES ($1) ON CONFLICT DO NOTHING")
            .bind(&input.topic)
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO questions (uid, title, body, topic)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, QuestionRow>(&query)
            .bind(input.uid)
            .bind(&input.title)
            .bind(&input.body)
            .bind(&input.topic)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row)
    }

    pub async fn find_by_id(pool: &PgPool, qid: DbId) -> Result<Option<QuestionRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions WHERE qid = $1");
        sqlx::query_as::<_, QuestionRow>(&query)
            .bind(qid)
            .fetch_optional(pool)
            .await
    }

    /// The most recently asked questions.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<QuestionRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions {NEWEST_FIRST} LIMIT $1");
        sqlx::query_as::<_, QuestionRow>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// The most recent questions whose topic contains `path`.
    pub async fn list_by_topic(
        pool: &PgPool,
        path: &str,
        limit: i64,
    ) -> Result<Vec<QuestionRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM questions
             WHERE topic LIKE '%' || $1 || '%'
             {NEWEST_FIRST}
             LIMIT $2"
        );
        sqlx::query_as::<_, QuestionRow>(&query)
            .bind(qanda_core::search::escape_like(path))
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn list_by_author(pool: &PgPool, uid: UserId) -> Result<Vec<QuestionRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions WHERE uid = $1 {NEWEST_FIRST}");
        sqlx::query_as::<_, QuestionRow>(&query)
            .bind(uid)
            .fetch_all(pool)
            .await
    }
}
