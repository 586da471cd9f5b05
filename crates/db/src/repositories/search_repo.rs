//! Repository for question search.
//!
//! Translates a core `SearchQuery` descriptor into one of three SQL shapes:
//! substring match over question text, substring match over answer text,
//! or ranked `tsvector` search over both.

use qanda_core::search::{escape_like, SearchQuery};
use sqlx::PgPool;

use crate::models::question::QuestionRow;
use crate::repositories::question_repo::COLUMNS;

/// The text blob ranked for a question/answer pair.
const DOCUMENT: &str =
    "to_tsvector('english', q.title || ' ' || q.body || ' ' || COALESCE(a.body, ''))";

pub struct SearchRepo;

impl SearchRepo {
    pub async fn search(pool: &PgPool, query: &SearchQuery) -> Result<Vec<QuestionRow>, sqlx::Error> {
        match query {
            SearchQuery::QuestionText { needle } => Self::question_text(pool, needle).await,
            SearchQuery::AnswerText { needle, limit } => {
                Self::answer_text(pool, needle, *limit).await
            }
            SearchQuery::Ranked { topic, .. } => {
                // Builders never produce a ranked query without terms.
                let tsquery = query.tsquery().unwrap_or_default();
                Self::ranked(pool, &tsquery, topic.as_deref()).await
            }
        }
    }

    /// Questions whose title, body, or topic contains `needle`, ignoring case.
    async fn question_text(pool: &PgPool, needle: &str) -> Result<Vec<QuestionRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM questions
             WHERE title ILIKE '%' || $1 || '%'
                OR body ILIKE '%' || $1 || '%'
                OR topic ILIKE '%' || $1 || '%'
             ORDER BY created_at DESC, qid DESC"
        );
        sqlx::query_as::<_, QuestionRow>(&query)
            .bind(escape_like(needle))
            .fetch_all(pool)
            .await
    }

    /// Questions with at least one answer whose body contains `needle`.
    async fn answer_text(
        pool: &PgPool,
        needle: &str,
        limit: i64,
    ) -> Result<Vec<QuestionRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM questions q
             WHERE EXISTS (
                 SELECT 1 FROM answers a
                 WHERE a.qid = q.qid AND a.body ILIKE '%' || $1 || '%'
             )
             ORDER BY q.created_at DESC, q.qid DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, QuestionRow>(&query)
            .bind(escape_like(needle))
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Ranked full-text search. Each question is paired with each of its
    /// answers (or none); the best-ranked pairing per question is kept and
    /// the survivors are ordered by rank.
    async fn ranked(
        pool: &PgPool,
        tsquery: &str,
        topic: Option<&str>,
    ) -> Result<Vec<QuestionRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM (
                 SELECT DISTINCT ON (q.qid)
                        q.qid, q.uid, q.title, q.body, q.topic, q.created_at,
                        ts_rank({DOCUMENT}, to_tsquery('english', $1)) AS rank
                 FROM questions q
                 LEFT JOIN answers a ON a.qid = q.qid
                 WHERE {DOCUMENT} @@ to_tsquery('english', $1)
                   AND ($2::TEXT IS NULL OR q.topic = $2)
                 ORDER BY q.qid, rank DESC
             ) ranked
             ORDER BY rank DESC, qid ASC"
        );
        sqlx::query_as::<_, QuestionRow>(&query)
            .bind(tsquery)
            .bind(topic)
            .fetch_all(pool)
            .await
    }
}
