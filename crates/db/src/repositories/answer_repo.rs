//! Repository for the `answers` and `best_answers` tables.

use qanda_core::models::NewAnswer;
use qanda_core::types::{DbId, UserId};
use sqlx::PgPool;

use crate::models::answer::{AnswerRow, BestAnswerRow};

const COLUMNS: &str = "qid, uid, body, created_at";

pub struct AnswerRepo;

impl AnswerRepo {
    /// Insert an answer. A second answer by the same user on the same
    /// question violates `uq_answers_qid_uid`.
    pub async fn create(pool: &PgPool, input: &NewAnswer) -> Result<AnswerRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO answers (qid, uid, body)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AnswerRow>(&query)
            .bind(input.qid)
            .bind(input.uid)
            .bind(&input.body)
            .fetch_one(pool)
            .await
    }

    /// All answers to a question, oldest first.
    pub async fn list_for_question(pool: &PgPool, qid: DbId) -> Result<Vec<AnswerRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM answers
             WHERE qid = $1
             ORDER BY created_at ASC, uid ASC"
        );
        sqlx::query_as::<_, AnswerRow>(&query)
            .bind(qid)
            .fetch_all(pool)
            .await
    }

    pub async fn find_best(pool: &PgPool, qid: DbId) -> Result<Option<BestAnswerRow>, sqlx::Error> {
        sqlx::query_as::<_, BestAnswerRow>("SELECT qid, uid FROM best_answers WHERE qid = $1")
            .bind(qid)
            .fetch_optional(pool)
            .await
    }

    /// Set the best answer for a question, replacing any earlier choice.
    pub async fn upsert_best(pool: &PgPool, qid: DbId, uid: UserId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO best_answers (qid, uid)
             VALUES ($1, $2)
             ON CONFLICT (qid) DO UPDATE SET uid = EXCLUDED.uid",
        )
        .bind(qid)
        .bind(uid)
        .execute(pool)
        .await?;
        Ok(())
    }
}
