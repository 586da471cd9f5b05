//! Repository for the `karma` vote ledger.

use qanda_core::types::{DbId, UserId};
use sqlx::PgPool;

pub struct KarmaRepo;

impl KarmaRepo {
    /// Insert or overwrite the vote for `(qid, uid, voter_uid)`.
    pub async fn upsert(
        pool: &PgPool,
        qid: DbId,
        uid: UserId,
        voter_uid: UserId,
        vote: i16,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO karma (qid, uid, voter_uid, vote)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (qid, uid, voter_uid) DO UPDATE SET vote = EXCLUDED.vote",
        )
        .bind(qid)
        .bind(uid)
        .bind(voter_uid)
        .bind(vote)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// The raw vote value a voter cast on an answer, if any.
    pub async fn find_vote(
        pool: &PgPool,
        qid: DbId,
        uid: UserId,
        voter_uid: UserId,
    ) -> Result<Option<i16>, sqlx::Error> {
        sqlx::query_scalar::<_, i16>(
            "SELECT vote FROM karma WHERE qid = $1 AND uid = $2 AND voter_uid = $3",
        )
        .bind(qid)
        .bind(uid)
        .bind(voter_uid)
        .fetch_optional(pool)
        .await
    }

    /// Sum of all votes on an answer. `SUM` over no rows is `NULL`, which is
    /// coalesced to zero.
    pub async fn sum(pool: &PgPool, qid: DbId, uid: UserId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(vote), 0)::BIGINT FROM karma WHERE qid = $1 AND uid = $2",
        )
        .bind(qid)
        .bind(uid)
        .fetch_one(pool)
        .await
    }
}
