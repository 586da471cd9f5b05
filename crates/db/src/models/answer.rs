use qanda_core::models::{Answer, BestAnswer};
use qanda_core::types::{DbId, Timestamp, UserId};
use sqlx::FromRow;

/// A row from the `answers` table.
#[derive(Debug, Clone, FromRow)]
pub struct AnswerRow {
    pub qid: DbId,
    pub uid: UserId,
    pub body: String,
    pub created_at: Timestamp,
}

impl From<AnswerRow> for Answer {
    fn from(row: AnswerRow) -> Self {
        Answer {
            qid: row.qid,
            uid: row.uid,
            body: row.body,
            created_at: row.created_at,
        }
    }
}

/// A row from the `best_answers` table.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct BestAnswerRow {
    pub qid: DbId,
    pub uid: UserId,
}

impl From<BestAnswerRow> for BestAnswer {
    fn from(row: BestAnswerRow) -> Self {
        BestAnswer {
            qid: row.qid,
            uid: row.uid,
        }
    }
}
