use qanda_core::models::Question;
use qanda_core::types::{DbId, Timestamp, UserId};
use sqlx::FromRow;

/// A row from the `questions` table.
#[derive(Debug, Clone, FromRow)]
pub struct QuestionRow {
    pub qid: DbId,
    pub uid: UserId,
    pub title: String,
    pub body: String,
    pub topic: String,
    pub created_at: Timestamp,
}

impl From<QuestionRow> for Question {
    fn from(row: QuestionRow) -> Self {
        Question {
            qid: row.qid,
            uid: row.uid,
            title: row.title,
            body: row.body,
            topic: row.topic,
            created_at: row.created_at,
        }
    }
}
