use qanda_core::models::{Topic, User};
use qanda_core::types::{Timestamp, UserId};
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub uid: UserId,
    pub username: String,
    pub bio: String,
    pub created_at: Timestamp,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            uid: row.uid,
            username: row.username,
            bio: row.bio,
            created_at: row.created_at,
        }
    }
}

/// A row from the `topics` table.
#[derive(Debug, Clone, FromRow)]
pub struct TopicRow {
    pub topic_path: String,
}

impl From<TopicRow> for Topic {
    fn from(row: TopicRow) -> Self {
        Topic {
            topic_path: row.topic_path,
        }
    }
}
