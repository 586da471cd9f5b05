//! Repository for the `users` and `topics` tables.

use qanda_core::types::UserId;
use sqlx::PgPool;

use crate::models::user::{TopicRow, UserRow};

const COLUMNS: &str = "uid, username, bio, created_at";

pub struct UserRepo;

impl UserRepo {
    pub async fn create(pool: &PgPool, username: &str) -> Result<UserRow, sqlx::Error> {
        let query = format!("INSERT INTO users (username) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(username)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, uid: UserId) -> Result<Option<UserRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE uid = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(uid)
            .fetch_optional(pool)
            .await
    }

    /// Replace a user's bio. Returns `None` if no such user exists.
    pub async fn update_bio(
        pool: &PgPool,
        uid: UserId,
        bio: &str,
    ) -> Result<Option<UserRow>, sqlx::Error> {
        let query = format!("UPDATE users SET bio = $2 WHERE uid = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(uid)
            .bind(bio)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_topics(pool: &PgPool) -> Result<Vec<TopicRow>, sqlx::Error> {
        sqlx::query_as::<_, TopicRow>("SELECT topic_path FROM topics ORDER BY topic_path")
            .fetch_all(pool)
            .await
    }
}
