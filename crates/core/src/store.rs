//! Store contract.
//!
//! Every read and write the core performs goes through [`QaStore`]. The
//! PostgreSQL implementation lives in `qanda-db`; [`MemoryStore`] in this
//! crate backs tests and local runs.
//!
//! [`MemoryStore`]: crate::memory::MemoryStore

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{
    Answer, AnswerKey, BestAnswer, KarmaVote, NewAnswer, NewQuestion, NewUser, Question,
    QuestionFilter, Topic, User, Vote,
};
use crate::search::SearchQuery;
use crate::types::{DbId, UserId};

/// Default deadline applied to a single store call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

pub type StoreResult<T> = Result<T, StoreError>;

/// Shared, cheaply cloneable store handle.
pub type SharedStore = Arc<dyn QaStore>;

/// Persistence contract for questions, answers, best answers, and votes.
#[async_trait]
pub trait QaStore: Send + Sync {
    /// Cheap round-trip used by health checks.
    async fn ping(&self) -> StoreResult<()>;

    // Questions
    async fn create_question(&self, input: &NewQuestion) -> StoreResult<Question>;
    async fn find_question(&self, qid: DbId) -> StoreResult<Option<Question>>;
    /// Newest first.
    async fn list_questions(&self, filter: &QuestionFilter) -> StoreResult<Vec<Question>>;
    async fn search_questions(&self, query: &SearchQuery) -> StoreResult<Vec<Question>>;

    // Answers
    /// Fails with [`StoreError::Conflict`] if the user already answered.
    async fn create_answer(&self, input: &NewAnswer) -> StoreResult<Answer>;
    /// Oldest first, ties broken by author uid.
    async fn list_answers(&self, qid: DbId) -> StoreResult<Vec<Answer>>;
    async fn find_best_answer(&self, qid: DbId) -> StoreResult<Option<BestAnswer>>;
    /// Insert or overwrite the best answer for `best.qid`.
    async fn upsert_best_answer(&self, best: &BestAnswer) -> StoreResult<()>;

    // Karma
    /// Insert or overwrite the vote for `(qid, uid, voter_uid)`.
    async fn upsert_vote(&self, vote: &KarmaVote) -> StoreResult<()>;
    async fn find_vote(&self, answer: AnswerKey, voter_uid: UserId) -> StoreResult<Option<Vote>>;
    /// Sum of all votes on the answer, `0` when there are none.
    async fn sum_votes(&self, answer: AnswerKey) -> StoreResult<i64>;

    // Users & topics
    async fn create_user(&self, input: &NewUser) -> StoreResult<User>;
    async fn find_user(&self, uid: UserId) -> StoreResult<Option<User>>;
    async fn update_bio(&self, uid: UserId, bio: &str) -> StoreResult<Option<User>>;
    async fn list_topics(&self) -> StoreResult<Vec<Topic>>;
}

/// Per-call deadline for store futures.
///
/// A store call that outlives the deadline is dropped and reported as
/// [`StoreError::Timeout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline(pub Duration);

impl Default for Deadline {
    fn default() -> Self {
        Deadline(DEFAULT_STORE_TIMEOUT)
    }
}

impl Deadline {
    pub async fn run<T, F>(self, fut: F) -> StoreResult<T>
    where
        F: Future<Output = StoreResult<T>>,
    {
        match tokio::time::timeout(self.0, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(timeout_ms = self.0.as_millis() as u64, "Store call timed out");
                Err(StoreError::Timeout(self.0))
            }
        }
    }
}
