//! PostgreSQL implementation of [`QaStore`].

use async_trait::async_trait;
use qanda_core::models::{
    Answer, AnswerKey, BestAnswer, KarmaVote, NewAnswer, NewQuestion, NewUser, Question,
    QuestionFilter, Topic, User, Vote,
};
use qanda_core::search::SearchQuery;
use qanda_core::store::{QaStore, StoreResult};
use qanda_core::types::{DbId, UserId};

use crate::error::classify;
use crate::models::karma::{vote_from_column, vote_to_column};
use crate::repositories::{AnswerRepo, KarmaRepo, QuestionRepo, SearchRepo, UserRepo};
use crate::DbPool;

/// Store backed by a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

fn into_all<R, T: From<R>>(rows: Vec<R>) -> Vec<T> {
    rows.into_iter().map(T::from).collect()
}

#[async_trait]
impl QaStore for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        crate::health_check(&self.pool).await.map_err(classify)
    }

    async fn create_question(&self, input: &NewQuestion) -> StoreResult<Question> {
        let row = QuestionRepo::create(&self.pool, input)
            .await
            .map_err(classify)?;
        Ok(row.into())
    }

    async fn find_question(&self, qid: DbId) -> StoreResult<Option<Question>> {
        let row = QuestionRepo::find_by_id(&self.pool, qid)
            .await
            .map_err(classify)?;
        Ok(row.map(Into::into))
    }

    async fn list_questions(&self, filter: &QuestionFilter) -> StoreResult<Vec<Question>> {
        let rows = match filter {
            QuestionFilter::Recent { limit } => QuestionRepo::list_recent(&self.pool, *limit).await,
            QuestionFilter::Topic { path, limit } => {
                QuestionRepo::list_by_topic(&self.pool, path, *limit).await
            }
            QuestionFilter::Author { uid } => QuestionRepo::list_by_author(&self.pool, *uid).await,
        }
        .map_err(classify)?;
        Ok(into_all(rows))
    }

    async fn search_questions(&self, query: &SearchQuery) -> StoreResult<Vec<Question>> {
        let rows = SearchRepo::search(&self.pool, query)
            .await
            .map_err(classify)?;
        Ok(into_all(rows))
    }

    async fn create_answer(&self, input: &NewAnswer) -> StoreResult<Answer> {
        let row = AnswerRepo::create(&self.pool, input)
            .await
            .map_err(classify)?;
        Ok(row.into())
    }

    async fn list_answers(&self, qid: DbId) -> StoreResult<Vec<Answer>> {
        let rows = AnswerRepo::list_for_question(&self.pool, qid)
            .await
            .map_err(classify)?;
        Ok(into_all(rows))
    }

    async fn find_best_answer(&self, qid: DbId) -> StoreResult<Option<BestAnswer>> {
        let row = AnswerRepo::find_best(&self.pool, qid)
            .await
            .map_err(classify)?;
        Ok(row.map(Into::into))
    }

    async fn upsert_best_answer(&self, best: &BestAnswer) -> StoreResult<()> {
        AnswerRepo::upsert_best(&self.pool, best.qid, best.uid)
            .await
            .map_err(classify)
    }

    async fn upsert_vote(&self, vote: &KarmaVote) -> StoreResult<()> {
        KarmaRepo::upsert(
            &self.pool,
            vote.qid,
            vote.uid,
            vote.voter_uid,
            vote_to_column(vote.vote),
        )
        .await
        .map_err(classify)
    }

    async fn find_vote(&self, answer: AnswerKey, voter_uid: UserId) -> StoreResult<Option<Vote>> {
        let value = KarmaRepo::find_vote(&self.pool, answer.qid, answer.uid, voter_uid)
            .await
            .map_err(classify)?;
        value.map(vote_from_column).transpose()
    }

    async fn sum_votes(&self, answer: AnswerKey) -> StoreResult<i64> {
        KarmaRepo::sum(&self.pool, answer.qid, answer.uid)
            .await
            .map_err(classify)
    }

    async fn create_user(&self, input: &NewUser) -> StoreResult<User> {
        let row = UserRepo::create(&self.pool, &input.username)
            .await
            .map_err(classify)?;
        Ok(row.into())
    }

    async fn find_user(&self, uid: UserId) -> StoreResult<Option<User>> {
        let row = UserRepo::find_by_id(&self.pool, uid)
            .await
            .map_err(classify)?;
        Ok(row.map(Into::into))
    }

    async fn update_bio(&self, uid: UserId, bio: &str) -> StoreResult<Option<User>> {
        let row = UserRepo::update_bio(&self.pool, uid, bio)
            .await
            .map_err(classify)?;
        Ok(row.map(Into::into))
    }

    async fn list_topics(&self) -> StoreResult<Vec<Topic>> {
        let rows = UserRepo::list_topics(&self.pool)
            .await
            .map_err(classify)?;
        Ok(into_all(rows))
    }
}
