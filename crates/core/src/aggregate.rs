//! Fan-out/fan-in of answer-set resolution over a batch of questions.
//!
//! Every question in a batch is resolved concurrently on the calling task.
//! The batch completes once every resolution has completed, and fails as a
//! whole if any one fails. Results are placed by input index, so the output
//! order always matches the input order regardless of which store call
//! finishes first.

use futures::future::try_join_all;

use crate::error::CoreError;
use crate::models::{AggregatedResult, Question, QuestionFilter};
use crate::resolver::resolve;
use crate::store::{Deadline, QaStore, SharedStore, StoreResult};
use crate::types::{DbId, UserId};

/// Resolve answers for each question, preserving input order.
pub async fn aggregate(
    store: &dyn QaStore,
    deadline: Deadline,
    questions: Vec<Question>,
) -> StoreResult<Vec<AggregatedResult>> {
    if questions.is_empty() {
        return Ok(Vec::new());
    }

    let sets = try_join_all(questions.iter().map(|q| resolve(store, deadline, q.qid))).await?;

    Ok(questions
        .into_iter()
        .zip(sets)
        .map(|(question, set)| AggregatedResult {
            question,
            answers: set.answers,
        })
        .collect())
}

/// Feed entry points: load a batch of questions, then aggregate it.
#[derive(Clone)]
pub struct Aggregator {
    store: SharedStore,
    deadline: Deadline,
}

impl Aggregator {
    pub fn new(store: SharedStore, deadline: Deadline) -> Self {
        Self { store, deadline }
    }

    pub async fn aggregate(&self, questions: Vec<Question>) -> StoreResult<Vec<AggregatedResult>> {
        aggregate(self.store.as_ref(), self.deadline, questions).await
    }

    /// Load questions matching `filter` and attach their answers.
    pub async fn feed(&self, filter: &QuestionFilter) -> StoreResult<Vec<AggregatedResult>> {
        let questions = self
            .deadline
            .run(self.store.list_questions(filter))
            .await?;
        tracing::debug!(?filter, count = questions.len(), "Loaded feed questions");
        self.aggregate(questions).await
    }

    pub async fn hot_questions(&self, limit: i64) -> StoreResult<Vec<AggregatedResult>> {
        self.feed(&QuestionFilter::Recent { limit }).await
    }

    pub async fn topic_feed(&self, path: &str, limit: i64) -> StoreResult<Vec<AggregatedResult>> {
        self.feed(&QuestionFilter::Topic {
            path: path.to_string(),
            limit,
        })
        .await
    }

    pub async fn user_questions(&self, uid: UserId) -> StoreResult<Vec<AggregatedResult>> {
        self.feed(&QuestionFilter::Author { uid }).await
    }

    /// A single question with its resolved answers.
    pub async fn question_post(&self, qid: DbId) -> Result<AggregatedResult, CoreError> {
        let question = self
            .deadline
            .run(self.store.find_question(qid))
            .await?
            .ok_or_else(|| CoreError::question_not_found(qid))?;
        let set = resolve(self.store.as_ref(), self.deadline, qid).await?;
        Ok(AggregatedResult {
            question,
            answers: set.answers,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use assert_matches::assert_matches;

    use super::*;
    use crate::error::StoreError;
    use crate::memory::MemoryStore;
    use crate::models::{BestAnswer, NewAnswer, NewQuestion, NewUser};

    struct Fixture {
        store: Arc<MemoryStore>,
        asker: UserId,
    }

    impl Fixture {
        async fn new() -> Self {
            let store = Arc::new(MemoryStore::new());
            let asker = store
                .create_user(&NewUser {
                    username: "asker".into(),
                })
                .await
                .unwrap()
                .uid;
            Self { store, asker }
        }

        fn aggregator(&self) -> Aggregator {
            Aggregator::new(self.store.clone(), Deadline::default())
        }

        async fn user(&self, name: &str) -> UserId {
            self.store
                .create_user(&NewUser {
                    username: name.into(),
                })
                .await
                .unwrap()
                .uid
        }

        async fn question(&self, title: &str) -> Question {
            self.store
                .create_question(&NewQuestion {
                    uid: self.asker,
                    title: title.into(),
                    body: "details".into(),
                    topic: "Bio".into(),
                })
                .await
                .unwrap()
        }

        async fn answer(&self, qid: DbId, uid: UserId) {
            self.store
                .create_answer(&NewAnswer {
                    qid,
                    uid,
                    body: "an answer".into(),
                })
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn empty_batch_yields_empty_result() {
        let fx = Fixture::new().await;
        let results = fx.aggregator().aggregate(Vec::new()).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn feed_scenario_attaches_answers_per_question() {
        let fx = Fixture::new().await;
        let u1 = fx.user("u1").await;
        let q1 = fx.question("first").await;
        let q2 = fx.question("second").await;
        fx.answer(q1.qid, u1).await;

        let results = fx
            .aggregator()
            .aggregate(vec![q1.clone(), q2.clone()])
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].question.qid, q1.qid);
        assert_eq!(results[0].answers.len(), 1);
        assert!(!results[0].answers[0].best_answer);
        assert_eq!(results[1].question.qid, q2.qid);
        assert!(results[1].answers.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn output_order_matches_input_order_despite_completion_order() {
        let fx = Fixture::new().await;
        let mut questions = Vec::new();
        for i in 0..5u64 {
            let q = fx.question(&format!("q{i}")).await;
            // Earlier questions finish last.
            fx.store
                .delay_answers(q.qid, Duration::from_millis(100 * (5 - i)))
                .await;
            questions.push(q);
        }

        let expected: Vec<DbId> = questions.iter().map(|q| q.qid).collect();
        let results = fx.aggregator().aggregate(questions).await.unwrap();
        let got: Vec<DbId> = results.iter().map(|r| r.question.qid).collect();
        assert_eq!(got, expected);
    }

    #[tokio::test(start_paused = true)]
    async fn resolutions_run_concurrently() {
        let fx = Fixture::new().await;
        let mut questions = Vec::new();
        for i in 0..4 {
            let q = fx.question(&format!("q{i}")).await;
            fx.store.delay_answers(q.qid, Duration::from_secs(1)).await;
            questions.push(q);
        }

        let start = tokio::time::Instant::now();
        fx.aggregator().aggregate(questions).await.unwrap();
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn one_failure_fails_the_whole_batch() {
        let fx = Fixture::new().await;
        let q1 = fx.question("ok").await;
        let q2 = fx.question("broken").await;
        fx.store.fail_answers(q2.qid).await;

        let err = fx.aggregator().aggregate(vec![q1, q2]).await.unwrap_err();
        assert_matches!(err, StoreError::Backend(_));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_store_call_times_out() {
        let fx = Fixture::new().await;
        let q = fx.question("slow").await;
        fx.store.delay_answers(q.qid, Duration::from_secs(60)).await;

        let aggregator = Aggregator::new(fx.store.clone(), Deadline(Duration::from_secs(1)));
        let err = aggregator.aggregate(vec![q]).await.unwrap_err();
        assert_matches!(err, StoreError::Timeout(_));
    }

    #[tokio::test]
    async fn every_input_question_appears_exactly_once() {
        let fx = Fixture::new().await;
        let u1 = fx.user("u1").await;
        let mut questions = Vec::new();
        for i in 0..8 {
            let q = fx.question(&format!("q{i}")).await;
            if i % 2 == 0 {
                fx.answer(q.qid, u1).await;
            }
            questions.push(q);
        }
        let results = fx.aggregator().aggregate(questions.clone()).await.unwrap();
        assert_eq!(results.len(), questions.len());
        for (q, r) in questions.iter().zip(&results) {
            assert_eq!(q, &r.question);
        }
    }

    #[tokio::test]
    async fn question_post_flags_best_answer() {
        let fx = Fixture::new().await;
        let (u1, u2) = (fx.user("u1").await, fx.user("u2").await);
        let q = fx.question("post").await;
        fx.answer(q.qid, u1).await;
        fx.answer(q.qid, u2).await;
        fx.store
            .upsert_best_answer(&BestAnswer { qid: q.qid, uid: u2 })
            .await
            .unwrap();

        let post = fx.aggregator().question_post(q.qid).await.unwrap();
        let flags: Vec<(UserId, bool)> = post
            .answers
            .iter()
            .map(|a| (a.answer.uid, a.best_answer))
            .collect();
        assert!(flags.contains(&(u1, false)));
        assert!(flags.contains(&(u2, true)));
    }

    #[tokio::test]
    async fn dangling_best_answer_does_not_fail_the_post() {
        let fx = Fixture::new().await;
        let u1 = fx.user("u1").await;
        let q = fx.question("post").await;
        fx.answer(q.qid, u1).await;
        fx.store
            .force_best_answer(BestAnswer {
                qid: q.qid,
                uid: UserId::new_v4(),
            })
            .await;

        let post = fx.aggregator().question_post(q.qid).await.unwrap();
        assert_eq!(post.answers.len(), 1);
        assert!(post.answers.iter().all(|a| !a.best_answer));
    }

    #[tokio::test]
    async fn missing_question_post_is_not_found() {
        let fx = Fixture::new().await;
        let err = fx.aggregator().question_post(404).await.unwrap_err();
        assert_matches!(err, CoreError::NotFound { entity: "Question", .. });
    }

    #[tokio::test]
    async fn user_questions_only_include_that_author() {
        let fx = Fixture::new().await;
        let other = fx.user("other").await;
        fx.question("mine").await;
        fx.store
            .create_question(&NewQuestion {
                uid: other,
                title: "theirs".into(),
                body: "b".into(),
                topic: "Bio".into(),
            })
            .await
            .unwrap();

        let results = fx.aggregator().user_questions(other).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].question.title, "theirs");
    }
}
