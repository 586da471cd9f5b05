//! Karma ledger: one replaceable vote per voter per answer, summed into a
//! score.

use crate::models::{AnswerKey, KarmaVote};
use crate::store::{Deadline, SharedStore, StoreResult};
use crate::types::UserId;

#[derive(Clone)]
pub struct KarmaLedger {
    store: SharedStore,
    deadline: Deadline,
}

impl KarmaLedger {
    pub fn new(store: SharedStore, deadline: Deadline) -> Self {
        Self { store, deadline }
    }

    /// Record `vote`, replacing any earlier vote by the same voter on the
    /// same answer. Casting the same vote twice is a no-op.
    ///
    /// Self-votes are not rejected here.
    pub async fn cast_vote(&self, vote: KarmaVote) -> StoreResult<()> {
        self.deadline.run(self.store.upsert_vote(&vote)).await?;
        tracing::info!(
            qid = vote.qid,
            uid = %vote.uid,
            voter_uid = %vote.voter_uid,
            vote = vote.vote.value(),
            "Karma vote recorded",
        );
        Ok(())
    }

    /// The voter's current vote on the answer, or `0` if they have not voted.
    pub async fn vote_by_voter(&self, answer: AnswerKey, voter_uid: UserId) -> StoreResult<i32> {
        let vote = self
            .deadline
            .run(self.store.find_vote(answer, voter_uid))
            .await?;
        Ok(vote.map_or(0, |v| v.value()))
    }

    /// Unweighted sum of all votes on the answer, `0` when there are none.
    pub async fn score(&self, answer: AnswerKey) -> StoreResult<i64> {
        self.deadline.run(self.store.sum_votes(answer)).await
    }
}
