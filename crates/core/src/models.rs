//! Typed records exchanged with the store and returned to callers.
//!
//! Store implementations validate raw rows into these structs at the
//! boundary, so nothing past the store sees an untyped row.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp, UserId};

// ---------------------------------------------------------------------------
// Questions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub qid: DbId,
    pub uid: UserId,
    pub title: String,
    pub body: String,
    pub topic: String,
    pub created_at: Timestamp,
}

/// DTO for asking a new question.
#[derive(Debug, Clone, Deserialize)]
pub struct NewQuestion {
    pub uid: UserId,
    pub title: String,
    pub body: String,
    pub topic: String,
}

/// Which batch of questions a feed reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionFilter {
    /// Most recent questions across all topics.
    Recent { limit: i64 },
    /// Most recent questions whose topic contains `path`.
    Topic { path: String, limit: i64 },
    /// Every question asked by one user.
    Author { uid: UserId },
}

// ---------------------------------------------------------------------------
// Answers
// ---------------------------------------------------------------------------

/// An answer is identified by its question and its author: one answer per
/// user per question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnswerKey {
    pub qid: DbId,
    pub uid: UserId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub qid: DbId,
    pub uid: UserId,
    pub body: String,
    pub created_at: Timestamp,
}

impl Answer {
    pub fn key(&self) -> AnswerKey {
        AnswerKey {
            qid: self.qid,
            uid: self.uid,
        }
    }
}

/// DTO for posting an answer to a question.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAnswer {
    pub qid: DbId,
    pub uid: UserId,
    pub body: String,
}

/// The accepted answer for a question. At most one row per `qid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestAnswer {
    pub qid: DbId,
    pub uid: UserId,
}

/// An answer as returned to clients, carrying the best-answer flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedAnswer {
    #[serde(flatten)]
    pub answer: Answer,
    pub best_answer: bool,
}

/// Output of answer-set resolution for a single question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerSet {
    pub answers: Vec<ResolvedAnswer>,
    pub best_answer_uid: Option<UserId>,
}

/// A question joined to its full, flagged answer list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedResult {
    pub question: Question,
    pub answers: Vec<ResolvedAnswer>,
}

// ---------------------------------------------------------------------------
// Karma
// ---------------------------------------------------------------------------

/// A single up or down vote. There is no neutral vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Vote {
    Up,
    Down,
}

impl Vote {
    pub fn value(self) -> i32 {
        match self {
            Vote::Up => 1,
            Vote::Down => -1,
        }
    }
}

impl TryFrom<i32> for Vote {
    type Error = CoreError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Vote::Up),
            -1 => Ok(Vote::Down),
            other => Err(CoreError::Validation(format!(
                "vote must be 1 or -1, got {other}"
            ))),
        }
    }
}

impl From<Vote> for i32 {
    fn from(vote: Vote) -> Self {
        vote.value()
    }
}

/// A vote cast by `voter_uid` on the answer `(qid, uid)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KarmaVote {
    pub qid: DbId,
    pub uid: UserId,
    pub voter_uid: UserId,
    pub vote: Vote,
}

impl KarmaVote {
    pub fn answer(&self) -> AnswerKey {
        AnswerKey {
            qid: self.qid,
            uid: self.uid,
        }
    }
}

// ---------------------------------------------------------------------------
// Users & topics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub uid: UserId,
    pub username: String,
    pub bio: String,
    pub created_at: Timestamp,
}

/// DTO for registering a user profile.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub topic_path: String,
}
