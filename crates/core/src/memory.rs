//! In-memory [`QaStore`] used by tests and `QANDA_STORE=memory` runs.
//!
//! Mirrors the constraints of the PostgreSQL schema: foreign keys surface as
//! [`StoreError::Constraint`] and uniqueness as [`StoreError::Conflict`].
//! Also supports per-question latency and failure injection on answer reads
//! so the fan-out paths can be exercised deterministically.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::{
    Answer, AnswerKey, BestAnswer, KarmaVote, NewAnswer, NewQuestion, NewUser, Question,
    QuestionFilter, Topic, User, Vote,
};
use crate::search::SearchQuery;
use crate::store::{QaStore, StoreResult};
use crate::types::{DbId, UserId};

#[derive(Default)]
struct Tables {
    last_qid: DbId,
    questions: BTreeMap<DbId, Question>,
    answers: BTreeMap<DbId, Vec<Answer>>,
    best_answers: HashMap<DbId, UserId>,
    karma: HashMap<(AnswerKey, UserId), Vote>,
    users: HashMap<UserId, User>,
    topics: BTreeSet<String>,
}

#[derive(Default)]
struct Faults {
    answer_latency: HashMap<DbId, Duration>,
    failing_answers: HashSet<DbId>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    faults: RwLock<Faults>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every answer read for `qid` by `latency`.
    pub async fn delay_answers(&self, qid: DbId, latency: Duration) {
        self.faults.write().await.answer_latency.insert(qid, latency);
    }

    /// Make every answer read for `qid` fail with a backend error.
    pub async fn fail_answers(&self, qid: DbId) {
        self.faults.write().await.failing_answers.insert(qid);
    }

    /// Add a path to the topic catalogue.
    pub async fn add_topic(&self, path: &str) {
        self.tables.write().await.topics.insert(path.to_string());
    }

    /// Store a best-answer row without checking that the user exists.
    ///
    /// Lets tests reproduce rows that outlived the answer they point at.
    pub async fn force_best_answer(&self, best: BestAnswer) {
        self.tables
            .write()
            .await
            .best_answers
            .insert(best.qid, best.uid);
    }
}

fn missing(what: &str, id: impl std::fmt::Display) -> StoreError {
    StoreError::Constraint(format!("{what} {id} does not exist"))
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Common English stop words, a subset of PostgreSQL's `english` list.
/// Ranked terms in this list are ignored, as `to_tsquery('english', ..)`
/// drops them.
const STOP_WORDS: &[&str] = &[
    "a", "about", "after", "all", "an", "and", "any", "are", "as", "at", "be", "because",
    "been", "before", "but", "by", "can", "did", "do", "does", "for", "from", "had", "has",
    "have", "he", "her", "his", "how", "i", "if", "in", "into", "is", "it", "its", "me", "my",
    "no", "not", "of", "on", "or", "our", "she", "so", "than", "that", "the", "their", "them",
    "then", "there", "these", "they", "this", "to", "was", "we", "were", "what", "when",
    "where", "which", "who", "why", "will", "with", "you", "your",
];

/// Share of tokens matching any term, or `None` unless every non-stop-word
/// term occurs. A query made only of stop words matches nothing.
fn rank_text(text: &str, terms: &[String]) -> Option<f32> {
    let terms: Vec<&String> = terms
        .iter()
        .filter(|t| !STOP_WORDS.contains(&t.as_str()))
        .collect();
    let tokens = tokenize(text);
    if terms.is_empty() || tokens.is_empty() || !terms.iter().all(|t| tokens.contains(*t)) {
        return None;
    }
    let hits = tokens.iter().filter(|tok| terms.contains(tok)).count();
    Some(hits as f32 / tokens.len() as f32)
}

/// Newest first, like the feed queries.
fn newest_first(questions: &mut [Question]) {
    questions.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.qid.cmp(&a.qid)));
}

#[async_trait]
impl QaStore for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn create_question(&self, input: &NewQuestion) -> StoreResult<Question> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&input.uid) {
            return Err(missing("user", input.uid));
        }
        tables.last_qid += 1;
        let question = Question {
            qid: tables.last_qid,
            uid: input.uid,
            title: input.title.clone(),
            body: input.body.clone(),
            topic: input.topic.clone(),
            created_at: Utc::now(),
        };
        tables.topics.insert(question.topic.clone());
        tables.questions.insert(question.qid, question.clone());
        Ok(question)
    }

    async fn find_question(&self, qid: DbId) -> StoreResult<Option<Question>> {
        Ok(self.tables.read().await.questions.get(&qid).cloned())
    }

    async fn list_questions(&self, filter: &QuestionFilter) -> StoreResult<Vec<Question>> {
        let tables = self.tables.read().await;
        let mut questions: Vec<Question> = tables
            .questions
            .values()
            .filter(|q| match filter {
                QuestionFilter::Recent { .. } => true,
                QuestionFilter::Topic { path, .. } => q.topic.contains(path.as_str()),
                QuestionFilter::Author { uid } => q.uid == *uid,
            })
            .cloned()
            .collect();
        newest_first(&mut questions);
        match filter {
            QuestionFilter::Recent { limit } | QuestionFilter::Topic { limit, .. } => {
                questions.truncate((*limit).max(0) as usize);
            }
            QuestionFilter::Author { .. } => {}
        }
        Ok(questions)
    }

    async fn search_questions(&self, query: &SearchQuery) -> StoreResult<Vec<Question>> {
        let tables = self.tables.read().await;
        match query {
            SearchQuery::QuestionText { needle } => {
                let needle = needle.to_lowercase();
                let mut hits: Vec<Question> = tables
                    .questions
                    .values()
                    .filter(|q| {
                        contains_ci(&q.title, &needle)
                            || contains_ci(&q.body, &needle)
                            || contains_ci(&q.topic, &needle)
                    })
                    .cloned()
                    .collect();
                newest_first(&mut hits);
                Ok(hits)
            }
            SearchQuery::AnswerText { needle, limit } => {
                let needle = needle.to_lowercase();
                let mut hits: Vec<Question> = tables
                    .questions
                    .values()
                    .filter(|q| {
                        tables.answers.get(&q.qid).is_some_and(|answers| {
                            answers.iter().any(|a| contains_ci(&a.body, &needle))
                        })
                    })
                    .cloned()
                    .collect();
                newest_first(&mut hits);
                hits.truncate((*limit).max(0) as usize);
                Ok(hits)
            }
            SearchQuery::Ranked { terms, topic } => {
                let mut ranked: Vec<(f32, Question)> = tables
                    .questions
                    .values()
                    .filter(|q| topic.as_deref().map_or(true, |t| q.topic == t))
                    .filter_map(|q| {
                        let base = format!("{} {}", q.title, q.body);
                        let answers = tables.answers.get(&q.qid).map(Vec::as_slice).unwrap_or(&[]);
                        let best = if answers.is_empty() {
                            rank_text(&base, terms)
                        } else {
                            answers
                                .iter()
                                .filter_map(|a| rank_text(&format!("{base} {}", a.body), terms))
                                .fold(None, |acc: Option<f32>, r| Some(acc.map_or(r, |m| m.max(r))))
                        };
                        best.map(|rank| (rank, q.clone()))
                    })
                    .collect();
                ranked.sort_by(|(ra, qa), (rb, qb)| {
                    rb.partial_cmp(ra)
                        .unwrap_or(std::cmp::Ordering::Equal)
                        .then(qa.qid.cmp(&qb.qid))
                });
                Ok(ranked.into_iter().map(|(_, q)| q).collect())
            }
        }
    }

    async fn create_answer(&self, input: &NewAnswer) -> StoreResult<Answer> {
        let mut tables = self.tables.write().await;
        if !tables.questions.contains_key(&input.qid) {
            return Err(missing("question", input.qid));
        }
        if !tables.users.contains_key(&input.uid) {
            return Err(missing("user", input.uid));
        }
        let answers = tables.answers.entry(input.qid).or_default();
        if answers.iter().any(|a| a.uid == input.uid) {
            return Err(StoreError::Conflict(format!(
                "user {} already answered question {}",
                input.uid, input.qid
            )));
        }
        let answer = Answer {
            qid: input.qid,
            uid: input.uid,
            body: input.body.clone(),
            created_at: Utc::now(),
        };
        answers.push(answer.clone());
        Ok(answer)
    }

    async fn list_answers(&self, qid: DbId) -> StoreResult<Vec<Answer>> {
        let (latency, failing) = {
            let faults = self.faults.read().await;
            (
                faults.answer_latency.get(&qid).copied(),
                faults.failing_answers.contains(&qid),
            )
        };
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        if failing {
            return Err(StoreError::Backend(format!(
                "injected answer read failure for question {qid}"
            )));
        }

        let mut answers = self
            .tables
            .read()
            .await
            .answers
            .get(&qid)
            .cloned()
            .unwrap_or_default();
        answers.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.uid.cmp(&b.uid)));
        Ok(answers)
    }

    async fn find_best_answer(&self, qid: DbId) -> StoreResult<Option<BestAnswer>> {
        Ok(self
            .tables
            .read()
            .await
            .best_answers
            .get(&qid)
            .map(|&uid| BestAnswer { qid, uid }))
    }

    async fn upsert_best_answer(&self, best: &BestAnswer) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.questions.contains_key(&best.qid) {
            return Err(missing("question", best.qid));
        }
        if !tables.users.contains_key(&best.uid) {
            return Err(missing("user", best.uid));
        }
        tables.best_answers.insert(best.qid, best.uid);
        Ok(())
    }

    async fn upsert_vote(&self, vote: &KarmaVote) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let answer_exists = tables
            .answers
            .get(&vote.qid)
            .is_some_and(|answers| answers.iter().any(|a| a.uid == vote.uid));
        if !answer_exists {
            return Err(missing("answer", format!("({}, {})", vote.qid, vote.uid)));
        }
        if !tables.users.contains_key(&vote.voter_uid) {
            return Err(missing("user", vote.voter_uid));
        }
        tables.karma.insert((vote.answer(), vote.voter_uid), vote.vote);
        Ok(())
    }

    async fn find_vote(&self, answer: AnswerKey, voter_uid: UserId) -> StoreResult<Option<Vote>> {
        Ok(self
            .tables
            .read()
            .await
            .karma
            .get(&(answer, voter_uid))
            .copied())
    }

    async fn sum_votes(&self, answer: AnswerKey) -> StoreResult<i64> {
        Ok(self
            .tables
            .read()
            .await
            .karma
            .iter()
            .filter(|((key, _), _)| *key == answer)
            .map(|(_, vote)| i64::from(vote.value()))
            .sum())
    }

    async fn create_user(&self, input: &NewUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == input.username) {
            return Err(StoreError::Conflict(format!(
                "username '{}' is taken",
                input.username
            )));
        }
        let user = User {
            uid: UserId::new_v4(),
            username: input.username.clone(),
            bio: String::new(),
            created_at: Utc::now(),
        };
        tables.users.insert(user.uid, user.clone());
        Ok(user)
    }

    async fn find_user(&self, uid: UserId) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&uid).cloned())
    }

    async fn update_bio(&self, uid: UserId, bio: &str) -> StoreResult<Option<User>> {
        let mut tables = self.tables.write().await;
        Ok(tables.users.get_mut(&uid).map(|user| {
            user.bio = bio.to_string();
            user.clone()
        }))
    }

    async fn list_topics(&self) -> StoreResult<Vec<Topic>> {
        Ok(self
            .tables
            .read()
            .await
            .topics
            .iter()
            .map(|path| Topic {
                topic_path: path.clone(),
            })
            .collect())
    }
}
