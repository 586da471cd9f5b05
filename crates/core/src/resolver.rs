//! Answer-set resolution for a single question.

use crate::models::{Answer, AnswerSet, BestAnswer, ResolvedAnswer};
use crate::store::{Deadline, QaStore, StoreResult};
use crate::types::DbId;

/// Fetch the answers and best-answer designation for `qid`.
///
/// The two reads run concurrently; the flag is applied once both finish.
pub async fn resolve(store: &dyn QaStore, deadline: Deadline, qid: DbId) -> StoreResult<AnswerSet> {
    let (answers, best) = tokio::try_join!(
        deadline.run(store.list_answers(qid)),
        deadline.run(store.find_best_answer(qid)),
    )?;
    Ok(apply_best_answer(answers, best))
}

/// Flag the answer written by the best-answer author, if there is one.
///
/// A best-answer row naming a user with no answer on the question is a soft
/// inconsistency: it is ignored and no answer is flagged.
pub fn apply_best_answer(answers: Vec<Answer>, best: Option<BestAnswer>) -> AnswerSet {
    let best_uid = best.map(|b| b.uid);
    let matched = best_uid.is_some_and(|uid| answers.iter().any(|a| a.uid == uid));

    if let (Some(best), false) = (best, matched) {
        tracing::debug!(
            qid = best.qid,
            uid = %best.uid,
            "Best answer references a user with no answer, leaving all answers unflagged",
        );
    }

    let answers = answers
        .into_iter()
        .map(|answer| {
            let best_answer = matched && Some(answer.uid) == best_uid;
            ResolvedAnswer {
                answer,
                best_answer,
            }
        })
        .collect();

    AnswerSet {
        answers,
        best_answer_uid: if matched { best_uid } else { None },
    }
}
