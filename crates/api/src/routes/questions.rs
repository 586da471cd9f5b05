//! Route definitions for questions, answers, and karma.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{karma, questions};
use crate::state::AppState;

/// Question routes mounted at `/questions`.
///
/// ```text
/// POST   /                                         -> ask_question
/// GET    /{qid}                                    -> question_post
/// POST   /{qid}/answers                            -> post_answer
/// PUT    /{qid}/best-answer                        -> set_best_answer
/// PUT    /{qid}/answers/{uid}/votes                -> cast_vote
/// GET    /{qid}/answers/{uid}/votes/{voter_uid}    -> get_vote
/// GET    /{qid}/answers/{uid}/karma                -> get_karma
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(questions::ask_question))
        .route("/{qid}", get(questions::question_post))
        .route("/{qid}/answers", post(questions::post_answer))
        .route("/{qid}/best-answer", put(questions::set_best_answer))
        .route("/{qid}/answers/{uid}/votes", put(karma::cast_vote))
        .route(
            "/{qid}/answers/{uid}/votes/{voter_uid}",
            get(karma::get_vote),
        )
        .route("/{qid}/answers/{uid}/karma", get(karma::get_karma))
}
