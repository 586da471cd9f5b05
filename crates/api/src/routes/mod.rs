pub mod feed;
pub mod health;
pub mod questions;
pub mod users;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /feed                                              hot feed
/// /feed/topics/{topic_path}                          topic feed
///
/// /topics                                            topic catalogue
/// /search?q=&scope=                                  scoped search
///
/// /questions                                         ask (POST)
/// /questions/{qid}                                   question post
/// /questions/{qid}/answers                           answer (POST)
/// /questions/{qid}/best-answer                       designate best answer (PUT)
/// /questions/{qid}/answers/{uid}/votes               cast vote (PUT)
/// /questions/{qid}/answers/{uid}/votes/{voter_uid}   voter's vote
/// /questions/{qid}/answers/{uid}/karma               answer score
///
/// /users/{uid}                                       profile
/// /users/{uid}/bio                                   update bio (PUT)
/// /users/{uid}/questions                             user's questions
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/feed", feed::router())
        .route("/topics", get(handlers::topics::list_topics))
        .route("/search", get(handlers::search::search))
        .nest("/questions", questions::router())
        .nest("/users", users::router())
}
