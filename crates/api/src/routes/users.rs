use axum::routing::{get, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// User routes mounted at `/users`.
///
/// ```text
/// GET /{uid}             -> get_user
/// PUT /{uid}/bio         -> update_bio
/// GET /{uid}/questions   -> user_questions
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{uid}", get(users::get_user))
        .route("/{uid}/bio", put(users::update_bio))
        .route("/{uid}/questions", get(users::user_questions))
}
