use axum::routing::get;
use axum::Router;

use crate::handlers::feed;
use crate::state::AppState;

/// Feed routes mounted at `/feed`.
///
/// ```text
/// GET /                      -> hot_feed
/// GET /topics/{topic_path}   -> topic_feed
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(feed::hot_feed))
        .route("/topics/{topic_path}", get(feed::topic_feed))
}
