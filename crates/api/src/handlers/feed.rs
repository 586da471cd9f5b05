//! Handlers for the question feeds.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use qanda_core::search::{clamp_limit, MAX_FEED_LIMIT};
use qanda_core::validation::validate_topic_path;

use crate::error::AppResult;
use crate::query::FeedParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/feed
///
/// The most recent questions across all topics, each with its answers.
pub async fn hot_feed(
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, state.config.feed_limit, MAX_FEED_LIMIT);
    let results = state.aggregator.hot_questions(limit).await?;

    Ok(Json(DataResponse { data: results }))
}

/// GET /api/v1/feed/topics/{topic_path}
///
/// The most recent questions whose topic contains `topic_path`.
pub async fn topic_feed(
    State(state): State<AppState>,
    Path(topic_path): Path<String>,
    Query(params): Query<FeedParams>,
) -> AppResult<impl IntoResponse> {
    validate_topic_path(&topic_path)?;
    let limit = clamp_limit(params.limit, state.config.feed_limit, MAX_FEED_LIMIT);
    let results = state.aggregator.topic_feed(&topic_path, limit).await?;

    Ok(Json(DataResponse { data: results }))
}
