use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::query::SearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/search?q=&scope=
///
/// `scope` is one of `questions`, `answers`, or `all` (default).
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let results = state.search.search(&params.q, params.scope).await?;

    Ok(Json(DataResponse { data: results }))
}
