//! Handlers for user profiles.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use qanda_core::error::CoreError;
use qanda_core::types::UserId;
use qanda_core::validation::validate_bio;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateBio {
    pub bio: String,
}

fn user_not_found(uid: UserId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "User",
        id: uid.to_string(),
    })
}

/// GET /api/v1/users/{uid}
pub async fn get_user(
    State(state): State<AppState>,
    Path(uid): Path<UserId>,
) -> AppResult<impl IntoResponse> {
    let user = state
        .deadline
        .run(state.store.find_user(uid))
        .await?
        .ok_or_else(|| user_not_found(uid))?;

    Ok(Json(DataResponse { data: user }))
}

/// PUT /api/v1/users/{uid}/bio
///
/// Surrounding whitespace is trimmed before the bio is stored.
pub async fn update_bio(
    State(state): State<AppState>,
    Path(uid): Path<UserId>,
    Json(input): Json<UpdateBio>,
) -> AppResult<impl IntoResponse> {
    let bio = input.bio.trim();
    validate_bio(bio)?;

    let user = state
        .deadline
        .run(state.store.update_bio(uid, bio))
        .await?
        .ok_or_else(|| user_not_found(uid))?;

    tracing::info!(uid = %uid, "User bio updated");

    Ok(Json(DataResponse { data: user }))
}

/// GET /api/v1/users/{uid}/questions
///
/// Every question the user asked, newest first, with answers attached.
pub async fn user_questions(
    State(state): State<AppState>,
    Path(uid): Path<UserId>,
) -> AppResult<impl IntoResponse> {
    let results = state.aggregator.user_questions(uid).await?;

    Ok(Json(DataResponse { data: results }))
}
