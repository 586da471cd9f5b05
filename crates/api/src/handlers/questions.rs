//! Handlers for questions, answers, and best-answer designation.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use qanda_core::error::CoreError;
use qanda_core::models::{BestAnswer, NewAnswer, NewQuestion, Question};
use qanda_core::types::{DbId, UserId};
use qanda_core::validation::{validate_new_answer, validate_new_question};
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /questions/{qid}/answers`.
#[derive(Debug, Deserialize)]
pub struct AnswerInput {
    pub uid: UserId,
    pub body: String,
}

/// Request body for `PUT /questions/{qid}/best-answer`.
#[derive(Debug, Deserialize)]
pub struct BestAnswerInput {
    pub uid: UserId,
}

async fn require_question(state: &AppState, qid: DbId) -> AppResult<Question> {
    let question = state
        .deadline
        .run(state.store.find_question(qid))
        .await?
        .ok_or_else(|| CoreError::question_not_found(qid))?;
    Ok(question)
}

// ---------------------------------------------------------------------------
// Questions
// ---------------------------------------------------------------------------

/// POST /api/v1/questions
pub async fn ask_question(
    State(state): State<AppState>,
    Json(input): Json<NewQuestion>,
) -> AppResult<impl IntoResponse> {
    validate_new_question(&input)?;
    let question = state
        .deadline
        .run(state.store.create_question(&input))
        .await?;

    tracing::info!(qid = question.qid, uid = %question.uid, topic = %question.topic, "Question asked");

    Ok((StatusCode::CREATED, Json(DataResponse { data: question })))
}

/// GET /api/v1/questions/{qid}
///
/// The question with its full answer list, best answer flagged.
pub async fn question_post(
    State(state): State<AppState>,
    Path(qid): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let post = state.aggregator.question_post(qid).await?;

    Ok(Json(DataResponse { data: post }))
}

// ---------------------------------------------------------------------------
// Answers
// ---------------------------------------------------------------------------

/// POST /api/v1/questions/{qid}/answers
///
/// A user may answer a question once; a second answer is a conflict.
pub async fn post_answer(
    State(state): State<AppState>,
    Path(qid): Path<DbId>,
    Json(input): Json<AnswerInput>,
) -> AppResult<impl IntoResponse> {
    let new_answer = NewAnswer {
        qid,
        uid: input.uid,
        body: input.body,
    };
    validate_new_answer(&new_answer)?;
    require_question(&state, qid).await?;

    let answer = state
        .deadline
        .run(state.store.create_answer(&new_answer))
        .await?;

    tracing::info!(qid, uid = %answer.uid, "Answer posted");

    Ok((StatusCode::CREATED, Json(DataResponse { data: answer })))
}

/// PUT /api/v1/questions/{qid}/best-answer
///
/// Replaces any earlier designation for the question.
pub async fn set_best_answer(
    State(state): State<AppState>,
    Path(qid): Path<DbId>,
    Json(input): Json<BestAnswerInput>,
) -> AppResult<impl IntoResponse> {
    require_question(&state, qid).await?;

    let best = BestAnswer {
        qid,
        uid: input.uid,
    };
    state
        .deadline
        .run(state.store.upsert_best_answer(&best))
        .await?;

    tracing::info!(qid, uid = %best.uid, "Best answer designated");

    Ok(Json(DataResponse { data: best }))
}
