//! Handlers for karma votes on answers.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use qanda_core::models::{AnswerKey, KarmaVote, Vote};
use qanda_core::types::{DbId, UserId};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT .../votes`. `vote` must be `1` or `-1`.
#[derive(Debug, Deserialize)]
pub struct VoteInput {
    pub voter_uid: UserId,
    pub vote: Vote,
}

#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub qid: DbId,
    pub uid: UserId,
    pub voter_uid: UserId,
    pub vote: i32,
}

#[derive(Debug, Serialize)]
pub struct KarmaResponse {
    pub qid: DbId,
    pub uid: UserId,
    pub karma: i64,
}

/// PUT /api/v1/questions/{qid}/answers/{uid}/votes
///
/// Records the voter's vote, replacing an earlier one. Responds with the
/// answer's updated score.
pub async fn cast_vote(
    State(state): State<AppState>,
    Path((qid, uid)): Path<(DbId, UserId)>,
    Json(input): Json<VoteInput>,
) -> AppResult<impl IntoResponse> {
    let vote = KarmaVote {
        qid,
        uid,
        voter_uid: input.voter_uid,
        vote: input.vote,
    };
    state.karma.cast_vote(vote).await?;
    let karma = state.karma.score(vote.answer()).await?;

    Ok(Json(DataResponse {
        data: KarmaResponse { qid, uid, karma },
    }))
}

/// GET /api/v1/questions/{qid}/answers/{uid}/votes/{voter_uid}
///
/// `vote` is `0` when the voter has not voted on this answer.
pub async fn get_vote(
    State(state): State<AppState>,
    Path((qid, uid, voter_uid)): Path<(DbId, UserId, UserId)>,
) -> AppResult<impl IntoResponse> {
    let vote = state
        .karma
        .vote_by_voter(AnswerKey { qid, uid }, voter_uid)
        .await?;

    Ok(Json(DataResponse {
        data: VoteResponse {
            qid,
            uid,
            voter_uid,
            vote,
        },
    }))
}

/// GET /api/v1/questions/{qid}/answers/{uid}/karma
pub async fn get_karma(
    State(state): State<AppState>,
    Path((qid, uid)): Path<(DbId, UserId)>,
) -> AppResult<impl IntoResponse> {
    let karma = state.karma.score(AnswerKey { qid, uid }).await?;

    Ok(Json(DataResponse {
        data: KarmaResponse { qid, uid, karma },
    }))
}
