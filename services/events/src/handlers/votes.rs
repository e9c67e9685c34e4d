use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EventsServiceError;
use crate::handlers::extract::{ApiJson, ApiPath};
use crate::state::AppState;
use crate::usecase::vote::{SubmitVoteInput, SubmitVoteUseCase};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitVoteRequest {
    pub nominee_id: Uuid,
    pub voter_phone: String,
    pub voter_name: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitVoteResponse {
    pub vote_id: Uuid,
}

// ── POST /categories/{category_id}/votes ─────────────────────────────────────

pub async fn submit_vote(
    State(state): State<AppState>,
    ApiPath(category_id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<SubmitVoteRequest>,
) -> Result<(StatusCode, Json<SubmitVoteResponse>), EventsServiceError> {
    let uc = SubmitVoteUseCase {
        categories: state.category_repo(),
        candidates: state.candidate_directory(),
        votes: state.vote_repo(),
    };
    let vote_id = uc
        .execute(SubmitVoteInput {
            category_id,
            nominee_id: body.nominee_id,
            voter_phone: body.voter_phone,
            voter_name: body.voter_name,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(SubmitVoteResponse { vote_id })))
}
