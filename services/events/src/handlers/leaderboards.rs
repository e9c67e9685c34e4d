use axum::{
    Json,
    extract::State,
};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::types::{CategoryOwner, Leaderboard, LeaderboardEntry};
use crate::error::EventsServiceError;
use crate::handlers::extract::ApiPath;
use crate::identity::Viewer;
use crate::state::AppState;
use crate::usecase::leaderboard::{GetLeaderboardUseCase, GetOwnerLeaderboardsUseCase};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntryResponse {
    pub nominee_id: Uuid,
    pub nominee_name: String,
    pub vote_count: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    pub category_id: Uuid,
    pub category_name: String,
    pub total_votes: u64,
    pub results_visible: bool,
    pub leaderboard: Vec<LeaderboardEntryResponse>,
}

impl From<LeaderboardEntry> for LeaderboardEntryResponse {
    fn from(e: LeaderboardEntry) -> Self {
        Self {
            nominee_id: e.nominee_id,
            nominee_name: e.nominee_name,
            vote_count: e.vote_count,
        }
    }
}

impl From<Leaderboard> for LeaderboardResponse {
    fn from(b: Leaderboard) -> Self {
        Self {
            category_id: b.category_id,
            category_name: b.category_name,
            total_votes: b.total_votes,
            results_visible: b.results_visible,
            leaderboard: b.entries.into_iter().map(Into::into).collect(),
        }
    }
}

async fn owner_leaderboards(
    state: AppState,
    owner: CategoryOwner,
    admin_override: bool,
) -> Result<Json<Vec<LeaderboardResponse>>, EventsServiceError> {
    let uc = GetOwnerLeaderboardsUseCase {
        events: state.event_repo(),
        award_events: state.award_event_repo(),
        categories: state.category_repo(),
        candidates: state.candidate_directory(),
        votes: state.vote_repo(),
    };
    let boards = uc.execute(owner, admin_override).await?;
    Ok(Json(boards.into_iter().map(Into::into).collect()))
}

// ── GET /categories/{category_id}/leaderboard ────────────────────────────────

/// Organizers always see the ranking; the public only once results are shown.
pub async fn get_leaderboard(
    viewer: Viewer,
    State(state): State<AppState>,
    ApiPath(category_id): ApiPath<Uuid>,
) -> Result<Json<LeaderboardResponse>, EventsServiceError> {
    let uc = GetLeaderboardUseCase {
        categories: state.category_repo(),
        candidates: state.candidate_directory(),
        votes: state.vote_repo(),
    };
    let board = uc.execute(category_id, viewer.is_admin).await?;
    Ok(Json(board.into()))
}

// ── GET /events/{event_id}/leaderboards ──────────────────────────────────────

pub async fn get_event_leaderboards(
    viewer: Viewer,
    State(state): State<AppState>,
    ApiPath(event_id): ApiPath<Uuid>,
) -> Result<Json<Vec<LeaderboardResponse>>, EventsServiceError> {
    owner_leaderboards(state, CategoryOwner::Event(event_id), viewer.is_admin).await
}

// ── GET /award-events/{award_event_id}/leaderboards ──────────────────────────

pub async fn get_award_event_leaderboards(
    viewer: Viewer,
    State(state): State<AppState>,
    ApiPath(award_event_id): ApiPath<Uuid>,
) -> Result<Json<Vec<LeaderboardResponse>>, EventsServiceError> {
    owner_leaderboards(
        state,
        CategoryOwner::AwardEvent(award_event_id),
        viewer.is_admin,
    )
    .await
}
