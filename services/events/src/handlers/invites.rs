use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::types::InviteCode;
use crate::error::EventsServiceError;
use crate::handlers::extract::ApiPath;
use crate::identity::Viewer;
use crate::state::AppState;
use crate::usecase::invite::{IssueInviteCodeUseCase, ListInviteCodesUseCase};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteCodeResponse {
    pub id: Uuid,
    pub code: String,
    pub event_id: Uuid,
    pub is_used: bool,
    #[serde(serialize_with = "ovation_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<InviteCode> for InviteCodeResponse {
    fn from(i: InviteCode) -> Self {
        Self {
            id: i.id,
            code: i.code,
            event_id: i.event_id,
            is_used: i.is_used,
            created_at: i.created_at,
        }
    }
}

// ── POST /events/{event_id}/invite-codes ─────────────────────────────────────

pub async fn issue_invite_code(
    viewer: Viewer,
    State(state): State<AppState>,
    ApiPath(event_id): ApiPath<Uuid>,
) -> Result<(StatusCode, Json<InviteCodeResponse>), EventsServiceError> {
    viewer.require_admin()?;
    let uc = IssueInviteCodeUseCase {
        events: state.event_repo(),
        invites: state.invite_repo(),
    };
    let invite = uc.execute(event_id).await?;
    Ok((StatusCode::CREATED, Json(invite.into())))
}

// ── GET /events/{event_id}/invite-codes ──────────────────────────────────────

pub async fn list_invite_codes(
    viewer: Viewer,
    State(state): State<AppState>,
    ApiPath(event_id): ApiPath<Uuid>,
) -> Result<Json<Vec<InviteCodeResponse>>, EventsServiceError> {
    viewer.require_admin()?;
    let uc = ListInviteCodesUseCase {
        events: state.event_repo(),
        invites: state.invite_repo(),
    };
    let invites = uc.execute(event_id).await?;
    Ok(Json(invites.into_iter().map(InviteCodeResponse::from).collect()))
}
