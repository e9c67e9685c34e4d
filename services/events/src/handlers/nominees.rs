use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::Nominee;
use crate::error::EventsServiceError;
use crate::handlers::extract::{ApiJson, ApiPath, ApiQuery};
use crate::identity::Viewer;
use crate::state::AppState;
use crate::usecase::nominee::{
    CreateNomineeInput, CreateNomineeUseCase, DeleteNomineeUseCase, ListNomineesUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NomineeResponse {
    pub id: Uuid,
    pub award_event_id: Uuid,
    pub category_id: Option<Uuid>,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub position: i32,
    #[serde(serialize_with = "ovation_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Nominee> for NomineeResponse {
    fn from(n: Nominee) -> Self {
        Self {
            id: n.id,
            award_event_id: n.award_event_id,
            category_id: n.category_id,
            name: n.name,
            description: n.description,
            image_url: n.image_url,
            position: n.position,
            created_at: n.created_at,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNomineeRequest {
    pub category_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub position: i32,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NomineeListQuery {
    pub category_id: Option<Uuid>,
}

// ── POST /award-events/{award_event_id}/nominees ─────────────────────────────

pub async fn create_nominee(
    viewer: Viewer,
    State(state): State<AppState>,
    ApiPath(award_event_id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<CreateNomineeRequest>,
) -> Result<(StatusCode, Json<NomineeResponse>), EventsServiceError> {
    viewer.require_admin()?;
    let uc = CreateNomineeUseCase {
        award_events: state.award_event_repo(),
        categories: state.category_repo(),
        nominees: state.nominee_repo(),
    };
    let nominee = uc
        .execute(
            award_event_id,
            CreateNomineeInput {
                category_id: body.category_id,
                name: body.name,
                description: body.description,
                image_url: body.image_url,
                position: body.position,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(nominee.into())))
}

// ── GET /award-events/{award_event_id}/nominees ──────────────────────────────

pub async fn list_nominees(
    State(state): State<AppState>,
    ApiPath(award_event_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<NomineeListQuery>,
) -> Result<Json<Vec<NomineeResponse>>, EventsServiceError> {
    let uc = ListNomineesUseCase {
        nominees: state.nominee_repo(),
    };
    let nominees = uc.execute(award_event_id, query.category_id).await?;
    Ok(Json(nominees.into_iter().map(NomineeResponse::from).collect()))
}

// ── DELETE /nominees/{nominee_id} ────────────────────────────────────────────

pub async fn delete_nominee(
    viewer: Viewer,
    State(state): State<AppState>,
    ApiPath(nominee_id): ApiPath<Uuid>,
) -> Result<StatusCode, EventsServiceError> {
    viewer.require_admin()?;
    let uc = DeleteNomineeUseCase {
        nominees: state.nominee_repo(),
    };
    uc.execute(nominee_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
