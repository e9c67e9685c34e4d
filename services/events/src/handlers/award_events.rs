use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::domain::types::{AwardEvent, Branding};
use crate::error::EventsServiceError;
use crate::handlers::extract::{ApiJson, ApiPath, ApiQuery};
use crate::identity::Viewer;
use crate::state::AppState;
use crate::usecase::award_event::{
    CreateAwardEventInput, CreateAwardEventUseCase, DeleteAwardEventUseCase, GetAwardEventUseCase,
    ListAwardEventsUseCase, UpdateAwardEventInput, UpdateAwardEventUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardEventResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub header_image: Option<String>,
    pub sponsor_images: Vec<String>,
    pub digital_media_sponsor_index: Option<usize>,
    pub is_active: bool,
    #[serde(serialize_with = "ovation_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<AwardEvent> for AwardEventResponse {
    fn from(a: AwardEvent) -> Self {
        Self {
            id: a.id,
            name: a.name,
            description: a.description,
            header_image: a.branding.header_image,
            sponsor_images: a.branding.sponsor_images,
            digital_media_sponsor_index: a.branding.digital_media_sponsor_index,
            is_active: a.is_active,
            created_at: a.created_at,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAwardEventRequest {
    pub name: String,
    pub description: Option<String>,
    pub header_image: Option<String>,
    #[serde(default)]
    pub sponsor_images: Vec<String>,
    pub digital_media_sponsor_index: Option<usize>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAwardEventRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub header_image: Option<Option<String>>,
    pub sponsor_images: Option<Vec<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub digital_media_sponsor_index: Option<Option<usize>>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AwardEventListQuery {
    #[serde(default)]
    pub active_only: bool,
}

// ── POST /award-events ───────────────────────────────────────────────────────

pub async fn create_award_event(
    viewer: Viewer,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateAwardEventRequest>,
) -> Result<(StatusCode, Json<AwardEventResponse>), EventsServiceError> {
    viewer.require_admin()?;
    let uc = CreateAwardEventUseCase {
        repo: state.award_event_repo(),
    };
    let award_event = uc
        .execute(CreateAwardEventInput {
            name: body.name,
            description: body.description,
            branding: Branding {
                header_image: body.header_image,
                sponsor_images: body.sponsor_images,
                digital_media_sponsor_index: body.digital_media_sponsor_index,
            },
            is_active: body.is_active,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(award_event.into())))
}

// ── GET /award-events ────────────────────────────────────────────────────────

pub async fn list_award_events(
    viewer: Viewer,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AwardEventListQuery>,
) -> Result<Json<Vec<AwardEventResponse>>, EventsServiceError> {
    viewer.require_admin()?;
    let uc = ListAwardEventsUseCase {
        repo: state.award_event_repo(),
    };
    let items = uc.execute(query.active_only).await?;
    Ok(Json(items.into_iter().map(AwardEventResponse::from).collect()))
}

// ── GET /award-events/{award_event_id} ───────────────────────────────────────

pub async fn get_award_event(
    State(state): State<AppState>,
    ApiPath(award_event_id): ApiPath<Uuid>,
) -> Result<Json<AwardEventResponse>, EventsServiceError> {
    let uc = GetAwardEventUseCase {
        repo: state.award_event_repo(),
    };
    Ok(Json(uc.execute(award_event_id).await?.into()))
}

// ── PATCH /award-events/{award_event_id} ─────────────────────────────────────

pub async fn update_award_event(
    viewer: Viewer,
    State(state): State<AppState>,
    ApiPath(award_event_id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<UpdateAwardEventRequest>,
) -> Result<Json<AwardEventResponse>, EventsServiceError> {
    viewer.require_admin()?;
    let uc = UpdateAwardEventUseCase {
        repo: state.award_event_repo(),
    };
    let award_event = uc
        .execute(
            award_event_id,
            UpdateAwardEventInput {
                name: body.name,
                description: body.description,
                header_image: body.header_image,
                sponsor_images: body.sponsor_images,
                digital_media_sponsor_index: body.digital_media_sponsor_index,
                is_active: body.is_active,
            },
        )
        .await?;
    Ok(Json(award_event.into()))
}

// ── DELETE /award-events/{award_event_id} ────────────────────────────────────

pub async fn delete_award_event(
    viewer: Viewer,
    State(state): State<AppState>,
    ApiPath(award_event_id): ApiPath<Uuid>,
) -> Result<StatusCode, EventsServiceError> {
    viewer.require_admin()?;
    let uc = DeleteAwardEventUseCase {
        repo: state.award_event_repo(),
    };
    uc.execute(award_event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
