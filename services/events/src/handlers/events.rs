use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::Event;
use crate::error::EventsServiceError;
use crate::handlers::extract::{ApiJson, ApiPath};
use crate::identity::Viewer;
use crate::state::AppState;
use crate::usecase::event::{
    CreateEventInput, CreateEventUseCase, DeleteEventUseCase, GetEventUseCase, ListEventsUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub invite_only: bool,
    #[serde(serialize_with = "ovation_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Event> for EventResponse {
    fn from(e: Event) -> Self {
        Self {
            id: e.id,
            name: e.name,
            date: e.date,
            invite_only: e.invite_only,
            created_at: e.created_at,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub invite_only: bool,
}

// ── POST /events ─────────────────────────────────────────────────────────────

pub async fn create_event(
    viewer: Viewer,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventResponse>), EventsServiceError> {
    viewer.require_admin()?;
    let uc = CreateEventUseCase {
        repo: state.event_repo(),
    };
    let event = uc
        .execute(CreateEventInput {
            name: body.name,
            date: body.date,
            invite_only: body.invite_only,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(event.into())))
}

// ── GET /events ──────────────────────────────────────────────────────────────

pub async fn list_events(
    viewer: Viewer,
    State(state): State<AppState>,
) -> Result<Json<Vec<EventResponse>>, EventsServiceError> {
    viewer.require_admin()?;
    let uc = ListEventsUseCase {
        repo: state.event_repo(),
    };
    let events = uc.execute().await?;
    Ok(Json(events.into_iter().map(EventResponse::from).collect()))
}

// ── GET /events/{event_id} ───────────────────────────────────────────────────

pub async fn get_event(
    State(state): State<AppState>,
    ApiPath(event_id): ApiPath<Uuid>,
) -> Result<Json<EventResponse>, EventsServiceError> {
    let uc = GetEventUseCase {
        repo: state.event_repo(),
    };
    Ok(Json(uc.execute(event_id).await?.into()))
}

// ── DELETE /events/{event_id} ────────────────────────────────────────────────

pub async fn delete_event(
    viewer: Viewer,
    State(state): State<AppState>,
    ApiPath(event_id): ApiPath<Uuid>,
) -> Result<StatusCode, EventsServiceError> {
    viewer.require_admin()?;
    let uc = DeleteEventUseCase {
        repo: state.event_repo(),
    };
    uc.execute(event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
