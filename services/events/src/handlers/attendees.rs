use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ovation_domain::pagination::PageRequest;

use crate::domain::types::Attendee;
use crate::error::EventsServiceError;
use crate::handlers::extract::{ApiJson, ApiPath, ApiQuery};
use crate::identity::Viewer;
use crate::state::AppState;
use crate::usecase::attendee::{
    CheckInAttendeeUseCase, GetAttendeeUseCase, ListAttendeesUseCase, RegisterAttendeeInput,
    RegisterAttendeeUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeResponse {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub category: Option<String>,
    pub guest_names: Vec<String>,
    pub meal_preference: Option<String>,
    pub status: &'static str,
    #[serde(serialize_with = "ovation_core::serde::to_rfc3339_ms_opt")]
    pub checked_in_at: Option<DateTime<Utc>>,
    #[serde(serialize_with = "ovation_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Attendee> for AttendeeResponse {
    fn from(a: Attendee) -> Self {
        Self {
            guest_names: a.guests(),
            id: a.id,
            event_id: a.event_id,
            name: a.name,
            email: a.email,
            phone: a.phone,
            category: a.category,
            meal_preference: a.meal_preference,
            status: a.status.as_str(),
            checked_in_at: a.checked_in_at,
            created_at: a.created_at,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAttendeeRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub category: Option<String>,
    pub guest_names: Option<String>,
    pub meal_preference: Option<String>,
    pub invite_code: Option<String>,
}

// ── POST /events/{event_id}/attendees ────────────────────────────────────────

pub async fn register_attendee(
    State(state): State<AppState>,
    ApiPath(event_id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<RegisterAttendeeRequest>,
) -> Result<(StatusCode, Json<AttendeeResponse>), EventsServiceError> {
    let uc = RegisterAttendeeUseCase {
        events: state.event_repo(),
        attendees: state.attendee_repo(),
        invites: state.invite_repo(),
    };
    let attendee = uc
        .execute(
            event_id,
            RegisterAttendeeInput {
                name: body.name,
                email: body.email,
                phone: body.phone,
                category: body.category,
                guest_names: body.guest_names,
                meal_preference: body.meal_preference,
                invite_code: body.invite_code,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(attendee.into())))
}

// ── GET /events/{event_id}/attendees ─────────────────────────────────────────

pub async fn list_attendees(
    viewer: Viewer,
    State(state): State<AppState>,
    ApiPath(event_id): ApiPath<Uuid>,
    ApiQuery(page): ApiQuery<PageRequest>,
) -> Result<Json<Vec<AttendeeResponse>>, EventsServiceError> {
    viewer.require_admin()?;
    let uc = ListAttendeesUseCase {
        events: state.event_repo(),
        attendees: state.attendee_repo(),
    };
    let attendees = uc.execute(event_id, page).await?;
    Ok(Json(attendees.into_iter().map(AttendeeResponse::from).collect()))
}

// ── GET /attendees/{attendee_id} ─────────────────────────────────────────────

pub async fn get_attendee(
    viewer: Viewer,
    State(state): State<AppState>,
    ApiPath(attendee_id): ApiPath<Uuid>,
) -> Result<Json<AttendeeResponse>, EventsServiceError> {
    viewer.require_admin()?;
    let uc = GetAttendeeUseCase {
        attendees: state.attendee_repo(),
    };
    Ok(Json(uc.execute(attendee_id).await?.into()))
}

// ── POST /attendees/{attendee_id}/check-in ───────────────────────────────────

pub async fn check_in_attendee(
    viewer: Viewer,
    State(state): State<AppState>,
    ApiPath(attendee_id): ApiPath<Uuid>,
) -> Result<Json<AttendeeResponse>, EventsServiceError> {
    viewer.require_admin()?;
    let uc = CheckInAttendeeUseCase {
        attendees: state.attendee_repo(),
    };
    Ok(Json(uc.execute(attendee_id).await?.into()))
}
