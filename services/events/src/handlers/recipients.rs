use axum::{
    Json,
    extract::State,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::Recipient;
use crate::error::EventsServiceError;
use crate::handlers::extract::{ApiJson, ApiPath};
use crate::identity::Viewer;
use crate::state::AppState;
use crate::usecase::recipient::{
    ImportRecipientsUseCase, ImportRow, ListRecipientsUseCase, RedeemRecipientUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientResponse {
    pub id: Uuid,
    pub award_event_id: Uuid,
    pub name: String,
    pub follower_count: i64,
    pub token: String,
    pub status: &'static str,
    #[serde(serialize_with = "ovation_core::serde::to_rfc3339_ms_opt")]
    pub redeemed_at: Option<DateTime<Utc>>,
    #[serde(serialize_with = "ovation_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Recipient> for RecipientResponse {
    fn from(r: Recipient) -> Self {
        Self {
            id: r.id,
            award_event_id: r.award_event_id,
            name: r.name,
            follower_count: r.follower_count,
            token: r.token,
            status: r.status.as_str(),
            redeemed_at: r.redeemed_at,
            created_at: r.created_at,
        }
    }
}

/// Rows as parsed from the uploaded spreadsheet; headers are matched loosely.
#[derive(Deserialize)]
pub struct ImportRecipientsRequest {
    pub rows: Vec<ImportRow>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRecipientsResponse {
    pub imported_count: u64,
    pub skipped_count: u64,
}

#[derive(Deserialize)]
pub struct RedeemRecipientRequest {
    pub token: String,
}

// ── POST /award-events/{award_event_id}/recipients/import ────────────────────

pub async fn import_recipients(
    viewer: Viewer,
    State(state): State<AppState>,
    ApiPath(award_event_id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<ImportRecipientsRequest>,
) -> Result<Json<ImportRecipientsResponse>, EventsServiceError> {
    viewer.require_admin()?;
    let uc = ImportRecipientsUseCase {
        award_events: state.award_event_repo(),
        recipients: state.recipient_repo(),
    };
    let report = uc.execute(award_event_id, body.rows).await?;
    Ok(Json(ImportRecipientsResponse {
        imported_count: report.imported,
        skipped_count: report.skipped,
    }))
}

// ── GET /award-events/{award_event_id}/recipients ────────────────────────────

pub async fn list_recipients(
    viewer: Viewer,
    State(state): State<AppState>,
    ApiPath(award_event_id): ApiPath<Uuid>,
) -> Result<Json<Vec<RecipientResponse>>, EventsServiceError> {
    viewer.require_admin()?;
    let uc = ListRecipientsUseCase {
        award_events: state.award_event_repo(),
        recipients: state.recipient_repo(),
    };
    let recipients = uc.execute(award_event_id).await?;
    Ok(Json(recipients.into_iter().map(RecipientResponse::from).collect()))
}

// ── POST /recipients/redeem ──────────────────────────────────────────────────

pub async fn redeem_recipient(
    viewer: Viewer,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RedeemRecipientRequest>,
) -> Result<Json<RecipientResponse>, EventsServiceError> {
    viewer.require_admin()?;
    let uc = RedeemRecipientUseCase {
        recipients: state.recipient_repo(),
    };
    Ok(Json(uc.execute(&body.token).await?.into()))
}
