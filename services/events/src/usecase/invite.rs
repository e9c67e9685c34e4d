use chrono::Utc;
use rand::RngExt;
use uuid::Uuid;

use crate::domain::repository::{EventRepository, InviteCodeRepository};
use crate::domain::types::{INVITE_CODE_BYTES, InviteCode};
use crate::error::EventsServiceError;

/// Random bytes rendered as upper-case hex.
pub fn generate_invite_code() -> String {
    let mut rng = rand::rng();
    (0..INVITE_CODE_BYTES)
        .map(|_| format!("{:02X}", rng.random::<u8>()))
        .collect()
}

/// Canonical form used for lookups.
pub fn normalize_invite_code(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

// ── IssueInviteCode ──────────────────────────────────────────────────────────

pub struct IssueInviteCodeUseCase<E, I>
where
    E: EventRepository,
    I: InviteCodeRepository,
{
    pub events: E,
    pub invites: I,
}

impl<E, I> IssueInviteCodeUseCase<E, I>
where
    E: EventRepository,
    I: InviteCodeRepository,
{
    /// No pre-insert collision check: a clash with the unique index surfaces
    /// as an internal error.
    pub async fn execute(&self, event_id: Uuid) -> Result<InviteCode, EventsServiceError> {
        self.events
            .find_by_id(event_id)
            .await?
            .ok_or(EventsServiceError::EventNotFound)?;

        let invite = InviteCode {
            id: Uuid::now_v7(),
            code: generate_invite_code(),
            event_id,
            is_used: false,
            created_at: Utc::now(),
        };
        self.invites.create(&invite).await?;
        tracing::info!(event_id = %event_id, invite_id = %invite.id, "invite code issued");
        Ok(invite)
    }
}

// ── ListInviteCodes ──────────────────────────────────────────────────────────

pub struct ListInviteCodesUseCase<E, I>
where
    E: EventRepository,
    I: InviteCodeRepository,
{
    pub events: E,
    pub invites: I,
}

impl<E, I> ListInviteCodesUseCase<E, I>
where
    E: EventRepository,
    I: InviteCodeRepository,
{
    pub async fn execute(&self, event_id: Uuid) -> Result<Vec<InviteCode>, EventsServiceError> {
        self.events
            .find_by_id(event_id)
            .await?
            .ok_or(EventsServiceError::EventNotFound)?;
        self.invites.list_by_event(event_id).await
    }
}
