use chrono::Utc;
use uuid::Uuid;

use ovation_domain::pagination::PageRequest;
use ovation_domain::phone::PhoneNumber;

use crate::domain::repository::{AttendeeRepository, EventRepository, InviteCodeRepository};
use crate::domain::types::{Attendee, AttendeeStatus};
use crate::error::EventsServiceError;
use crate::usecase::event::{optional_text, required_text};
use crate::usecase::invite::normalize_invite_code;

// ── RegisterAttendee ─────────────────────────────────────────────────────────

pub struct RegisterAttendeeInput {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub category: Option<String>,
    pub guest_names: Option<String>,
    pub meal_preference: Option<String>,
    pub invite_code: Option<String>,
}

pub struct RegisterAttendeeUseCase<E, A, I>
where
    E: EventRepository,
    A: AttendeeRepository,
    I: InviteCodeRepository,
{
    pub events: E,
    pub attendees: A,
    pub invites: I,
}

impl<E, A, I> RegisterAttendeeUseCase<E, A, I>
where
    E: EventRepository,
    A: AttendeeRepository,
    I: InviteCodeRepository,
{
    /// The invite code is only marked used after the attendee row is written,
    /// so a failed registration leaves the code reusable. Two concurrent
    /// registrations may both pass the `is_used` check; the loser of the
    /// conditional update is logged and its registration stands.
    pub async fn execute(
        &self,
        event_id: Uuid,
        input: RegisterAttendeeInput,
    ) -> Result<Attendee, EventsServiceError> {
        let name = required_text(&input.name, "name")?;
        let phone = optional_text(input.phone)
            .map(|raw| PhoneNumber::parse(&raw).map(PhoneNumber::into_inner))
            .transpose()?;

        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(EventsServiceError::EventNotFound)?;

        let invite = match optional_text(input.invite_code) {
            Some(raw) => {
                let invite = self
                    .invites
                    .find_by_code(event.id, &normalize_invite_code(&raw))
                    .await?
                    .ok_or(EventsServiceError::InvalidCode)?;
                if invite.is_used {
                    return Err(EventsServiceError::AlreadyUsed);
                }
                Some(invite)
            }
            None if event.invite_only => return Err(EventsServiceError::InvalidCode),
            None => None,
        };

        let attendee = Attendee {
            id: Uuid::now_v7(),
            event_id: event.id,
            name,
            email: optional_text(input.email),
            phone,
            category: optional_text(input.category),
            guest_names: optional_text(input.guest_names),
            meal_preference: optional_text(input.meal_preference),
            status: AttendeeStatus::Registered,
            checked_in_at: None,
            created_at: Utc::now(),
        };
        self.attendees.create(&attendee).await?;

        if let Some(invite) = invite {
            if !self.invites.mark_used(invite.id).await? {
                tracing::warn!(
                    event_id = %event.id,
                    invite_id = %invite.id,
                    attendee_id = %attendee.id,
                    "invite code consumed concurrently; registration kept"
                );
            }
        }

        tracing::info!(event_id = %event.id, attendee_id = %attendee.id, "attendee registered");
        Ok(attendee)
    }
}

// ── ListAttendees ────────────────────────────────────────────────────────────

pub struct ListAttendeesUseCase<E, A>
where
    E: EventRepository,
    A: AttendeeRepository,
{
    pub events: E,
    pub attendees: A,
}

impl<E, A> ListAttendeesUseCase<E, A>
where
    E: EventRepository,
    A: AttendeeRepository,
{
    pub async fn execute(
        &self,
        event_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Attendee>, EventsServiceError> {
        self.events
            .find_by_id(event_id)
            .await?
            .ok_or(EventsServiceError::EventNotFound)?;
        self.attendees.list_by_event(event_id, page.clamped()).await
    }
}

// ── GetAttendee ──────────────────────────────────────────────────────────────

pub struct GetAttendeeUseCase<A: AttendeeRepository> {
    pub attendees: A,
}

impl<A: AttendeeRepository> GetAttendeeUseCase<A> {
    pub async fn execute(&self, id: Uuid) -> Result<Attendee, EventsServiceError> {
        self.attendees
            .find_by_id(id)
            .await?
            .ok_or(EventsServiceError::AttendeeNotFound)
    }
}

// ── CheckInAttendee ──────────────────────────────────────────────────────────

pub struct CheckInAttendeeUseCase<A: AttendeeRepository> {
    pub attendees: A,
}

impl<A: AttendeeRepository> CheckInAttendeeUseCase<A> {
    /// `id` is what the entry pass encodes.
    pub async fn execute(&self, id: Uuid) -> Result<Attendee, EventsServiceError> {
        let mut attendee = self
            .attendees
            .find_by_id(id)
            .await?
            .ok_or(EventsServiceError::AttendeeNotFound)?;
        if attendee.status == AttendeeStatus::CheckedIn {
            return Err(EventsServiceError::AlreadyCheckedIn);
        }

        let now = Utc::now();
        if !self.attendees.check_in(id, now).await? {
            return Err(EventsServiceError::AlreadyCheckedIn);
        }
        attendee.status = AttendeeStatus::CheckedIn;
        attendee.checked_in_at = Some(now);
        tracing::info!(attendee_id = %id, event_id = %attendee.event_id, "attendee checked in");
        Ok(attendee)
    }
}
