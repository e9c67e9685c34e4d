use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::repository::EventRepository;
use crate::domain::types::Event;
use crate::error::EventsServiceError;

pub(crate) fn required_text(value: &str, field: &str) -> Result<String, EventsServiceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EventsServiceError::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_owned())
}

/// Trim; blank becomes `None`.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

// ── CreateEvent ──────────────────────────────────────────────────────────────

pub struct CreateEventInput {
    pub name: String,
    pub date: NaiveDate,
    pub invite_only: bool,
}

pub struct CreateEventUseCase<R: EventRepository> {
    pub repo: R,
}

impl<R: EventRepository> CreateEventUseCase<R> {
    pub async fn execute(&self, input: CreateEventInput) -> Result<Event, EventsServiceError> {
        let event = Event {
            id: Uuid::now_v7(),
            name: required_text(&input.name, "name")?,
            date: input.date,
            invite_only: input.invite_only,
            created_at: Utc::now(),
        };
        self.repo.create(&event).await?;
        tracing::info!(event_id = %event.id, "event created");
        Ok(event)
    }
}

// ── ListEvents ───────────────────────────────────────────────────────────────

pub struct ListEventsUseCase<R: EventRepository> {
    pub repo: R,
}

impl<R: EventRepository> ListEventsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Event>, EventsServiceError> {
        self.repo.list().await
    }
}

// ── GetEvent ─────────────────────────────────────────────────────────────────

pub struct GetEventUseCase<R: EventRepository> {
    pub repo: R,
}

impl<R: EventRepository> GetEventUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<Event, EventsServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(EventsServiceError::EventNotFound)
    }
}

// ── DeleteEvent ──────────────────────────────────────────────────────────────

pub struct DeleteEventUseCase<R: EventRepository> {
    pub repo: R,
}

impl<R: EventRepository> DeleteEventUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), EventsServiceError> {
        if !self.repo.delete(id).await? {
            return Err(EventsServiceError::EventNotFound);
        }
        tracing::info!(event_id = %id, "event deleted");
        Ok(())
    }
}
