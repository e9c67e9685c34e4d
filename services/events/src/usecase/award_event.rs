use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::AwardEventRepository;
use crate::domain::types::{AwardEvent, Branding};
use crate::error::EventsServiceError;
use crate::usecase::event::{optional_text, required_text};

fn check_branding(branding: &Branding) -> Result<(), EventsServiceError> {
    if !branding.is_consistent() {
        return Err(EventsServiceError::validation(
            "digital media sponsor index does not match any sponsor image",
        ));
    }
    Ok(())
}

// ── CreateAwardEvent ─────────────────────────────────────────────────────────

pub struct CreateAwardEventInput {
    pub name: String,
    pub description: Option<String>,
    pub branding: Branding,
    pub is_active: bool,
}

pub struct CreateAwardEventUseCase<R: AwardEventRepository> {
    pub repo: R,
}

impl<R: AwardEventRepository> CreateAwardEventUseCase<R> {
    pub async fn execute(
        &self,
        input: CreateAwardEventInput,
    ) -> Result<AwardEvent, EventsServiceError> {
        check_branding(&input.branding)?;
        let award_event = AwardEvent {
            id: Uuid::now_v7(),
            name: required_text(&input.name, "name")?,
            description: optional_text(input.description).unwrap_or_default(),
            branding: input.branding,
            is_active: input.is_active,
            created_at: Utc::now(),
        };
        self.repo.create(&award_event).await?;
        tracing::info!(award_event_id = %award_event.id, "award event created");
        Ok(award_event)
    }
}

// ── ListAwardEvents ──────────────────────────────────────────────────────────

pub struct ListAwardEventsUseCase<R: AwardEventRepository> {
    pub repo: R,
}

impl<R: AwardEventRepository> ListAwardEventsUseCase<R> {
    pub async fn execute(&self, active_only: bool) -> Result<Vec<AwardEvent>, EventsServiceError> {
        self.repo.list(active_only).await
    }
}

// ── GetAwardEvent ────────────────────────────────────────────────────────────

pub struct GetAwardEventUseCase<R: AwardEventRepository> {
    pub repo: R,
}

impl<R: AwardEventRepository> GetAwardEventUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<AwardEvent, EventsServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(EventsServiceError::AwardEventNotFound)
    }
}

// ── UpdateAwardEvent ─────────────────────────────────────────────────────────

/// Fields left as `None` keep their stored value. The inner `Option` of a
/// double option clears the field.
#[derive(Default)]
pub struct UpdateAwardEventInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub header_image: Option<Option<String>>,
    pub sponsor_images: Option<Vec<String>>,
    pub digital_media_sponsor_index: Option<Option<usize>>,
    pub is_active: Option<bool>,
}

impl UpdateAwardEventInput {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.header_image.is_none()
            && self.sponsor_images.is_none()
            && self.digital_media_sponsor_index.is_none()
            && self.is_active.is_none()
    }
}

pub struct UpdateAwardEventUseCase<R: AwardEventRepository> {
    pub repo: R,
}

impl<R: AwardEventRepository> UpdateAwardEventUseCase<R> {
    pub async fn execute(
        &self,
        id: Uuid,
        input: UpdateAwardEventInput,
    ) -> Result<AwardEvent, EventsServiceError> {
        if input.is_empty() {
            return Err(EventsServiceError::validation("nothing to update"));
        }
        let mut award_event = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(EventsServiceError::AwardEventNotFound)?;

        if let Some(name) = input.name {
            award_event.name = required_text(&name, "name")?;
        }
        if let Some(description) = input.description {
            award_event.description = description.trim().to_owned();
        }
        if let Some(header_image) = input.header_image {
            award_event.branding.header_image = optional_text(header_image);
        }
        if let Some(sponsor_images) = input.sponsor_images {
            award_event.branding.sponsor_images = sponsor_images;
        }
        if let Some(index) = input.digital_media_sponsor_index {
            award_event.branding.digital_media_sponsor_index = index;
        }
        if let Some(is_active) = input.is_active {
            award_event.is_active = is_active;
        }
        check_branding(&award_event.branding)?;

        if !self.repo.update(&award_event).await? {
            return Err(EventsServiceError::AwardEventNotFound);
        }
        Ok(award_event)
    }
}

// ── DeleteAwardEvent ─────────────────────────────────────────────────────────

pub struct DeleteAwardEventUseCase<R: AwardEventRepository> {
    pub repo: R,
}

impl<R: AwardEventRepository> DeleteAwardEventUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), EventsServiceError> {
        if !self.repo.delete(id).await? {
            return Err(EventsServiceError::AwardEventNotFound);
        }
        tracing::info!(award_event_id = %id, "award event deleted");
        Ok(())
    }
}
