use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{AwardEventRepository, CategoryRepository, NomineeRepository};
use crate::domain::types::{CategoryOwner, Nominee};
use crate::error::EventsServiceError;
use crate::usecase::event::{optional_text, required_text};

// ── CreateNominee ────────────────────────────────────────────────────────────

pub struct CreateNomineeInput {
    pub category_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub position: i32,
}

pub struct CreateNomineeUseCase<W, C, N>
where
    W: AwardEventRepository,
    C: CategoryRepository,
    N: NomineeRepository,
{
    pub award_events: W,
    pub categories: C,
    pub nominees: N,
}

impl<W, C, N> CreateNomineeUseCase<W, C, N>
where
    W: AwardEventRepository,
    C: CategoryRepository,
    N: NomineeRepository,
{
    pub async fn execute(
        &self,
        award_event_id: Uuid,
        input: CreateNomineeInput,
    ) -> Result<Nominee, EventsServiceError> {
        let name = required_text(&input.name, "name")?;
        self.award_events
            .find_by_id(award_event_id)
            .await?
            .ok_or(EventsServiceError::AwardEventNotFound)?;

        if let Some(category_id) = input.category_id {
            let category = self
                .categories
                .find_by_id(category_id)
                .await?
                .ok_or(EventsServiceError::CategoryNotFound)?;
            if category.owner != CategoryOwner::AwardEvent(award_event_id) {
                return Err(EventsServiceError::validation(
                    "category does not belong to this award event",
                ));
            }
        }

        let nominee = Nominee {
            id: Uuid::now_v7(),
            award_event_id,
            category_id: input.category_id,
            name,
            description: optional_text(input.description).unwrap_or_default(),
            image_url: optional_text(input.image_url),
            position: input.position,
            created_at: Utc::now(),
        };
        self.nominees.create(&nominee).await?;
        Ok(nominee)
    }
}

// ── ListNominees ─────────────────────────────────────────────────────────────

pub struct ListNomineesUseCase<N: NomineeRepository> {
    pub nominees: N,
}

impl<N: NomineeRepository> ListNomineesUseCase<N> {
    /// With `category_id`, category-less nominees are listed too.
    pub async fn execute(
        &self,
        award_event_id: Uuid,
        category_id: Option<Uuid>,
    ) -> Result<Vec<Nominee>, EventsServiceError> {
        self.nominees
            .list_by_award_event(award_event_id, category_id)
            .await
    }
}

// ── DeleteNominee ────────────────────────────────────────────────────────────

pub struct DeleteNomineeUseCase<N: NomineeRepository> {
    pub nominees: N,
}

impl<N: NomineeRepository> DeleteNomineeUseCase<N> {
    pub async fn execute(&self, id: Uuid) -> Result<(), EventsServiceError> {
        if !self.nominees.delete(id).await? {
            return Err(EventsServiceError::NomineeNotFound);
        }
        Ok(())
    }
}
