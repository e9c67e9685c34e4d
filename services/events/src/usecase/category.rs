use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{AwardEventRepository, CategoryRepository, EventRepository};
use crate::domain::types::{Category, CategoryFlags, CategoryOwner};
use crate::error::EventsServiceError;
use crate::usecase::event::{optional_text, required_text};

/// `EventNotFound` or `AwardEventNotFound` unless the owner exists.
pub async fn ensure_owner_exists<E, W>(
    events: &E,
    award_events: &W,
    owner: CategoryOwner,
) -> Result<(), EventsServiceError>
where
    E: EventRepository,
    W: AwardEventRepository,
{
    match owner {
        CategoryOwner::Event(id) => {
            events
                .find_by_id(id)
                .await?
                .ok_or(EventsServiceError::EventNotFound)?;
        }
        CategoryOwner::AwardEvent(id) => {
            award_events
                .find_by_id(id)
                .await?
                .ok_or(EventsServiceError::AwardEventNotFound)?;
        }
    }
    Ok(())
}

// ── CreateCategory ───────────────────────────────────────────────────────────

pub struct CreateCategoryInput {
    pub owner: CategoryOwner,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub show_results: bool,
}

pub struct CreateCategoryUseCase<E, W, C>
where
    E: EventRepository,
    W: AwardEventRepository,
    C: CategoryRepository,
{
    pub events: E,
    pub award_events: W,
    pub categories: C,
}

impl<E, W, C> CreateCategoryUseCase<E, W, C>
where
    E: EventRepository,
    W: AwardEventRepository,
    C: CategoryRepository,
{
    pub async fn execute(&self, input: CreateCategoryInput) -> Result<Category, EventsServiceError> {
        let name = required_text(&input.name, "name")?;
        ensure_owner_exists(&self.events, &self.award_events, input.owner).await?;

        let category = Category {
            id: Uuid::now_v7(),
            owner: input.owner,
            name,
            description: optional_text(input.description).unwrap_or_default(),
            is_active: input.is_active,
            show_results: input.show_results,
            created_at: Utc::now(),
        };
        self.categories.create(&category).await?;
        tracing::info!(
            category_id = %category.id,
            owner_id = %category.owner.id(),
            "category created"
        );
        Ok(category)
    }
}

// ── ListCategories ───────────────────────────────────────────────────────────

pub struct ListCategoriesUseCase<E, W, C>
where
    E: EventRepository,
    W: AwardEventRepository,
    C: CategoryRepository,
{
    pub events: E,
    pub award_events: W,
    pub categories: C,
}

impl<E, W, C> ListCategoriesUseCase<E, W, C>
where
    E: EventRepository,
    W: AwardEventRepository,
    C: CategoryRepository,
{
    pub async fn execute(&self, owner: CategoryOwner) -> Result<Vec<Category>, EventsServiceError> {
        ensure_owner_exists(&self.events, &self.award_events, owner).await?;
        self.categories.list_by_owner(owner).await
    }
}

// ── UpdateCategoryFlags ──────────────────────────────────────────────────────

pub struct UpdateCategoryFlagsUseCase<C: CategoryRepository> {
    pub categories: C,
}

impl<C: CategoryRepository> UpdateCategoryFlagsUseCase<C> {
    /// Opening/closing voting and revealing results take effect on the next
    /// read; nothing is cached.
    pub async fn execute(
        &self,
        id: Uuid,
        flags: CategoryFlags,
    ) -> Result<Category, EventsServiceError> {
        if flags.is_empty() {
            return Err(EventsServiceError::validation("nothing to update"));
        }
        if !self.categories.update_flags(id, flags).await? {
            return Err(EventsServiceError::CategoryNotFound);
        }
        tracing::info!(
            category_id = %id,
            is_active = ?flags.is_active,
            show_results = ?flags.show_results,
            "category flags updated"
        );
        self.categories
            .find_by_id(id)
            .await?
            .ok_or(EventsServiceError::CategoryNotFound)
    }
}

// ── DeleteCategory ───────────────────────────────────────────────────────────

pub struct DeleteCategoryUseCase<C: CategoryRepository> {
    pub categories: C,
}

impl<C: CategoryRepository> DeleteCategoryUseCase<C> {
    pub async fn execute(&self, id: Uuid) -> Result<(), EventsServiceError> {
        if !self.categories.delete(id).await? {
            return Err(EventsServiceError::CategoryNotFound);
        }
        Ok(())
    }
}
