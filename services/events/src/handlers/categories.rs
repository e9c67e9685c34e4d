use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::{Category, CategoryFlags, CategoryOwner};
use crate::error::EventsServiceError;
use crate::handlers::extract::{ApiJson, ApiPath};
use crate::identity::Viewer;
use crate::state::AppState;
use crate::usecase::category::{
    CreateCategoryInput, CreateCategoryUseCase, DeleteCategoryUseCase, ListCategoriesUseCase,
    UpdateCategoryFlagsUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: Uuid,
    pub event_id: Option<Uuid>,
    pub award_event_id: Option<Uuid>,
    pub name: String,
    pub description: String,
    pub is_active: bool,
    pub show_results: bool,
    #[serde(serialize_with = "ovation_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        let (event_id, award_event_id) = match c.owner {
            CategoryOwner::Event(id) => (Some(id), None),
            CategoryOwner::AwardEvent(id) => (None, Some(id)),
        };
        Self {
            id: c.id,
            event_id,
            award_event_id,
            name: c.name,
            description: c.description,
            is_active: c.is_active,
            show_results: c.show_results,
            created_at: c.created_at,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub show_results: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    pub is_active: Option<bool>,
    pub show_results: Option<bool>,
}

async fn create_category(
    state: AppState,
    owner: CategoryOwner,
    body: CreateCategoryRequest,
) -> Result<(StatusCode, Json<CategoryResponse>), EventsServiceError> {
    let uc = CreateCategoryUseCase {
        events: state.event_repo(),
        award_events: state.award_event_repo(),
        categories: state.category_repo(),
    };
    let category = uc
        .execute(CreateCategoryInput {
            owner,
            name: body.name,
            description: body.description,
            is_active: body.is_active,
            show_results: body.show_results,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(category.into())))
}

async fn list_categories(
    state: AppState,
    owner: CategoryOwner,
) -> Result<Json<Vec<CategoryResponse>>, EventsServiceError> {
    let uc = ListCategoriesUseCase {
        events: state.event_repo(),
        award_events: state.award_event_repo(),
        categories: state.category_repo(),
    };
    let categories = uc.execute(owner).await?;
    Ok(Json(categories.into_iter().map(CategoryResponse::from).collect()))
}

// ── POST /events/{event_id}/categories ───────────────────────────────────────

pub async fn create_event_category(
    viewer: Viewer,
    State(state): State<AppState>,
    ApiPath(event_id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), EventsServiceError> {
    viewer.require_admin()?;
    create_category(state, CategoryOwner::Event(event_id), body).await
}

// ── GET /events/{event_id}/categories ────────────────────────────────────────

pub async fn list_event_categories(
    State(state): State<AppState>,
    ApiPath(event_id): ApiPath<Uuid>,
) -> Result<Json<Vec<CategoryResponse>>, EventsServiceError> {
    list_categories(state, CategoryOwner::Event(event_id)).await
}

// ── POST /award-events/{award_event_id}/categories ───────────────────────────

pub async fn create_award_category(
    viewer: Viewer,
    State(state): State<AppState>,
    ApiPath(award_event_id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), EventsServiceError> {
    viewer.require_admin()?;
    create_category(state, CategoryOwner::AwardEvent(award_event_id), body).await
}

// ── GET /award-events/{award_event_id}/categories ────────────────────────────

pub async fn list_award_categories(
    State(state): State<AppState>,
    ApiPath(award_event_id): ApiPath<Uuid>,
) -> Result<Json<Vec<CategoryResponse>>, EventsServiceError> {
    list_categories(state, CategoryOwner::AwardEvent(award_event_id)).await
}

// ── PATCH /categories/{category_id} ──────────────────────────────────────────

pub async fn update_category(
    viewer: Viewer,
    State(state): State<AppState>,
    ApiPath(category_id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<UpdateCategoryRequest>,
) -> Result<Json<CategoryResponse>, EventsServiceError> {
    viewer.require_admin()?;
    let uc = UpdateCategoryFlagsUseCase {
        categories: state.category_repo(),
    };
    let category = uc
        .execute(
            category_id,
            CategoryFlags {
                is_active: body.is_active,
                show_results: body.show_results,
            },
        )
        .await?;
    Ok(Json(category.into()))
}

// ── DELETE /categories/{category_id} ─────────────────────────────────────────

pub async fn delete_category(
    viewer: Viewer,
    State(state): State<AppState>,
    ApiPath(category_id): ApiPath<Uuid>,
) -> Result<StatusCode, EventsServiceError> {
    viewer.require_admin()?;
    let uc = DeleteCategoryUseCase {
        categories: state.category_repo(),
    };
    uc.execute(category_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
