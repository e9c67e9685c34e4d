use std::collections::HashMap;

use anyhow::{Context as _, anyhow};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Statement, TransactionTrait, sea_query::Expr,
};
use serde_json::Value;
use uuid::Uuid;

use ovation_core::sea_ext::inserted_unless_duplicate;
use ovation_domain::pagination::PageRequest;
use ovation_events_schema::{
    attendees, award_events, categories, events, invite_codes, nominees, otps, recipients, votes,
};

use crate::domain::repository::{
    AttendeeRepository, AwardEventRepository, CandidateDirectory, CategoryRepository,
    EventRepository, InviteCodeRepository, NomineeRepository, OtpRepository, RecipientRepository,
    VoteRepository,
};
use crate::domain::types::{
    Attendee, AttendeeStatus, AwardEvent, Branding, Candidate, Category, CategoryFlags,
    CategoryOwner, Event, InviteCode, Nominee, NomineeTally, Otp, Recipient, RecipientStatus, Vote,
};
use crate::error::EventsServiceError;

// ── Event repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbEventRepository {
    pub db: DatabaseConnection,
}

impl EventRepository for DbEventRepository {
    async fn create(&self, event: &Event) -> Result<(), EventsServiceError> {
        events::ActiveModel {
            id: Set(event.id),
            name: Set(event.name.clone()),
            date: Set(event.date),
            invite_only: Set(event.invite_only),
            created_at: Set(event.created_at),
        }
        .insert(&self.db)
        .await
        .context("create event")?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, EventsServiceError> {
        let model = events::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find event by id")?;
        Ok(model.map(event_from_model))
    }

    async fn list(&self) -> Result<Vec<Event>, EventsServiceError> {
        let models = events::Entity::find()
            .order_by_desc(events::Column::Date)
            .order_by_desc(events::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list events")?;
        Ok(models.into_iter().map(event_from_model).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, EventsServiceError> {
        let result = events::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete event")?;
        Ok(result.rows_affected > 0)
    }
}

fn event_from_model(model: events::Model) -> Event {
    Event {
        id: model.id,
        name: model.name,
        date: model.date,
        invite_only: model.invite_only,
        created_at: model.created_at,
    }
}

// ── Award event repository ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAwardEventRepository {
    pub db: DatabaseConnection,
}

impl AwardEventRepository for DbAwardEventRepository {
    async fn create(&self, award_event: &AwardEvent) -> Result<(), EventsServiceError> {
        award_event_active_model(award_event)
            .insert(&self.db)
            .await
            .context("create award event")?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AwardEvent>, EventsServiceError> {
        let model = award_events::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find award event by id")?;
        Ok(model.map(award_event_from_model))
    }

    async fn list(&self, active_only: bool) -> Result<Vec<AwardEvent>, EventsServiceError> {
        let mut query = award_events::Entity::find();
        if active_only {
            query = query.filter(award_events::Column::IsActive.eq(true));
        }
        let models = query
            .order_by_desc(award_events::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list award events")?;
        Ok(models.into_iter().map(award_event_from_model).collect())
    }

    async fn update(&self, award_event: &AwardEvent) -> Result<bool, EventsServiceError> {
        let am = award_event_active_model(award_event);
        let result = award_events::Entity::update_many()
            .set(am)
            .filter(award_events::Column::Id.eq(award_event.id))
            .exec(&self.db)
            .await
            .context("update award event")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, EventsServiceError> {
        let result = award_events::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete award event")?;
        Ok(result.rows_affected > 0)
    }
}

fn award_event_active_model(award_event: &AwardEvent) -> award_events::ActiveModel {
    let branding = &award_event.branding;
    award_events::ActiveModel {
        id: Set(award_event.id),
        name: Set(award_event.name.clone()),
        description: Set(award_event.description.clone()),
        header_image: Set(branding.header_image.clone()),
        sponsor_images: Set(Value::from(branding.sponsor_images.clone())),
        digital_media_sponsor_index: Set(branding
            .digital_media_sponsor_index
            .and_then(|i| i32::try_from(i).ok())),
        is_active: Set(award_event.is_active),
        created_at: Set(award_event.created_at),
    }
}

fn award_event_from_model(model: award_events::Model) -> AwardEvent {
    let sponsor_images = match model.sponsor_images {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| v.as_str().map(str::to_owned))
            .collect(),
        _ => vec![],
    };
    AwardEvent {
        id: model.id,
        name: model.name,
        description: model.description,
        branding: Branding {
            header_image: model.header_image,
            sponsor_images,
            digital_media_sponsor_index: model
                .digital_media_sponsor_index
                .and_then(|i| usize::try_from(i).ok()),
        },
        is_active: model.is_active,
        created_at: model.created_at,
    }
}

// ── Attendee repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAttendeeRepository {
    pub db: DatabaseConnection,
}

impl AttendeeRepository for DbAttendeeRepository {
    async fn create(&self, attendee: &Attendee) -> Result<(), EventsServiceError> {
        attendees::ActiveModel {
            id: Set(attendee.id),
            event_id: Set(attendee.event_id),
            name: Set(attendee.name.clone()),
            email: Set(attendee.email.clone()),
            phone: Set(attendee.phone.clone()),
            category: Set(attendee.category.clone()),
            guest_names: Set(attendee.guest_names.clone()),
            meal_preference: Set(attendee.meal_preference.clone()),
            status: Set(attendee.status.as_str().to_owned()),
            checked_in_at: Set(attendee.checked_in_at),
            created_at: Set(attendee.created_at),
        }
        .insert(&self.db)
        .await
        .context("create attendee")?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Attendee>, EventsServiceError> {
        let model = attendees::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find attendee by id")?;
        Ok(model.map(attendee_from_model))
    }

    async fn list_by_event(
        &self,
        event_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Attendee>, EventsServiceError> {
        let models = attendees::Entity::find()
            .filter(attendees::Column::EventId.eq(event_id))
            .order_by_asc(attendees::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list attendees by event")?;
        Ok(models.into_iter().map(attendee_from_model).collect())
    }

    async fn check_in(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, EventsServiceError> {
        let result = attendees::Entity::update_many()
            .col_expr(
                attendees::Column::Status,
                Expr::value(AttendeeStatus::CheckedIn.as_str()),
            )
            .col_expr(attendees::Column::CheckedInAt, Expr::value(at))
            .filter(attendees::Column::Id.eq(id))
            .filter(attendees::Column::Status.eq(AttendeeStatus::Registered.as_str()))
            .exec(&self.db)
            .await
            .context("check in attendee")?;
        Ok(result.rows_affected == 1)
    }
}

fn attendee_from_model(model: attendees::Model) -> Attendee {
    Attendee {
        id: model.id,
        event_id: model.event_id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        category: model.category,
        guest_names: model.guest_names,
        meal_preference: model.meal_preference,
        status: AttendeeStatus::parse(&model.status).unwrap_or(AttendeeStatus::Registered),
        checked_in_at: model.checked_in_at,
        created_at: model.created_at,
    }
}

// ── Invite code repository ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbInviteCodeRepository {
    pub db: DatabaseConnection,
}

impl InviteCodeRepository for DbInviteCodeRepository {
    async fn create(&self, invite: &InviteCode) -> Result<(), EventsServiceError> {
        invite_codes::ActiveModel {
            id: Set(invite.id),
            code: Set(invite.code.clone()),
            event_id: Set(invite.event_id),
            is_used: Set(invite.is_used),
            created_at: Set(invite.created_at),
        }
        .insert(&self.db)
        .await
        .context("create invite code")?;
        Ok(())
    }

    async fn find_by_code(
        &self,
        event_id: Uuid,
        code: &str,
    ) -> Result<Option<InviteCode>, EventsServiceError> {
        let model = invite_codes::Entity::find()
            .filter(invite_codes::Column::EventId.eq(event_id))
            .filter(invite_codes::Column::Code.eq(code))
            .one(&self.db)
            .await
            .context("find invite code")?;
        Ok(model.map(invite_from_model))
    }

    async fn list_by_event(&self, event_id: Uuid) -> Result<Vec<InviteCode>, EventsServiceError> {
        let models = invite_codes::Entity::find()
            .filter(invite_codes::Column::EventId.eq(event_id))
            .order_by_desc(invite_codes::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list invite codes")?;
        Ok(models.into_iter().map(invite_from_model).collect())
    }

    async fn mark_used(&self, id: Uuid) -> Result<bool, EventsServiceError> {
        let result = invite_codes::Entity::update_many()
            .col_expr(invite_codes::Column::IsUsed, Expr::value(true))
            .filter(invite_codes::Column::Id.eq(id))
            .filter(invite_codes::Column::IsUsed.eq(false))
            .exec(&self.db)
            .await
            .context("mark invite code used")?;
        Ok(result.rows_affected == 1)
    }
}

fn invite_from_model(model: invite_codes::Model) -> InviteCode {
    InviteCode {
        id: model.id,
        code: model.code,
        event_id: model.event_id,
        is_used: model.is_used,
        created_at: model.created_at,
    }
}

// ── Category repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCategoryRepository {
    pub db: DatabaseConnection,
}

impl CategoryRepository for DbCategoryRepository {
    async fn create(&self, category: &Category) -> Result<(), EventsServiceError> {
        let (event_id, award_event_id) = match category.owner {
            CategoryOwner::Event(id) => (Some(id), None),
            CategoryOwner::AwardEvent(id) => (None, Some(id)),
        };
        categories::ActiveModel {
            id: Set(category.id),
            event_id: Set(event_id),
            award_event_id: Set(award_event_id),
            name: Set(category.name.clone()),
            description: Set(category.description.clone()),
            is_active: Set(category.is_active),
            show_results: Set(category.show_results),
            created_at: Set(category.created_at),
        }
        .insert(&self.db)
        .await
        .context("create category")?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, EventsServiceError> {
        let model = categories::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find category by id")?;
        model.map(category_from_model).transpose()
    }

    async fn list_by_owner(
        &self,
        owner: CategoryOwner,
    ) -> Result<Vec<Category>, EventsServiceError> {
        let owner_filter = match owner {
            CategoryOwner::Event(id) => categories::Column::EventId.eq(id),
            CategoryOwner::AwardEvent(id) => categories::Column::AwardEventId.eq(id),
        };
        let models = categories::Entity::find()
            .filter(owner_filter)
            .order_by_asc(categories::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list categories by owner")?;
        models.into_iter().map(category_from_model).collect()
    }

    async fn update_flags(
        &self,
        id: Uuid,
        flags: CategoryFlags,
    ) -> Result<bool, EventsServiceError> {
        let mut update = categories::Entity::update_many().filter(categories::Column::Id.eq(id));
        if let Some(is_active) = flags.is_active {
            update = update.col_expr(categories::Column::IsActive, Expr::value(is_active));
        }
        if let Some(show_results) = flags.show_results {
            update = update.col_expr(categories::Column::ShowResults, Expr::value(show_results));
        }
        let result = update
            .exec(&self.db)
            .await
            .context("update category flags")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, EventsServiceError> {
        let result = categories::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete category")?;
        Ok(result.rows_affected > 0)
    }
}

fn category_from_model(model: categories::Model) -> Result<Category, EventsServiceError> {
    let owner = match (model.event_id, model.award_event_id) {
        (Some(id), None) => CategoryOwner::Event(id),
        (None, Some(id)) => CategoryOwner::AwardEvent(id),
        _ => return Err(anyhow!("category {} must have exactly one owner", model.id).into()),
    };
    Ok(Category {
        id: model.id,
        owner,
        name: model.name,
        description: model.description,
        is_active: model.is_active,
        show_results: model.show_results,
        created_at: model.created_at,
    })
}

// ── Nominee repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbNomineeRepository {
    pub db: DatabaseConnection,
}

impl NomineeRepository for DbNomineeRepository {
    async fn create(&self, nominee: &Nominee) -> Result<(), EventsServiceError> {
        nominees::ActiveModel {
            id: Set(nominee.id),
            award_event_id: Set(nominee.award_event_id),
            category_id: Set(nominee.category_id),
            name: Set(nominee.name.clone()),
            description: Set(nominee.description.clone()),
            image_url: Set(nominee.image_url.clone()),
            position: Set(nominee.position),
            created_at: Set(nominee.created_at),
        }
        .insert(&self.db)
        .await
        .context("create nominee")?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Nominee>, EventsServiceError> {
        let model = nominees::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find nominee by id")?;
        Ok(model.map(nominee_from_model))
    }

    async fn list_by_award_event(
        &self,
        award_event_id: Uuid,
        category_id: Option<Uuid>,
    ) -> Result<Vec<Nominee>, EventsServiceError> {
        let mut query =
            nominees::Entity::find().filter(nominees::Column::AwardEventId.eq(award_event_id));
        if let Some(category_id) = category_id {
            query = query.filter(
                Condition::any()
                    .add(nominees::Column::CategoryId.eq(category_id))
                    .add(nominees::Column::CategoryId.is_null()),
            );
        }
        let models = query
            .order_by_asc(nominees::Column::Position)
            .order_by_asc(nominees::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list nominees")?;
        Ok(models.into_iter().map(nominee_from_model).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, EventsServiceError> {
        let result = nominees::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete nominee")?;
        Ok(result.rows_affected > 0)
    }
}

fn nominee_from_model(model: nominees::Model) -> Nominee {
    Nominee {
        id: model.id,
        award_event_id: model.award_event_id,
        category_id: model.category_id,
        name: model.name,
        description: model.description,
        image_url: model.image_url,
        position: model.position,
        created_at: model.created_at,
    }
}

// ── Candidate directory ──────────────────────────────────────────────────────

/// Nominees for award categories, attendees for attendance categories.
#[derive(Clone)]
pub struct DbCandidateDirectory {
    pub db: DatabaseConnection,
}

impl CandidateDirectory for DbCandidateDirectory {
    async fn find_candidate(
        &self,
        category: &Category,
        candidate_id: Uuid,
    ) -> Result<Option<Candidate>, EventsServiceError> {
        let candidate = match category.owner {
            CategoryOwner::AwardEvent(_) => nominees::Entity::find_by_id(candidate_id)
                .one(&self.db)
                .await
                .context("find nominee candidate")?
                .map(|n| Candidate {
                    id: n.id,
                    name: n.name,
                    owner_id: n.award_event_id,
                    category_id: n.category_id,
                }),
            CategoryOwner::Event(_) => attendees::Entity::find_by_id(candidate_id)
                .one(&self.db)
                .await
                .context("find attendee candidate")?
                .map(|a| Candidate {
                    id: a.id,
                    name: a.name,
                    owner_id: a.event_id,
                    category_id: None,
                }),
        };
        Ok(candidate)
    }

    async fn names(
        &self,
        category: &Category,
        ids: &[Uuid],
    ) -> Result<HashMap<Uuid, String>, EventsServiceError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let pairs: Vec<(Uuid, String)> = match category.owner {
            CategoryOwner::AwardEvent(_) => nominees::Entity::find()
                .select_only()
                .column(nominees::Column::Id)
                .column(nominees::Column::Name)
                .filter(nominees::Column::Id.is_in(ids.to_vec()))
                .into_tuple()
                .all(&self.db)
                .await
                .context("resolve nominee names")?,
            CategoryOwner::Event(_) => attendees::Entity::find()
                .select_only()
                .column(attendees::Column::Id)
                .column(attendees::Column::Name)
                .filter(attendees::Column::Id.is_in(ids.to_vec()))
                .into_tuple()
                .all(&self.db)
                .await
                .context("resolve attendee names")?,
        };
        Ok(pairs.into_iter().collect())
    }
}

// ── Vote repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbVoteRepository {
    pub db: DatabaseConnection,
}

impl VoteRepository for DbVoteRepository {
    async fn find_in_scope(
        &self,
        uniqueness_key: &str,
        voter_phone: &str,
    ) -> Result<Option<Vote>, EventsServiceError> {
        let model = votes::Entity::find()
            .filter(votes::Column::UniquenessKey.eq(uniqueness_key))
            .filter(votes::Column::VoterPhone.eq(voter_phone))
            .one(&self.db)
            .await
            .context("find vote in scope")?;
        Ok(model.map(vote_from_model))
    }

    async fn insert(&self, vote: &Vote) -> Result<bool, EventsServiceError> {
        let result = votes::ActiveModel {
            id: Set(vote.id),
            category_id: Set(vote.category_id),
            event_id: Set(vote.event_id),
            nominee_id: Set(vote.nominee_id),
            voter_phone: Set(vote.voter_phone.clone()),
            voter_name: Set(vote.voter_name.clone()),
            weight: Set(vote.weight),
            uniqueness_key: Set(vote.uniqueness_key.clone()),
            created_at: Set(vote.created_at),
        }
        .insert(&self.db)
        .await;
        Ok(inserted_unless_duplicate(result).context("insert vote")?)
    }

    async fn count_by_category(&self, category_id: Uuid) -> Result<u64, EventsServiceError> {
        let count = votes::Entity::find()
            .filter(votes::Column::CategoryId.eq(category_id))
            .count(&self.db)
            .await
            .context("count votes by category")?;
        Ok(count)
    }

    async fn tally_by_category(
        &self,
        category_id: Uuid,
        limit: u64,
    ) -> Result<Vec<NomineeTally>, EventsServiceError> {
        #[derive(Debug, FromQueryResult)]
        struct TallyRow {
            nominee_id: Uuid,
            vote_count: i64,
        }

        let sql = r#"
            SELECT nominee_id, SUM(COALESCE(weight, 1))::BIGINT AS vote_count
            FROM votes
            WHERE category_id = $1
            GROUP BY nominee_id
            ORDER BY vote_count DESC
            LIMIT $2
        "#;
        let rows = TallyRow::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            sql,
            [category_id.into(), (limit as i64).into()],
        ))
        .all(&self.db)
        .await
        .context("tally votes by category")?;

        Ok(rows
            .into_iter()
            .map(|row| NomineeTally {
                nominee_id: row.nominee_id,
                vote_count: row.vote_count,
            })
            .collect())
    }
}

fn vote_from_model(model: votes::Model) -> Vote {
    Vote {
        id: model.id,
        category_id: model.category_id,
        event_id: model.event_id,
        nominee_id: model.nominee_id,
        voter_phone: model.voter_phone,
        voter_name: model.voter_name,
        weight: model.weight,
        uniqueness_key: model.uniqueness_key,
        created_at: model.created_at,
    }
}

// ── Recipient repository ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRecipientRepository {
    pub db: DatabaseConnection,
}

impl RecipientRepository for DbRecipientRepository {
    async fn token_exists(&self, token: &str) -> Result<bool, EventsServiceError> {
        let count = recipients::Entity::find()
            .filter(recipients::Column::Token.eq(token))
            .count(&self.db)
            .await
            .context("check recipient token")?;
        Ok(count > 0)
    }

    async fn insert(&self, recipient: &Recipient) -> Result<bool, EventsServiceError> {
        let result = recipients::ActiveModel {
            id: Set(recipient.id),
            award_event_id: Set(recipient.award_event_id),
            name: Set(recipient.name.clone()),
            follower_count: Set(recipient.follower_count),
            token: Set(recipient.token.clone()),
            status: Set(recipient.status.as_str().to_owned()),
            redeemed_at: Set(recipient.redeemed_at),
            created_at: Set(recipient.created_at),
        }
        .insert(&self.db)
        .await;
        Ok(inserted_unless_duplicate(result).context("insert recipient")?)
    }

    async fn list_by_award_event(
        &self,
        award_event_id: Uuid,
    ) -> Result<Vec<Recipient>, EventsServiceError> {
        let models = recipients::Entity::find()
            .filter(recipients::Column::AwardEventId.eq(award_event_id))
            .order_by_asc(recipients::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list recipients")?;
        Ok(models.into_iter().map(recipient_from_model).collect())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Recipient>, EventsServiceError> {
        let model = recipients::Entity::find()
            .filter(recipients::Column::Token.eq(token))
            .one(&self.db)
            .await
            .context("find recipient by token")?;
        Ok(model.map(recipient_from_model))
    }

    async fn mark_redeemed(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, EventsServiceError> {
        let result = recipients::Entity::update_many()
            .col_expr(
                recipients::Column::Status,
                Expr::value(RecipientStatus::Redeemed.as_str()),
            )
            .col_expr(recipients::Column::RedeemedAt, Expr::value(at))
            .filter(recipients::Column::Id.eq(id))
            .filter(recipients::Column::Status.eq(RecipientStatus::Generated.as_str()))
            .exec(&self.db)
            .await
            .context("mark recipient redeemed")?;
        Ok(result.rows_affected == 1)
    }
}

fn recipient_from_model(model: recipients::Model) -> Recipient {
    Recipient {
        id: model.id,
        award_event_id: model.award_event_id,
        name: model.name,
        follower_count: model.follower_count,
        token: model.token,
        status: RecipientStatus::parse(&model.status).unwrap_or(RecipientStatus::Generated),
        redeemed_at: model.redeemed_at,
        created_at: model.created_at,
    }
}

// ── OTP repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOtpRepository {
    pub db: DatabaseConnection,
}

impl OtpRepository for DbOtpRepository {
    async fn replace_for_phone(&self, otp: &Otp) -> Result<(), EventsServiceError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let otp = otp.clone();
                Box::pin(async move {
                    otps::Entity::delete_many()
                        .filter(otps::Column::Phone.eq(otp.phone.as_str()))
                        .exec(txn)
                        .await?;
                    otps::ActiveModel {
                        id: Set(otp.id),
                        phone: Set(otp.phone),
                        code: Set(otp.code),
                        expires_at: Set(otp.expires_at),
                        verified: Set(otp.verified),
                        created_at: Set(otp.created_at),
                    }
                    .insert(txn)
                    .await?;
                    Ok(())
                })
            })
            .await
            .context("replace otp for phone")?;
        Ok(())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Otp>, EventsServiceError> {
        let model = otps::Entity::find()
            .filter(otps::Column::Phone.eq(phone))
            .order_by_desc(otps::Column::CreatedAt)
            .one(&self.db)
            .await
            .context("find otp by phone")?;
        Ok(model.map(|m| Otp {
            id: m.id,
            phone: m.phone,
            code: m.code,
            expires_at: m.expires_at,
            verified: m.verified,
            created_at: m.created_at,
        }))
    }

    async fn mark_verified(&self, id: Uuid) -> Result<bool, EventsServiceError> {
        let result = otps::Entity::update_many()
            .col_expr(otps::Column::Verified, Expr::value(true))
            .filter(otps::Column::Id.eq(id))
            .filter(otps::Column::Verified.eq(false))
            .exec(&self.db)
            .await
            .context("mark otp verified")?;
        Ok(result.rows_affected == 1)
    }
}
