#![allow(async_fn_in_trait)]

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use ovation_domain::pagination::PageRequest;

use crate::domain::types::{
    Attendee, AwardEvent, Candidate, Category, CategoryFlags, CategoryOwner, Event, InviteCode,
    Nominee, NomineeTally, Otp, Recipient, Vote,
};
use crate::error::EventsServiceError;

/// Repository for attendance events.
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<(), EventsServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, EventsServiceError>;
    async fn list(&self) -> Result<Vec<Event>, EventsServiceError>;
    /// Delete an event and everything it owns. Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, EventsServiceError>;
}

/// Repository for award ceremonies.
pub trait AwardEventRepository: Send + Sync {
    async fn create(&self, award_event: &AwardEvent) -> Result<(), EventsServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AwardEvent>, EventsServiceError>;
    async fn list(&self, active_only: bool) -> Result<Vec<AwardEvent>, EventsServiceError>;
    /// Returns `true` if a row was updated.
    async fn update(&self, award_event: &AwardEvent) -> Result<bool, EventsServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, EventsServiceError>;
}

pub trait AttendeeRepository: Send + Sync {
    async fn create(&self, attendee: &Attendee) -> Result<(), EventsServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Attendee>, EventsServiceError>;
    async fn list_by_event(
        &self,
        event_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Attendee>, EventsServiceError>;
    /// Flip `registered` to `checked_in`. Returns `false` if the attendee was
    /// already checked in (or no longer exists).
    async fn check_in(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, EventsServiceError>;
}

pub trait InviteCodeRepository: Send + Sync {
    async fn create(&self, invite: &InviteCode) -> Result<(), EventsServiceError>;
    async fn find_by_code(
        &self,
        event_id: Uuid,
        code: &str,
    ) -> Result<Option<InviteCode>, EventsServiceError>;
    async fn list_by_event(&self, event_id: Uuid) -> Result<Vec<InviteCode>, EventsServiceError>;
    /// Conditionally mark a code used (`WHERE is_used = false`).
    /// Returns `false` if another caller got there first.
    async fn mark_used(&self, id: Uuid) -> Result<bool, EventsServiceError>;
}

pub trait CategoryRepository: Send + Sync {
    async fn create(&self, category: &Category) -> Result<(), EventsServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, EventsServiceError>;
    async fn list_by_owner(
        &self,
        owner: CategoryOwner,
    ) -> Result<Vec<Category>, EventsServiceError>;
    /// Returns `true` if a row was updated.
    async fn update_flags(
        &self,
        id: Uuid,
        flags: CategoryFlags,
    ) -> Result<bool, EventsServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, EventsServiceError>;
}

pub trait NomineeRepository: Send + Sync {
    async fn create(&self, nominee: &Nominee) -> Result<(), EventsServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Nominee>, EventsServiceError>;
    /// Nominees of an award event ordered by position. With `category_id`,
    /// only that category's nominees plus category-less ones.
    async fn list_by_award_event(
        &self,
        award_event_id: Uuid,
        category_id: Option<Uuid>,
    ) -> Result<Vec<Nominee>, EventsServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, EventsServiceError>;
}

/// Resolves votable candidates for a category: nominees in the award flow,
/// attendees in the attendance flow.
pub trait CandidateDirectory: Send + Sync {
    async fn find_candidate(
        &self,
        category: &Category,
        candidate_id: Uuid,
    ) -> Result<Option<Candidate>, EventsServiceError>;

    /// Display names for `ids`. Missing ids are absent from the map.
    async fn names(
        &self,
        category: &Category,
        ids: &[Uuid],
    ) -> Result<HashMap<Uuid, String>, EventsServiceError>;
}

pub trait VoteRepository: Send + Sync {
    async fn find_in_scope(
        &self,
        uniqueness_key: &str,
        voter_phone: &str,
    ) -> Result<Option<Vote>, EventsServiceError>;

    /// Insert a vote. Returns `false` when the `(uniqueness_key, voter_phone)`
    /// unique index rejects it.
    async fn insert(&self, vote: &Vote) -> Result<bool, EventsServiceError>;

    /// Number of vote rows in a category.
    async fn count_by_category(&self, category_id: Uuid) -> Result<u64, EventsServiceError>;

    /// Per-nominee weight sums, highest first, at most `limit` entries.
    async fn tally_by_category(
        &self,
        category_id: Uuid,
        limit: u64,
    ) -> Result<Vec<NomineeTally>, EventsServiceError>;
}

pub trait RecipientRepository: Send + Sync {
    async fn token_exists(&self, token: &str) -> Result<bool, EventsServiceError>;
    /// Returns `false` when the token unique index rejects the row.
    async fn insert(&self, recipient: &Recipient) -> Result<bool, EventsServiceError>;
    async fn list_by_award_event(
        &self,
        award_event_id: Uuid,
    ) -> Result<Vec<Recipient>, EventsServiceError>;
    async fn find_by_token(&self, token: &str) -> Result<Option<Recipient>, EventsServiceError>;
    /// Conditionally flip `generated` to `redeemed`. Returns `false` if the
    /// token was already redeemed.
    async fn mark_redeemed(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, EventsServiceError>;
}

pub trait OtpRepository: Send + Sync {
    /// Atomically delete any code for the phone and store `otp`.
    async fn replace_for_phone(&self, otp: &Otp) -> Result<(), EventsServiceError>;
    async fn find_by_phone(&self, phone: &str) -> Result<Option<Otp>, EventsServiceError>;
    /// Returns `false` if the code was verified concurrently.
    async fn mark_verified(&self, id: Uuid) -> Result<bool, EventsServiceError>;
}

/// Per-phone resend cooldown.
pub trait OtpThrottle: Send + Sync {
    /// Claim the cooldown window. Returns `false` if one is still open.
    async fn try_acquire(&self, phone: &str, ttl_secs: u64) -> Result<bool, EventsServiceError>;
    /// Close the window early.
    async fn release(&self, phone: &str) -> Result<(), EventsServiceError>;
}

/// Outbound SMS.
pub trait SmsSender: Send + Sync {
    async fn send(&self, phone: &str, body: &str) -> Result<(), EventsServiceError>;
}
