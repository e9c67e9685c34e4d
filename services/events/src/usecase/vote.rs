use chrono::Utc;
use uuid::Uuid;

use ovation_domain::phone::PhoneNumber;

use crate::domain::repository::{CandidateDirectory, CategoryRepository, VoteRepository};
use crate::domain::types::Vote;
use crate::error::EventsServiceError;
use crate::usecase::event::optional_text;

pub struct SubmitVoteInput {
    pub category_id: Uuid,
    pub nominee_id: Uuid,
    pub voter_phone: String,
    pub voter_name: Option<String>,
}

/// Admits at most one vote per (uniqueness scope, phone).
///
/// The pre-insert lookup is only a fast path. Two concurrent submissions can
/// both miss it; the `(uniqueness_key, voter_phone)` unique index then rejects
/// the second insert and it is reported as [`EventsServiceError::DuplicateVote`].
pub struct SubmitVoteUseCase<C, D, V>
where
    C: CategoryRepository,
    D: CandidateDirectory,
    V: VoteRepository,
{
    pub categories: C,
    pub candidates: D,
    pub votes: V,
}

impl<C, D, V> SubmitVoteUseCase<C, D, V>
where
    C: CategoryRepository,
    D: CandidateDirectory,
    V: VoteRepository,
{
    pub async fn execute(&self, input: SubmitVoteInput) -> Result<Uuid, EventsServiceError> {
        let phone = PhoneNumber::parse(&input.voter_phone)?;
        let voter_name = optional_text(input.voter_name);

        let category = self
            .categories
            .find_by_id(input.category_id)
            .await?
            .ok_or(EventsServiceError::CategoryNotFound)?;
        if !category.is_active {
            return Err(EventsServiceError::VotingClosed);
        }

        let candidate = self
            .candidates
            .find_candidate(&category, input.nominee_id)
            .await?
            .filter(|c| c.is_eligible_in(&category))
            .ok_or(EventsServiceError::NomineeNotFound)?;

        let uniqueness_key = category.uniqueness_key();
        if self
            .votes
            .find_in_scope(&uniqueness_key, phone.as_str())
            .await?
            .is_some()
        {
            return Err(EventsServiceError::DuplicateVote);
        }

        let vote = Vote {
            id: Uuid::now_v7(),
            category_id: category.id,
            event_id: category.owner.id(),
            nominee_id: candidate.id,
            voter_phone: phone.into_inner(),
            voter_name,
            weight: None,
            uniqueness_key,
            created_at: Utc::now(),
        };
        if !self.votes.insert(&vote).await? {
            return Err(EventsServiceError::DuplicateVote);
        }

        tracing::info!(
            vote_id = %vote.id,
            category_id = %vote.category_id,
            nominee_id = %vote.nominee_id,
            scope = ?category.uniqueness_scope(),
            "vote accepted"
        );
        Ok(vote.id)
    }
}
