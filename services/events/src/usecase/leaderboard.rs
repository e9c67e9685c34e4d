use uuid::Uuid;

use crate::domain::repository::{
    AwardEventRepository, CandidateDirectory, CategoryRepository, EventRepository, VoteRepository,
};
use crate::domain::types::{
    Category, CategoryOwner, LEADERBOARD_TOP_N, Leaderboard, LeaderboardEntry,
};
use crate::error::EventsServiceError;
use crate::usecase::category::ensure_owner_exists;

async fn build_leaderboard<D, V>(
    candidates: &D,
    votes: &V,
    category: Category,
    admin_override: bool,
) -> Result<Leaderboard, EventsServiceError>
where
    D: CandidateDirectory,
    V: VoteRepository,
{
    let total_votes = votes.count_by_category(category.id).await?;
    let results_visible = category.show_results || admin_override;

    let entries = if results_visible {
        let tallies = votes
            .tally_by_category(category.id, LEADERBOARD_TOP_N)
            .await?;
        let ids: Vec<Uuid> = tallies.iter().map(|t| t.nominee_id).collect();
        let mut names = candidates.names(&category, &ids).await?;
        tallies
            .into_iter()
            .map(|t| LeaderboardEntry {
                nominee_id: t.nominee_id,
                nominee_name: names.remove(&t.nominee_id).unwrap_or_default(),
                vote_count: t.vote_count,
            })
            .collect()
    } else {
        vec![]
    };

    Ok(Leaderboard {
        category_id: category.id,
        category_name: category.name,
        total_votes,
        results_visible,
        entries,
    })
}

// ── GetLeaderboard ───────────────────────────────────────────────────────────

pub struct GetLeaderboardUseCase<C, D, V>
where
    C: CategoryRepository,
    D: CandidateDirectory,
    V: VoteRepository,
{
    pub categories: C,
    pub candidates: D,
    pub votes: V,
}

impl<C, D, V> GetLeaderboardUseCase<C, D, V>
where
    C: CategoryRepository,
    D: CandidateDirectory,
    V: VoteRepository,
{
    /// `admin_override` reveals the ranking while `show_results` is off.
    /// `total_votes` is returned either way.
    pub async fn execute(
        &self,
        category_id: Uuid,
        admin_override: bool,
    ) -> Result<Leaderboard, EventsServiceError> {
        let category = self
            .categories
            .find_by_id(category_id)
            .await?
            .ok_or(EventsServiceError::CategoryNotFound)?;
        build_leaderboard(&self.candidates, &self.votes, category, admin_override).await
    }
}

// ── GetOwnerLeaderboards ─────────────────────────────────────────────────────

pub struct GetOwnerLeaderboardsUseCase<E, W, C, D, V>
where
    E: EventRepository,
    W: AwardEventRepository,
    C: CategoryRepository,
    D: CandidateDirectory,
    V: VoteRepository,
{
    pub events: E,
    pub award_events: W,
    pub categories: C,
    pub candidates: D,
    pub votes: V,
}

impl<E, W, C, D, V> GetOwnerLeaderboardsUseCase<E, W, C, D, V>
where
    E: EventRepository,
    W: AwardEventRepository,
    C: CategoryRepository,
    D: CandidateDirectory,
    V: VoteRepository,
{
    /// One leaderboard per category of an event or award event.
    pub async fn execute(
        &self,
        owner: CategoryOwner,
        admin_override: bool,
    ) -> Result<Vec<Leaderboard>, EventsServiceError> {
        ensure_owner_exists(&self.events, &self.award_events, owner).await?;
        let categories = self.categories.list_by_owner(owner).await?;
        let mut boards = Vec::with_capacity(categories.len());
        for category in categories {
            boards.push(
                build_leaderboard(&self.candidates, &self.votes, category, admin_override).await?,
            );
        }
        Ok(boards)
    }
}
