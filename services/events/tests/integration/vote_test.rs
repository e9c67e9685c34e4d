use futures::future::join_all;
use uuid::Uuid;

use ovation_events::domain::types::CategoryOwner;
use ovation_events::error::EventsServiceError;
use ovation_events::usecase::leaderboard::GetLeaderboardUseCase;
use ovation_events::usecase::vote::{SubmitVoteInput, SubmitVoteUseCase};
use ovation_testing::phones::{VOTER_PHONE, distinct_phones};

use crate::helpers::{
    MockCandidates, MockCategoryRepo, MockVoteRepo, test_candidate, test_category,
};

fn ballot(category_id: Uuid, nominee_id: Uuid, phone: &str) -> SubmitVoteInput {
    SubmitVoteInput {
        category_id,
        nominee_id,
        voter_phone: phone.to_owned(),
        voter_name: None,
    }
}

// ── Admission ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_admit_exactly_one_of_many_concurrent_votes_from_one_phone() {
    let award_event_id = Uuid::now_v7();
    let category = test_category(CategoryOwner::AwardEvent(award_event_id), "Best Host", true);
    let nominee = test_candidate(award_event_id, "Ada");
    let votes = MockVoteRepo::default();
    let handle = votes.votes_handle();

    let usecase = SubmitVoteUseCase {
        categories: MockCategoryRepo::new(vec![category.clone()]),
        candidates: MockCandidates::new(vec![nominee.clone()]),
        votes,
    };

    let results = join_all(
        (0..16).map(|_| usecase.execute(ballot(category.id, nominee.id, VOTER_PHONE))),
    )
    .await;

    let admitted = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(admitted, 1);
    assert!(
        results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, EventsServiceError::DuplicateVote)),
        "every loser must be rejected as a duplicate, got {results:?}"
    );
    assert_eq!(handle.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_admit_concurrent_votes_from_distinct_phones() {
    let award_event_id = Uuid::now_v7();
    let category = test_category(CategoryOwner::AwardEvent(award_event_id), "Best Host", true);
    let nominee = test_candidate(award_event_id, "Ada");
    let votes = MockVoteRepo::default();
    let handle = votes.votes_handle();

    let usecase = SubmitVoteUseCase {
        categories: MockCategoryRepo::new(vec![category.clone()]),
        candidates: MockCandidates::new(vec![nominee.clone()]),
        votes,
    };

    let phones = distinct_phones(8);
    let results =
        join_all(phones.iter().map(|p| usecase.execute(ballot(category.id, nominee.id, p)))).await;

    assert!(results.iter().all(Result::is_ok));
    assert_eq!(handle.lock().unwrap().len(), 8);
}

#[tokio::test]
async fn should_treat_formatted_and_bare_phone_as_same_voter() {
    let award_event_id = Uuid::now_v7();
    let category = test_category(CategoryOwner::AwardEvent(award_event_id), "Best Host", true);
    let nominee = test_candidate(award_event_id, "Ada");

    let usecase = SubmitVoteUseCase {
        categories: MockCategoryRepo::new(vec![category.clone()]),
        candidates: MockCandidates::new(vec![nominee.clone()]),
        votes: MockVoteRepo::default(),
    };

    usecase
        .execute(ballot(category.id, nominee.id, "+91 99999-99999"))
        .await
        .unwrap();
    let result = usecase
        .execute(ballot(category.id, nominee.id, VOTER_PHONE))
        .await;
    assert!(
        matches!(result, Err(EventsServiceError::DuplicateVote)),
        "expected DuplicateVote, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_vote_when_category_is_closed() {
    let award_event_id = Uuid::now_v7();
    let mut category = test_category(CategoryOwner::AwardEvent(award_event_id), "Best Host", true);
    category.is_active = false;
    let nominee = test_candidate(award_event_id, "Ada");
    let votes = MockVoteRepo::default();
    let handle = votes.votes_handle();

    let usecase = SubmitVoteUseCase {
        categories: MockCategoryRepo::new(vec![category.clone()]),
        candidates: MockCandidates::new(vec![nominee.clone()]),
        votes,
    };

    let result = usecase
        .execute(ballot(category.id, nominee.id, VOTER_PHONE))
        .await;
    assert!(
        matches!(result, Err(EventsServiceError::VotingClosed)),
        "expected VotingClosed, got {result:?}"
    );
    assert!(handle.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_short_phone_before_recording_anything() {
    let award_event_id = Uuid::now_v7();
    let category = test_category(CategoryOwner::AwardEvent(award_event_id), "Best Host", true);
    let nominee = test_candidate(award_event_id, "Ada");
    let votes = MockVoteRepo::default();
    let handle = votes.votes_handle();

    let usecase = SubmitVoteUseCase {
        categories: MockCategoryRepo::new(vec![category.clone()]),
        candidates: MockCandidates::new(vec![nominee.clone()]),
        votes,
    };

    let result = usecase.execute(ballot(category.id, nominee.id, "12345")).await;
    assert!(
        matches!(result, Err(EventsServiceError::Validation(_))),
        "expected Validation, got {result:?}"
    );
    assert!(handle.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_nominee_restricted_to_another_category() {
    let award_event_id = Uuid::now_v7();
    let owner = CategoryOwner::AwardEvent(award_event_id);
    let host = test_category(owner, "Best Host", true);
    let dancer = test_category(owner, "Best Dancer", true);
    let mut nominee = test_candidate(award_event_id, "Ada");
    nominee.category_id = Some(dancer.id);

    let usecase = SubmitVoteUseCase {
        categories: MockCategoryRepo::new(vec![host.clone(), dancer]),
        candidates: MockCandidates::new(vec![nominee.clone()]),
        votes: MockVoteRepo::default(),
    };

    let result = usecase.execute(ballot(host.id, nominee.id, VOTER_PHONE)).await;
    assert!(
        matches!(result, Err(EventsServiceError::NomineeNotFound)),
        "expected NomineeNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_return_category_not_found_for_unknown_category() {
    let usecase = SubmitVoteUseCase {
        categories: MockCategoryRepo::default(),
        candidates: MockCandidates::default(),
        votes: MockVoteRepo::default(),
    };

    let result = usecase
        .execute(ballot(Uuid::now_v7(), Uuid::now_v7(), VOTER_PHONE))
        .await;
    assert!(
        matches!(result, Err(EventsServiceError::CategoryNotFound)),
        "expected CategoryNotFound, got {result:?}"
    );
}

// ── Uniqueness scope ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_allow_one_vote_per_phone_across_award_event_categories() {
    let award_event_id = Uuid::now_v7();
    let owner = CategoryOwner::AwardEvent(award_event_id);
    let host = test_category(owner, "Best Host", true);
    let dancer = test_category(owner, "Best Dancer", true);
    let nominee = test_candidate(award_event_id, "Ada");

    let usecase = SubmitVoteUseCase {
        categories: MockCategoryRepo::new(vec![host.clone(), dancer.clone()]),
        candidates: MockCandidates::new(vec![nominee.clone()]),
        votes: MockVoteRepo::default(),
    };

    usecase
        .execute(ballot(host.id, nominee.id, VOTER_PHONE))
        .await
        .unwrap();
    let result = usecase
        .execute(ballot(dancer.id, nominee.id, VOTER_PHONE))
        .await;
    assert!(
        matches!(result, Err(EventsServiceError::DuplicateVote)),
        "expected DuplicateVote, got {result:?}"
    );
}

#[tokio::test]
async fn should_allow_one_vote_per_phone_per_category_of_an_event() {
    let event_id = Uuid::now_v7();
    let owner = CategoryOwner::Event(event_id);
    let best_dressed = test_category(owner, "Best Dressed", true);
    let life_of_party = test_category(owner, "Life of the Party", true);
    let attendee = test_candidate(event_id, "Grace");
    let votes = MockVoteRepo::default();
    let handle = votes.votes_handle();

    let usecase = SubmitVoteUseCase {
        categories: MockCategoryRepo::new(vec![best_dressed.clone(), life_of_party.clone()]),
        candidates: MockCandidates::new(vec![attendee.clone()]),
        votes,
    };

    usecase
        .execute(ballot(best_dressed.id, attendee.id, VOTER_PHONE))
        .await
        .unwrap();
    usecase
        .execute(ballot(life_of_party.id, attendee.id, VOTER_PHONE))
        .await
        .unwrap();
    let again = usecase
        .execute(ballot(best_dressed.id, attendee.id, VOTER_PHONE))
        .await;

    assert!(
        matches!(again, Err(EventsServiceError::DuplicateVote)),
        "expected DuplicateVote, got {again:?}"
    );
    assert_eq!(handle.lock().unwrap().len(), 2);
}

// ── End to end ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_keep_total_votes_at_one_after_duplicate_attempt() {
    let award_event_id = Uuid::now_v7();
    let category = test_category(CategoryOwner::AwardEvent(award_event_id), "Best Host", true);
    let ada = test_candidate(award_event_id, "Ada");
    let grace = test_candidate(award_event_id, "Grace");

    let categories = MockCategoryRepo::new(vec![category.clone()]);
    let candidates = MockCandidates::new(vec![ada.clone(), grace.clone()]);
    let votes = MockVoteRepo::default();

    let submit = SubmitVoteUseCase {
        categories: categories.clone(),
        candidates: candidates.clone(),
        votes: votes.clone(),
    };
    submit
        .execute(ballot(category.id, ada.id, VOTER_PHONE))
        .await
        .unwrap();
    let second = submit
        .execute(ballot(category.id, grace.id, VOTER_PHONE))
        .await;

    let err = second.unwrap_err();
    assert!(matches!(err, EventsServiceError::DuplicateVote));
    assert_eq!(
        err.to_string(),
        "you have already voted; only one vote per phone number is allowed"
    );

    let board = GetLeaderboardUseCase {
        categories,
        candidates,
        votes,
    }
    .execute(category.id, false)
    .await
    .unwrap();
    assert_eq!(board.total_votes, 1);
    assert_eq!(board.entries.len(), 1);
    assert_eq!(board.entries[0].nominee_id, ada.id);
    assert_eq!(board.entries[0].nominee_name, "Ada");
    assert_eq!(board.entries[0].vote_count, 1);
}
