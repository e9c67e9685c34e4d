use uuid::Uuid;

use ovation_events::domain::repository::CategoryRepository;
use ovation_events::domain::types::{CategoryFlags, CategoryOwner, LEADERBOARD_TOP_N};
use ovation_events::error::EventsServiceError;
use ovation_events::usecase::category::UpdateCategoryFlagsUseCase;
use ovation_events::usecase::leaderboard::{GetLeaderboardUseCase, GetOwnerLeaderboardsUseCase};
use ovation_testing::phones::distinct_phones;

use crate::helpers::{
    MockAwardEventRepo, MockCandidates, MockCategoryRepo, MockEventRepo, MockVoteRepo,
    recorded_vote, test_award_event, test_candidate, test_category,
};

// ── Visibility ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_hide_ranking_but_report_total_when_results_are_off() {
    let award_event_id = Uuid::now_v7();
    let category = test_category(CategoryOwner::AwardEvent(award_event_id), "Best Host", false);
    let ada = test_candidate(award_event_id, "Ada");
    let phones = distinct_phones(3);
    let votes = MockVoteRepo::new(
        phones
            .iter()
            .map(|p| recorded_vote(&category, ada.id, p))
            .collect(),
    );

    let board = GetLeaderboardUseCase {
        categories: MockCategoryRepo::new(vec![category.clone()]),
        candidates: MockCandidates::new(vec![ada]),
        votes,
    }
    .execute(category.id, false)
    .await
    .unwrap();

    assert!(!board.results_visible);
    assert!(board.entries.is_empty());
    assert_eq!(board.total_votes, 3);
}

#[tokio::test]
async fn should_reveal_hidden_ranking_to_admin() {
    let award_event_id = Uuid::now_v7();
    let category = test_category(CategoryOwner::AwardEvent(award_event_id), "Best Host", false);
    let ada = test_candidate(award_event_id, "Ada");
    let votes = MockVoteRepo::new(vec![recorded_vote(&category, ada.id, "7000000001")]);

    let board = GetLeaderboardUseCase {
        categories: MockCategoryRepo::new(vec![category.clone()]),
        candidates: MockCandidates::new(vec![ada.clone()]),
        votes,
    }
    .execute(category.id, true)
    .await
    .unwrap();

    assert!(board.results_visible);
    assert_eq!(board.entries.len(), 1);
    assert_eq!(board.entries[0].nominee_id, ada.id);
}

#[tokio::test]
async fn should_reveal_ranking_after_results_are_switched_on() {
    let award_event_id = Uuid::now_v7();
    let category = test_category(CategoryOwner::AwardEvent(award_event_id), "Best Host", false);
    let ada = test_candidate(award_event_id, "Ada");
    let categories = MockCategoryRepo::new(vec![category.clone()]);
    let leaderboard = GetLeaderboardUseCase {
        categories: categories.clone(),
        candidates: MockCandidates::new(vec![ada.clone()]),
        votes: MockVoteRepo::new(vec![recorded_vote(&category, ada.id, "7000000001")]),
    };

    let hidden = leaderboard.execute(category.id, false).await.unwrap();
    assert!(hidden.entries.is_empty());

    let updated = UpdateCategoryFlagsUseCase {
        categories: categories.clone(),
    }
    .execute(
        category.id,
        CategoryFlags {
            is_active: None,
            show_results: Some(true),
        },
    )
    .await
    .unwrap();
    assert!(updated.show_results);
    assert!(updated.is_active);

    let shown = leaderboard.execute(category.id, false).await.unwrap();
    assert!(shown.results_visible);
    assert_eq!(shown.entries.len(), 1);
    assert_eq!(shown.entries[0].nominee_name, "Ada");
}

#[tokio::test]
async fn should_reject_empty_flag_update() {
    let category = test_category(CategoryOwner::Event(Uuid::now_v7()), "Best Dressed", false);
    let categories = MockCategoryRepo::new(vec![category.clone()]);

    let result = UpdateCategoryFlagsUseCase {
        categories: categories.clone(),
    }
    .execute(category.id, CategoryFlags::default())
    .await;

    assert!(
        matches!(result, Err(EventsServiceError::Validation(_))),
        "expected Validation, got {result:?}"
    );
    let stored = categories.find_by_id(category.id).await.unwrap().unwrap();
    assert!(!stored.show_results);
}

// ── Ranking ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_rank_top_ten_by_vote_count() {
    let award_event_id = Uuid::now_v7();
    let category = test_category(CategoryOwner::AwardEvent(award_event_id), "Best Host", true);
    let nominees: Vec<_> = (0..12)
        .map(|i| test_candidate(award_event_id, &format!("Nominee {i}")))
        .collect();

    // Nominee i receives i + 1 votes.
    let phones = distinct_phones(78);
    let mut phones = phones.iter();
    let mut votes = Vec::new();
    for (i, nominee) in nominees.iter().enumerate() {
        for _ in 0..=i {
            votes.push(recorded_vote(&category, nominee.id, phones.next().unwrap()));
        }
    }

    let board = GetLeaderboardUseCase {
        categories: MockCategoryRepo::new(vec![category.clone()]),
        candidates: MockCandidates::new(nominees.clone()),
        votes: MockVoteRepo::new(votes),
    }
    .execute(category.id, false)
    .await
    .unwrap();

    assert_eq!(board.total_votes, 78);
    assert_eq!(board.entries.len(), LEADERBOARD_TOP_N as usize);
    assert_eq!(board.entries[0].nominee_id, nominees[11].id);
    assert_eq!(board.entries[0].vote_count, 12);
    assert_eq!(board.entries[9].nominee_id, nominees[2].id);
    assert!(
        board
            .entries
            .windows(2)
            .all(|w| w[0].vote_count >= w[1].vote_count)
    );
}

#[tokio::test]
async fn should_use_empty_name_for_unknown_nominee() {
    let award_event_id = Uuid::now_v7();
    let category = test_category(CategoryOwner::AwardEvent(award_event_id), "Best Host", true);
    let deleted_nominee = Uuid::now_v7();

    let board = GetLeaderboardUseCase {
        categories: MockCategoryRepo::new(vec![category.clone()]),
        candidates: MockCandidates::default(),
        votes: MockVoteRepo::new(vec![recorded_vote(&category, deleted_nominee, "7000000001")]),
    }
    .execute(category.id, false)
    .await
    .unwrap();

    assert_eq!(board.entries.len(), 1);
    assert_eq!(board.entries[0].nominee_id, deleted_nominee);
    assert_eq!(board.entries[0].nominee_name, "");
}

#[tokio::test]
async fn should_return_not_found_for_unknown_category() {
    let result = GetLeaderboardUseCase {
        categories: MockCategoryRepo::default(),
        candidates: MockCandidates::default(),
        votes: MockVoteRepo::default(),
    }
    .execute(Uuid::now_v7(), true)
    .await;

    assert!(
        matches!(result, Err(EventsServiceError::CategoryNotFound)),
        "expected CategoryNotFound, got {result:?}"
    );
}

// ── Per owner ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_build_one_leaderboard_per_owner_category() {
    let award_event = test_award_event();
    let award_event_id = award_event.id;
    let owner = CategoryOwner::AwardEvent(award_event_id);
    let host = test_category(owner, "Best Host", true);
    let dancer = test_category(owner, "Best Dancer", false);
    let elsewhere = test_category(CategoryOwner::AwardEvent(Uuid::now_v7()), "Other", true);
    let ada = test_candidate(award_event_id, "Ada");

    let boards = GetOwnerLeaderboardsUseCase {
        events: MockEventRepo::default(),
        award_events: MockAwardEventRepo::new(vec![award_event]),
        categories: MockCategoryRepo::new(vec![host.clone(), dancer.clone(), elsewhere]),
        candidates: MockCandidates::new(vec![ada.clone()]),
        votes: MockVoteRepo::new(vec![
            recorded_vote(&host, ada.id, "7000000001"),
            recorded_vote(&dancer, ada.id, "7000000002"),
        ]),
    }
    .execute(owner, false)
    .await
    .unwrap();

    assert_eq!(boards.len(), 2);
    let host_board = boards.iter().find(|b| b.category_id == host.id).unwrap();
    let dancer_board = boards.iter().find(|b| b.category_id == dancer.id).unwrap();
    assert_eq!(host_board.entries.len(), 1);
    assert!(dancer_board.entries.is_empty());
    assert_eq!(dancer_board.total_votes, 1);
}

#[tokio::test]
async fn should_reject_leaderboards_of_unknown_owner() {
    let leaderboards = GetOwnerLeaderboardsUseCase {
        events: MockEventRepo::default(),
        award_events: MockAwardEventRepo::default(),
        categories: MockCategoryRepo::default(),
        candidates: MockCandidates::default(),
        votes: MockVoteRepo::default(),
    };

    let event = leaderboards
        .execute(CategoryOwner::Event(Uuid::now_v7()), false)
        .await;
    assert!(
        matches!(event, Err(EventsServiceError::EventNotFound)),
        "expected EventNotFound, got {event:?}"
    );

    let award_event = leaderboards
        .execute(CategoryOwner::AwardEvent(Uuid::now_v7()), true)
        .await;
    assert!(
        matches!(award_event, Err(EventsServiceError::AwardEventNotFound)),
        "expected AwardEventNotFound, got {award_event:?}"
    );
}
