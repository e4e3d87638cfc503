use uuid::Uuid;

use loomap_api::error::ApiError;
use loomap_api::usecase::review::{
    CreateReviewInput, CreateReviewUseCase, DeleteReviewUseCase, GetReviewUseCase,
    ListReviewsUseCase, ListUserReviewsUseCase, UpdateReviewInput, UpdateReviewUseCase,
};
use loomap_domain::ValidationError;
use loomap_domain::pagination::PageRequest;
use loomap_domain::rating::{RatingDimension, RatingsInput};

use crate::helpers::{
    MockBathroomRepo, MockReviewRepo, detailed, single, test_bathroom, test_review,
};

fn rating_input(value: i64) -> RatingsInput {
    RatingsInput {
        rating: Some(value.into()),
        ..Default::default()
    }
}

fn create_input(bathroom_id: Uuid, user_id: Uuid, ratings: RatingsInput) -> CreateReviewInput {
    CreateReviewInput {
        bathroom_id,
        user_id,
        ratings,
        best_for: None,
        comment: None,
    }
}

// ── CreateReviewUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_recompute_aggregate_as_reviews_are_added() {
    let bathroom = test_bathroom("Bobst Library", 40.7295, -73.9975);
    let bathrooms = MockBathroomRepo::new(vec![bathroom.clone()]);
    let reviews = MockReviewRepo::default();
    let usecase = CreateReviewUseCase {
        bathrooms: bathrooms.clone(),
        reviews: reviews.clone(),
    };

    usecase
        .execute(create_input(bathroom.id, Uuid::now_v7(), rating_input(4)))
        .await
        .unwrap();
    let stored = bathrooms.get(bathroom.id).unwrap();
    assert_eq!(stored.rating, 4.0);
    assert_eq!(stored.review_count, 1);

    usecase
        .execute(create_input(bathroom.id, Uuid::now_v7(), rating_input(2)))
        .await
        .unwrap();
    let stored = bathrooms.get(bathroom.id).unwrap();
    assert_eq!(stored.rating, 3.0);
    assert_eq!(stored.review_count, 2);
}

#[tokio::test]
async fn should_average_detailed_reviews_by_their_mean() {
    let bathroom = test_bathroom("Kimmel Center", 40.7294, -73.9972);
    let bathrooms = MockBathroomRepo::new(vec![bathroom.clone()]);
    let usecase = CreateReviewUseCase {
        bathrooms: bathrooms.clone(),
        reviews: MockReviewRepo::default(),
    };

    let review = usecase
        .execute(CreateReviewInput {
            bathroom_id: bathroom.id,
            user_id: Uuid::now_v7(),
            ratings: RatingsInput {
                cleanliness: Some(5_i64.into()),
                privacy: Some("4".into()),
                accessibility: Some(3_i64.into()),
                ..Default::default()
            },
            best_for: Some("  studying breaks ".into()),
            comment: Some("   ".into()),
        })
        .await
        .unwrap();

    assert_eq!(review.ratings, detailed(5, 4, 3));
    assert_eq!(review.best_for.as_deref(), Some("studying breaks"));
    assert_eq!(review.comment, None);
    assert_eq!(bathrooms.get(bathroom.id).unwrap().rating, 4.0);
}

#[tokio::test]
async fn should_reject_out_of_range_rating_without_writing() {
    let bathroom = test_bathroom("Bobst Library", 40.7295, -73.9975);
    let bathrooms = MockBathroomRepo::new(vec![bathroom.clone()]);
    let reviews = MockReviewRepo::default();
    let usecase = CreateReviewUseCase {
        bathrooms: bathrooms.clone(),
        reviews: reviews.clone(),
    };

    let result = usecase
        .execute(create_input(bathroom.id, Uuid::now_v7(), rating_input(6)))
        .await;

    assert!(
        matches!(
            result,
            Err(ApiError::Validation(ValidationError::RatingOutOfRange(
                RatingDimension::Rating
            )))
        ),
        "expected RatingOutOfRange, got {result:?}"
    );
    assert!(reviews.reviews.lock().unwrap().is_empty());
    assert_eq!(bathrooms.get(bathroom.id).unwrap().review_count, 0);
}

#[tokio::test]
async fn should_reject_review_for_unknown_bathroom() {
    let usecase = CreateReviewUseCase {
        bathrooms: MockBathroomRepo::default(),
        reviews: MockReviewRepo::default(),
    };

    let result = usecase
        .execute(create_input(Uuid::now_v7(), Uuid::now_v7(), rating_input(3)))
        .await;

    assert!(matches!(result, Err(ApiError::BathroomNotFound)));
}

// ── UpdateReviewUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_update_own_review_and_refresh_aggregate() {
    let bathroom = test_bathroom("Bobst Library", 40.7295, -73.9975);
    let author = Uuid::now_v7();
    let review = test_review(bathroom.id, author, single(2), 60);
    let bathrooms = MockBathroomRepo::new(vec![bathroom.clone()]);
    let reviews = MockReviewRepo::new(vec![review.clone()]);
    let usecase = UpdateReviewUseCase {
        bathrooms: bathrooms.clone(),
        reviews: reviews.clone(),
    };

    let updated = usecase
        .execute(
            review.id,
            author,
            UpdateReviewInput {
                ratings: rating_input(5),
                comment: Some("much better now".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.ratings, single(5));
    assert_eq!(updated.comment.as_deref(), Some("much better now"));
    assert!(updated.updated_at > review.updated_at);
    assert_eq!(reviews.get(review.id).unwrap().ratings, single(5));
    let stored = bathrooms.get(bathroom.id).unwrap();
    assert_eq!(stored.rating, 5.0);
    assert_eq!(stored.review_count, 1);
}

#[tokio::test]
async fn should_recompute_mean_from_all_reviews_after_update() {
    let bathroom = test_bathroom("Bobst Library", 40.7295, -73.9975);
    let author = Uuid::now_v7();
    let mine = test_review(bathroom.id, author, single(2), 120);
    let theirs = test_review(bathroom.id, Uuid::now_v7(), single(4), 60);
    let mut rated = bathroom.clone();
    rated.rating = 3.0;
    rated.review_count = 2;
    let bathrooms = MockBathroomRepo::new(vec![rated]);
    let reviews = MockReviewRepo::new(vec![mine.clone(), theirs.clone()]);
    let usecase = UpdateReviewUseCase {
        bathrooms: bathrooms.clone(),
        reviews: reviews.clone(),
    };

    usecase
        .execute(
            mine.id,
            author,
            UpdateReviewInput {
                ratings: rating_input(5),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(reviews.get(theirs.id).unwrap().ratings, single(4));
    let stored = bathrooms.get(bathroom.id).unwrap();
    assert_eq!(stored.rating, 4.5);
    assert_eq!(stored.review_count, 2);
}

#[tokio::test]
async fn should_forbid_update_by_non_author_and_leave_state_unchanged() {
    let bathroom = test_bathroom("Bobst Library", 40.7295, -73.9975);
    let author = Uuid::now_v7();
    let review = test_review(bathroom.id, author, single(3), 60);
    let mut rated = bathroom.clone();
    rated.rating = 3.0;
    rated.review_count = 1;
    let bathrooms = MockBathroomRepo::new(vec![rated]);
    let reviews = MockReviewRepo::new(vec![review.clone()]);
    let usecase = UpdateReviewUseCase {
        bathrooms: bathrooms.clone(),
        reviews: reviews.clone(),
    };

    let result = usecase
        .execute(
            review.id,
            Uuid::now_v7(),
            UpdateReviewInput {
                ratings: rating_input(1),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(ApiError::Forbidden)), "got {result:?}");
    assert_eq!(reviews.get(review.id).unwrap().ratings, single(3));
    let stored = bathrooms.get(bathroom.id).unwrap();
    assert_eq!(stored.rating, 3.0);
    assert_eq!(stored.review_count, 1);
}

#[tokio::test]
async fn should_reject_empty_review_update() {
    let usecase = UpdateReviewUseCase {
        bathrooms: MockBathroomRepo::default(),
        reviews: MockReviewRepo::default(),
    };

    let result = usecase
        .execute(Uuid::now_v7(), Uuid::now_v7(), UpdateReviewInput::default())
        .await;

    assert!(matches!(result, Err(ApiError::MissingData)));
}

#[tokio::test]
async fn should_return_not_found_when_updating_missing_review() {
    let usecase = UpdateReviewUseCase {
        bathrooms: MockBathroomRepo::default(),
        reviews: MockReviewRepo::default(),
    };

    let result = usecase
        .execute(
            Uuid::now_v7(),
            Uuid::now_v7(),
            UpdateReviewInput {
                ratings: rating_input(4),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(ApiError::ReviewNotFound)));
}

#[tokio::test]
async fn should_clear_comment_with_blank_text() {
    let bathroom = test_bathroom("Bobst Library", 40.7295, -73.9975);
    let author = Uuid::now_v7();
    let mut review = test_review(bathroom.id, author, single(4), 60);
    review.comment = Some("smells of coffee".into());
    let usecase = UpdateReviewUseCase {
        bathrooms: MockBathroomRepo::new(vec![bathroom]),
        reviews: MockReviewRepo::new(vec![review.clone()]),
    };

    let updated = usecase
        .execute(
            review.id,
            author,
            UpdateReviewInput {
                comment: Some(" ".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.comment, None);
    assert_eq!(updated.ratings, single(4));
}

// ── DeleteReviewUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_reset_aggregate_when_only_review_is_deleted() {
    let bathroom = test_bathroom("Bobst Library", 40.7295, -73.9975);
    let author = Uuid::now_v7();
    let review = test_review(bathroom.id, author, single(4), 60);
    let mut rated = bathroom.clone();
    rated.rating = 4.0;
    rated.review_count = 1;
    let bathrooms = MockBathroomRepo::new(vec![rated]);
    let reviews = MockReviewRepo::new(vec![review.clone()]);
    let usecase = DeleteReviewUseCase {
        bathrooms: bathrooms.clone(),
        reviews: reviews.clone(),
    };

    usecase.execute(review.id, author).await.unwrap();

    assert!(reviews.get(review.id).is_none());
    let stored = bathrooms.get(bathroom.id).unwrap();
    assert_eq!(stored.rating, 0.0);
    assert_eq!(stored.review_count, 0);
}

#[tokio::test]
async fn should_recompute_aggregate_from_remaining_reviews_on_delete() {
    let bathroom = test_bathroom("Bobst Library", 40.7295, -73.9975);
    let author = Uuid::now_v7();
    let mine = test_review(bathroom.id, author, single(4), 120);
    let theirs = test_review(bathroom.id, Uuid::now_v7(), single(2), 60);
    let mut rated = bathroom.clone();
    rated.rating = 3.0;
    rated.review_count = 2;
    let bathrooms = MockBathroomRepo::new(vec![rated]);
    let reviews = MockReviewRepo::new(vec![mine.clone(), theirs.clone()]);
    let usecase = DeleteReviewUseCase {
        bathrooms: bathrooms.clone(),
        reviews: reviews.clone(),
    };

    usecase.execute(mine.id, author).await.unwrap();

    assert!(reviews.get(mine.id).is_none());
    assert!(reviews.get(theirs.id).is_some());
    let stored = bathrooms.get(bathroom.id).unwrap();
    assert_eq!(stored.rating, 2.0);
    assert_eq!(stored.review_count, 1);
}

#[tokio::test]
async fn should_forbid_delete_by_non_author() {
    let bathroom = test_bathroom("Bobst Library", 40.7295, -73.9975);
    let review = test_review(bathroom.id, Uuid::now_v7(), single(4), 60);
    let reviews = MockReviewRepo::new(vec![review.clone()]);
    let usecase = DeleteReviewUseCase {
        bathrooms: MockBathroomRepo::new(vec![bathroom]),
        reviews: reviews.clone(),
    };

    let result = usecase.execute(review.id, Uuid::now_v7()).await;

    assert!(matches!(result, Err(ApiError::Forbidden)));
    assert!(reviews.get(review.id).is_some());
}

// ── Listing ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_bathroom_reviews_newest_first() {
    let bathroom = test_bathroom("Bobst Library", 40.7295, -73.9975);
    let user = Uuid::now_v7();
    let old = test_review(bathroom.id, user, single(2), 300);
    let new = test_review(bathroom.id, user, single(5), 10);
    let other = test_review(Uuid::now_v7(), user, single(1), 5);
    let usecase = ListReviewsUseCase {
        bathrooms: MockBathroomRepo::new(vec![bathroom.clone()]),
        reviews: MockReviewRepo::new(vec![old.clone(), other, new.clone()]),
    };

    let page = usecase
        .execute(bathroom.id, PageRequest::default())
        .await
        .unwrap();

    assert_eq!(page.total, 2);
    let ids: Vec<Uuid> = page.items.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![new.id, old.id]);
}

#[tokio::test]
async fn should_return_not_found_when_listing_reviews_of_missing_bathroom() {
    let usecase = ListReviewsUseCase {
        bathrooms: MockBathroomRepo::default(),
        reviews: MockReviewRepo::default(),
    };

    let result = usecase.execute(Uuid::now_v7(), PageRequest::default()).await;

    assert!(matches!(result, Err(ApiError::BathroomNotFound)));
}

#[tokio::test]
async fn should_list_only_callers_reviews() {
    let me = Uuid::now_v7();
    let mine = test_review(Uuid::now_v7(), me, single(4), 30);
    let theirs = test_review(Uuid::now_v7(), Uuid::now_v7(), single(4), 20);
    let usecase = ListUserReviewsUseCase {
        repo: MockReviewRepo::new(vec![mine.clone(), theirs]),
    };

    let page = usecase.execute(me, PageRequest::default()).await.unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, mine.id);
}

#[tokio::test]
async fn should_return_not_found_for_unknown_review() {
    let usecase = GetReviewUseCase {
        repo: MockReviewRepo::default(),
    };

    let result = usecase.execute(Uuid::now_v7()).await;

    assert!(matches!(result, Err(ApiError::ReviewNotFound)));
}
