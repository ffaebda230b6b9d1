use std::sync::Arc;

use uuid::Uuid;

use social_service::error::AppError;
use social_service::handlers::AppState;
use social_service::services::engagement::{LIKE_VERB, SUBJECT_POST};
use social_service::store::{MemoryStore, PostStore};

async fn state_with_post() -> (AppState, Arc<MemoryStore>, Uuid, Uuid) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone());
    let author = Uuid::new_v4();
    let post = store.create_post(author, "hello").await.unwrap();
    (state, store, author, post.id)
}

#[tokio::test]
async fn duplicate_like_fails_and_notifies_exactly_once() {
    let (state, store, author, post_id) = state_with_post().await;
    let liker = Uuid::new_v4();

    state.engagement.like(liker, post_id).await.unwrap();
    let err = state.engagement.like(liker, post_id).await.unwrap_err();
    assert!(matches!(err, AppError::AlreadyLiked));

    let notifications = store.recorded_notifications().await;
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].recipient_id, author);
    assert_eq!(notifications[0].actor_id, liker);
    assert_eq!(notifications[0].verb, LIKE_VERB);
    assert_eq!(notifications[0].subject_type, SUBJECT_POST);
    assert_eq!(notifications[0].subject_id, post_id);
}

#[tokio::test]
async fn unlike_transitions_back_and_never_notifies() {
    let (state, store, _, post_id) = state_with_post().await;
    let liker = Uuid::new_v4();

    state.engagement.like(liker, post_id).await.unwrap();
    state.engagement.unlike(liker, post_id).await.unwrap();

    let err = state.engagement.unlike(liker, post_id).await.unwrap_err();
    assert!(matches!(err, AppError::NotLiked));

    // Only the original like notified; neither unlike did.
    assert_eq!(store.recorded_notifications().await.len(), 1);
}

#[tokio::test]
async fn unlike_without_prior_like_fails() {
    let (state, store, _, post_id) = state_with_post().await;

    let err = state
        .engagement
        .unlike(Uuid::new_v4(), post_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotLiked));
    assert!(store.recorded_notifications().await.is_empty());
}

#[tokio::test]
async fn like_unknown_post_is_not_found() {
    let (state, store, _, _) = state_with_post().await;

    let err = state
        .engagement
        .like(Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert!(store.recorded_notifications().await.is_empty());
}

#[tokio::test]
async fn relike_after_unlike_notifies_again() {
    let (state, store, _, post_id) = state_with_post().await;
    let liker = Uuid::new_v4();

    state.engagement.like(liker, post_id).await.unwrap();
    state.engagement.unlike(liker, post_id).await.unwrap();
    state.engagement.like(liker, post_id).await.unwrap();

    assert_eq!(store.recorded_notifications().await.len(), 2);
}

#[tokio::test]
async fn comments_are_recorded_but_do_not_notify() {
    let (state, store, _, post_id) = state_with_post().await;
    let commenter = Uuid::new_v4();

    state
        .engagement
        .comment(commenter, post_id, "first")
        .await
        .unwrap();
    state
        .engagement
        .comment(commenter, post_id, "second")
        .await
        .unwrap();

    let comments = state.engagement.comments(post_id, 50, 0).await.unwrap();
    assert_eq!(comments.len(), 2);
    assert!(store.recorded_notifications().await.is_empty());
}

#[tokio::test]
async fn empty_comment_is_rejected() {
    let (state, _, _, post_id) = state_with_post().await;

    let err = state
        .engagement
        .comment(Uuid::new_v4(), post_id, "   ")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_likes_produce_one_winner_and_one_notification() {
    let (state, store, _, post_id) = state_with_post().await;
    let liker = Uuid::new_v4();

    const ATTEMPTS: usize = 16;
    let mut tasks = Vec::with_capacity(ATTEMPTS);
    for _ in 0..ATTEMPTS {
        let engagement = state.engagement.clone();
        tasks.push(tokio::spawn(async move {
            engagement.like(liker, post_id).await
        }));
    }

    let mut successes = 0;
    let mut already_liked = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(()) => successes += 1,
            Err(AppError::AlreadyLiked) => already_liked += 1,
            Err(other) => panic!("unexpected error: {}", other),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(already_liked, ATTEMPTS - 1);
    assert_eq!(store.recorded_notifications().await.len(), 1);
}
