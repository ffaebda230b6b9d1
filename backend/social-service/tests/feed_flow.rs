use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use social_service::error::AppError;
use social_service::handlers::AppState;
use social_service::store::{MemoryStore, RelationshipStore};

async fn state_with_store() -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (AppState::new(store.clone()), store)
}

async fn register(store: &MemoryStore, name: &str) -> Uuid {
    let id = Uuid::new_v4();
    store.upsert_user(id, name).await.unwrap();
    id
}

#[tokio::test]
async fn follow_then_unfollow_updates_followee_set() {
    let (state, store) = state_with_store().await;
    let a = register(&store, "alice").await;
    let b = register(&store, "bob").await;

    state.follows.follow(a, b).await.unwrap();
    assert_eq!(store.followees_of(a).await.unwrap(), vec![b]);

    state.follows.unfollow(a, b).await.unwrap();
    assert!(store.followees_of(a).await.unwrap().is_empty());
}

#[tokio::test]
async fn repeated_follow_is_idempotent() {
    let (state, store) = state_with_store().await;
    let a = register(&store, "alice").await;
    let b = register(&store, "bob").await;

    state.follows.follow(a, b).await.unwrap();
    state.follows.follow(a, b).await.unwrap();

    assert_eq!(store.followees_of(a).await.unwrap(), vec![b]);
}

#[tokio::test]
async fn unfollow_absent_edge_is_not_an_error() {
    let (state, store) = state_with_store().await;
    let a = register(&store, "alice").await;
    let b = register(&store, "bob").await;

    state.follows.unfollow(a, b).await.unwrap();
}

#[tokio::test]
async fn self_follow_is_rejected_and_changes_nothing() {
    let (state, store) = state_with_store().await;
    let a = register(&store, "alice").await;

    let err = state.follows.follow(a, a).await.unwrap_err();
    assert!(matches!(err, AppError::SelfFollow));
    assert!(store.followees_of(a).await.unwrap().is_empty());
}

#[tokio::test]
async fn follow_unknown_user_is_not_found() {
    let (state, store) = state_with_store().await;
    let a = register(&store, "alice").await;

    let err = state.follows.follow(a, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn empty_follow_set_yields_empty_feed() {
    let (state, store) = state_with_store().await;
    let a = register(&store, "alice").await;

    let page = state.feed.feed_for(a, 20, 0).await.unwrap();
    assert!(page.posts.is_empty());
    assert!(!page.has_more);
}

#[tokio::test]
async fn feed_tracks_the_follow_set() {
    // Users A, B, C. B and C each post once, A follows B only: feed is
    // exactly B's post. After A follows C, both posts appear newest first.
    let (state, store) = state_with_store().await;
    let a = register(&store, "alice").await;
    let b = register(&store, "bob").await;
    let c = register(&store, "carol").await;

    let t0 = Utc::now();
    let post_b = store.create_post_at(b, "from bob", t0).await;
    let post_c = store.create_post_at(c, "from carol", t0 + Duration::seconds(5)).await;

    state.follows.follow(a, b).await.unwrap();
    let page = state.feed.feed_for(a, 20, 0).await.unwrap();
    assert_eq!(page.posts.len(), 1);
    assert_eq!(page.posts[0].id, post_b.id);

    state.follows.follow(a, c).await.unwrap();
    let page = state.feed.feed_for(a, 20, 0).await.unwrap();
    let ids: Vec<Uuid> = page.posts.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![post_c.id, post_b.id]);
}

#[tokio::test]
async fn feed_never_contains_unfollowed_authors() {
    let (state, store) = state_with_store().await;
    let a = register(&store, "alice").await;
    let b = register(&store, "bob").await;
    let c = register(&store, "carol").await;

    store.create_post_at(c, "unseen", Utc::now()).await;
    state.follows.follow(a, b).await.unwrap();

    let page = state.feed.feed_for(a, 20, 0).await.unwrap();
    assert!(page.posts.is_empty());
}

#[tokio::test]
async fn feed_excludes_readers_own_posts() {
    let (state, store) = state_with_store().await;
    let a = register(&store, "alice").await;
    let b = register(&store, "bob").await;

    store.create_post_at(a, "my own", Utc::now()).await;
    let post_b = store.create_post_at(b, "from bob", Utc::now()).await;
    state.follows.follow(a, b).await.unwrap();

    let page = state.feed.feed_for(a, 20, 0).await.unwrap();
    let ids: Vec<Uuid> = page.posts.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![post_b.id]);
}

#[tokio::test]
async fn colliding_timestamps_break_ties_by_id_descending() {
    let (state, store) = state_with_store().await;
    let a = register(&store, "alice").await;
    let b = register(&store, "bob").await;
    state.follows.follow(a, b).await.unwrap();

    let ts = Utc::now();
    let p1 = store.create_post_at(b, "one", ts).await;
    let p2 = store.create_post_at(b, "two", ts).await;
    let p3 = store.create_post_at(b, "three", ts).await;

    let mut expected = vec![p1.id, p2.id, p3.id];
    expected.sort();
    expected.reverse();

    let page = state.feed.feed_for(a, 20, 0).await.unwrap();
    let ids: Vec<Uuid> = page.posts.iter().map(|p| p.id).collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn feed_pagination_reports_has_more() {
    let (state, store) = state_with_store().await;
    let a = register(&store, "alice").await;
    let b = register(&store, "bob").await;
    state.follows.follow(a, b).await.unwrap();

    let t0 = Utc::now();
    for i in 0..3 {
        store
            .create_post_at(b, &format!("post {}", i), t0 + Duration::seconds(i))
            .await;
    }

    let first = state.feed.feed_for(a, 2, 0).await.unwrap();
    assert_eq!(first.posts.len(), 2);
    assert!(first.has_more);

    let second = state.feed.feed_for(a, 2, 2).await.unwrap();
    assert_eq!(second.posts.len(), 1);
    assert!(!second.has_more);
}
