pub mod engagement;
pub mod feed;
pub mod follows;
pub mod posts;
pub mod users;

use std::sync::Arc;

use actix_web::web;

use crate::services::{EngagementService, FeedService, FollowService};
use crate::store::{EngagementStore, NotificationSink, PostStore, RelationshipStore};

/// Shared handler state: the domain services wired over one storage backend.
#[derive(Clone)]
pub struct AppState {
    pub follows: FollowService,
    pub feed: FeedService,
    pub engagement: EngagementService,
    pub posts: Arc<dyn PostStore>,
}

impl AppState {
    pub fn new<S>(store: Arc<S>) -> Self
    where
        S: RelationshipStore + PostStore + EngagementStore + NotificationSink + 'static,
    {
        let relationships: Arc<dyn RelationshipStore> = store.clone();
        let posts: Arc<dyn PostStore> = store.clone();
        let engagement: Arc<dyn EngagementStore> = store.clone();
        let notifications: Arc<dyn NotificationSink> = store;

        Self {
            follows: FollowService::new(relationships.clone()),
            feed: FeedService::new(relationships, posts.clone()),
            engagement: EngagementService::new(posts.clone(), engagement, notifications),
            posts,
        }
    }
}

/// Route table, shared by main and the HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/feed", web::get().to(feed::get_feed))
        .route("/users/{id}", web::put().to(users::sync_user))
        .route("/users/{id}/follow", web::post().to(follows::follow_user))
        .route(
            "/users/{id}/unfollow",
            web::post().to(follows::unfollow_user),
        )
        .route("/posts", web::post().to(posts::create_post))
        .route("/posts/{id}", web::get().to(posts::get_post))
        .route("/posts/{id}/like", web::post().to(engagement::like_post))
        .route(
            "/posts/{id}/unlike",
            web::post().to(engagement::unlike_post),
        )
        .route(
            "/posts/{id}/comments",
            web::post().to(engagement::create_comment),
        )
        .route(
            "/posts/{id}/comments",
            web::get().to(engagement::list_comments),
        );
}
