/// Storage interfaces for the social core.
///
/// One trait per store so callers depend only on what they touch. Two
/// backends implement them: `PgStore` (PostgreSQL, production) and
/// `MemoryStore` (in-process, tests and local development).
pub mod memory;
pub mod postgres;

use crate::domain::models::{Comment, Like, Notification, Post};
use crate::error::Result;
use uuid::Uuid;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Directed follow graph plus the local user directory synced from the
/// identity provider.
#[async_trait::async_trait]
pub trait RelationshipStore: Send + Sync {
    /// Conditionally create a follow edge. Returns true if a new edge was
    /// inserted, false if the pair already existed. Never double-counts.
    async fn create_follow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool>;

    /// Remove a follow edge if present. Returns true if an edge was removed.
    async fn delete_follow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool>;

    /// Current follow-set of a user. Read-only input to feed assembly.
    async fn followees_of(&self, user_id: Uuid) -> Result<Vec<Uuid>>;

    /// Sync a user directory entry from the identity provider.
    async fn upsert_user(&self, user_id: Uuid, username: &str) -> Result<()>;

    /// Whether the user is known to the local directory.
    async fn user_exists(&self, user_id: Uuid) -> Result<bool>;
}

/// Posts authored by users.
#[async_trait::async_trait]
pub trait PostStore: Send + Sync {
    async fn create_post(&self, author_id: Uuid, content: &str) -> Result<Post>;

    async fn post_by_id(&self, post_id: Uuid) -> Result<Option<Post>>;

    /// Posts by any of the given authors, ordered `created_at DESC, id DESC`
    /// so paging is deterministic even with colliding timestamps.
    async fn posts_by_authors(
        &self,
        author_ids: &[Uuid],
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Post>>;
}

/// Likes and comments on posts.
#[async_trait::async_trait]
pub trait EngagementStore: Send + Sync {
    /// Atomic conditional insert: returns the new Like, or None when the
    /// (user, post) pair already exists. This is the serialization point for
    /// the like state machine; there is no separate read-then-write.
    async fn insert_like(&self, user_id: Uuid, post_id: Uuid) -> Result<Option<Like>>;

    /// Remove a like if present. Returns true if a row was removed.
    async fn delete_like(&self, user_id: Uuid, post_id: Uuid) -> Result<bool>;

    async fn like_count(&self, post_id: Uuid) -> Result<i64>;

    async fn create_comment(&self, post_id: Uuid, user_id: Uuid, content: &str)
        -> Result<Comment>;

    async fn comments_for_post(
        &self,
        post_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Comment>>;
}

/// Append-only notification log. Records are never mutated or deleted.
#[async_trait::async_trait]
pub trait NotificationSink: Send + Sync {
    async fn record(
        &self,
        recipient_id: Uuid,
        actor_id: Uuid,
        verb: &str,
        subject_type: &str,
        subject_id: Uuid,
    ) -> Result<Notification>;
}
