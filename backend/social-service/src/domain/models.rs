use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference to a user known to this service. Identity itself is owned by
/// the external identity provider; this is a local directory entry synced
/// from it so follow targets can be validated.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRef {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Post entity - authored content with an immutable creation timestamp
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Like entity - at most one per (user, post) pair
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Like {
    pub id: Uuid,
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Comment entity - no uniqueness constraint, multiple per post/user allowed
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Notification - append-only record of an engagement event directed at a
/// post's author. Never mutated or deleted by this service.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub actor_id: Uuid,
    pub verb: String,
    pub subject_type: String,
    pub subject_id: Uuid,
    pub created_at: DateTime<Utc>,
}
