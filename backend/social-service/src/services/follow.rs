use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::store::RelationshipStore;

/// Follow graph operations. Identity arrives as an explicit parameter from
/// the request context; there is no ambient current-user state.
#[derive(Clone)]
pub struct FollowService {
    relationships: Arc<dyn RelationshipStore>,
}

impl FollowService {
    pub fn new(relationships: Arc<dyn RelationshipStore>) -> Self {
        Self { relationships }
    }

    /// Idempotently ensure the follow edge exists. Self-follows are rejected
    /// before touching storage; repeating an existing follow is not an error
    /// and not observably different from the first call.
    pub async fn follow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<()> {
        if follower_id == followee_id {
            return Err(AppError::SelfFollow);
        }
        self.ensure_user(followee_id).await?;

        let created = self
            .relationships
            .create_follow(follower_id, followee_id)
            .await?;
        debug!(%follower_id, %followee_id, created, "follow edge ensured");
        Ok(())
    }

    /// Idempotently remove the follow edge; absence is not an error.
    pub async fn unfollow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<()> {
        self.ensure_user(followee_id).await?;

        let removed = self
            .relationships
            .delete_follow(follower_id, followee_id)
            .await?;
        debug!(%follower_id, %followee_id, removed, "follow edge removed");
        Ok(())
    }

    /// Sync a directory entry from the identity provider.
    pub async fn register_user(&self, user_id: Uuid, username: &str) -> Result<()> {
        self.relationships.upsert_user(user_id, username).await
    }

    async fn ensure_user(&self, user_id: Uuid) -> Result<()> {
        if self.relationships.user_exists(user_id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("User {}", user_id)))
        }
    }
}
