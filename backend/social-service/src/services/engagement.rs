use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::models::{Comment, Post};
use crate::error::{AppError, Result};
use crate::store::{EngagementStore, NotificationSink, PostStore};

pub const LIKE_VERB: &str = "liked your post";
pub const SUBJECT_POST: &str = "post";

/// Orchestrates like/unlike/comment mutations and their notification side
/// effects as explicit steps, not storage hooks.
///
/// Like state machine per (user, post): not-liked <-> liked. The storage
/// layer's conditional insert is the mutual-exclusion point, so concurrent
/// likes of the same pair yield exactly one `liked` state and at most one
/// notification.
#[derive(Clone)]
pub struct EngagementService {
    posts: Arc<dyn PostStore>,
    engagement: Arc<dyn EngagementStore>,
    notifications: Arc<dyn NotificationSink>,
}

impl EngagementService {
    pub fn new(
        posts: Arc<dyn PostStore>,
        engagement: Arc<dyn EngagementStore>,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            posts,
            engagement,
            notifications,
        }
    }

    /// not-liked -> liked. Emits exactly one notification to the post's
    /// author on the successful transition; a duplicate like fails with
    /// `AlreadyLiked` and emits nothing.
    pub async fn like(&self, user_id: Uuid, post_id: Uuid) -> Result<()> {
        let post = self.post_or_not_found(post_id).await?;

        let Some(like) = self.engagement.insert_like(user_id, post_id).await? else {
            return Err(AppError::AlreadyLiked);
        };

        // Like + notification form one logical unit: if the sink write
        // fails, undo the like so no partial state survives.
        if let Err(err) = self
            .notifications
            .record(post.author_id, user_id, LIKE_VERB, SUBJECT_POST, post.id)
            .await
        {
            warn!(%user_id, %post_id, "notification write failed, rolling back like");
            self.engagement.delete_like(user_id, post_id).await?;
            return Err(err);
        }

        debug!(%user_id, %post_id, like_id = %like.id, "post liked");
        Ok(())
    }

    /// liked -> not-liked. Never emits a notification; notifications exist
    /// to alert the author of new engagement, not its removal.
    pub async fn unlike(&self, user_id: Uuid, post_id: Uuid) -> Result<()> {
        self.post_or_not_found(post_id).await?;

        if !self.engagement.delete_like(user_id, post_id).await? {
            return Err(AppError::NotLiked);
        }

        debug!(%user_id, %post_id, "post unliked");
        Ok(())
    }

    /// Pure creation; multiple comments per (post, user) are allowed and no
    /// notification is emitted.
    pub async fn comment(&self, user_id: Uuid, post_id: Uuid, content: &str) -> Result<Comment> {
        if content.trim().is_empty() {
            return Err(AppError::InvalidInput("comment content is empty".into()));
        }
        self.post_or_not_found(post_id).await?;

        self.engagement.create_comment(post_id, user_id, content).await
    }

    /// Current like count for a post.
    pub async fn like_count(&self, post_id: Uuid) -> Result<i64> {
        self.engagement.like_count(post_id).await
    }

    pub async fn comments(&self, post_id: Uuid, limit: i64, offset: i64) -> Result<Vec<Comment>> {
        self.post_or_not_found(post_id).await?;
        self.engagement
            .comments_for_post(post_id, limit, offset)
            .await
    }

    async fn post_or_not_found(&self, post_id: Uuid) -> Result<Post> {
        self.posts
            .post_by_id(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {}", post_id)))
    }
}
