use std::sync::Arc;

use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::domain::models::Post;
use crate::error::Result;
use crate::store::{PostStore, RelationshipStore};

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// One page of a user's feed.
#[derive(Debug, Clone, Serialize)]
pub struct FeedPage {
    pub posts: Vec<Post>,
    pub has_more: bool,
}

/// Assembles the reverse-chronological union of posts authored by everyone
/// the reader follows. No caching; every call recomputes from current store
/// state. A concurrent follow/unfollow may or may not be reflected, which is
/// accepted.
#[derive(Clone)]
pub struct FeedService {
    relationships: Arc<dyn RelationshipStore>,
    posts: Arc<dyn PostStore>,
}

impl FeedService {
    pub fn new(relationships: Arc<dyn RelationshipStore>, posts: Arc<dyn PostStore>) -> Self {
        Self {
            relationships,
            posts,
        }
    }

    /// Page of the reader's feed, ordered `created_at DESC, id DESC`.
    /// An empty follow-set yields an empty page, not an error. The reader's
    /// own posts never appear: edges are irreflexive, so the reader is never
    /// in their own follow-set.
    pub async fn feed_for(&self, user_id: Uuid, limit: i64, offset: i64) -> Result<FeedPage> {
        let limit = limit.clamp(1, MAX_PAGE_SIZE);
        let offset = offset.max(0);

        let followees = self.relationships.followees_of(user_id).await?;
        if followees.is_empty() {
            debug!(%user_id, "empty follow-set, empty feed");
            return Ok(FeedPage {
                posts: Vec::new(),
                has_more: false,
            });
        }

        // Fetch one extra row to decide has_more without a count query.
        let mut posts = self
            .posts
            .posts_by_authors(&followees, limit + 1, offset)
            .await?;
        let has_more = posts.len() as i64 > limit;
        posts.truncate(limit as usize);

        debug!(
            %user_id,
            followees = followees.len(),
            posts = posts.len(),
            has_more,
            "feed assembled"
        );

        Ok(FeedPage { posts, has_more })
    }
}
