use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::models::{Comment, Like, Notification, Post, UserRef};
use crate::error::Result;
use crate::store::{EngagementStore, NotificationSink, PostStore, RelationshipStore};

#[derive(Default)]
struct State {
    users: HashMap<Uuid, UserRef>,
    follows: HashMap<(Uuid, Uuid), Uuid>,
    posts: HashMap<Uuid, Post>,
    likes: HashMap<(Uuid, Uuid), Like>,
    comments: Vec<Comment>,
    notifications: Vec<Notification>,
}

/// In-process backend. One mutex guards all state, so every conditional
/// insert is serialized exactly like the schema constraints serialize the
/// PostgreSQL backend.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a post with a caller-chosen timestamp. Lets tests exercise
    /// ordering with colliding timestamps.
    pub async fn create_post_at(
        &self,
        author_id: Uuid,
        content: &str,
        created_at: DateTime<Utc>,
    ) -> Post {
        let post = Post {
            id: Uuid::new_v4(),
            author_id,
            content: content.to_string(),
            created_at,
        };
        let mut state = self.state.lock().await;
        state.posts.insert(post.id, post.clone());
        post
    }

    /// Snapshot of everything recorded to the notification log.
    pub async fn recorded_notifications(&self) -> Vec<Notification> {
        self.state.lock().await.notifications.clone()
    }
}

#[async_trait::async_trait]
impl RelationshipStore for MemoryStore {
    async fn create_follow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool> {
        let mut state = self.state.lock().await;
        let key = (follower_id, followee_id);
        if state.follows.contains_key(&key) {
            return Ok(false);
        }
        state.follows.insert(key, Uuid::new_v4());
        Ok(true)
    }

    async fn delete_follow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool> {
        let mut state = self.state.lock().await;
        Ok(state.follows.remove(&(follower_id, followee_id)).is_some())
    }

    async fn followees_of(&self, user_id: Uuid) -> Result<Vec<Uuid>> {
        let state = self.state.lock().await;
        Ok(state
            .follows
            .keys()
            .filter(|(follower, _)| *follower == user_id)
            .map(|(_, followee)| *followee)
            .collect())
    }

    async fn upsert_user(&self, user_id: Uuid, username: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        state.users.insert(
            user_id,
            UserRef {
                id: user_id,
                username: username.to_string(),
                created_at: Utc::now(),
            },
        );
        Ok(())
    }

    async fn user_exists(&self, user_id: Uuid) -> Result<bool> {
        let state = self.state.lock().await;
        Ok(state.users.contains_key(&user_id))
    }
}

#[async_trait::async_trait]
impl PostStore for MemoryStore {
    async fn create_post(&self, author_id: Uuid, content: &str) -> Result<Post> {
        Ok(self.create_post_at(author_id, content, Utc::now()).await)
    }

    async fn post_by_id(&self, post_id: Uuid) -> Result<Option<Post>> {
        let state = self.state.lock().await;
        Ok(state.posts.get(&post_id).cloned())
    }

    async fn posts_by_authors(
        &self,
        author_ids: &[Uuid],
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Post>> {
        let state = self.state.lock().await;
        let mut posts: Vec<Post> = state
            .posts
            .values()
            .filter(|p| author_ids.contains(&p.author_id))
            .cloned()
            .collect();

        // created_at DESC, id DESC
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(posts
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }
}

#[async_trait::async_trait]
impl EngagementStore for MemoryStore {
    async fn insert_like(&self, user_id: Uuid, post_id: Uuid) -> Result<Option<Like>> {
        let mut state = self.state.lock().await;
        let key = (user_id, post_id);
        if state.likes.contains_key(&key) {
            return Ok(None);
        }
        let like = Like {
            id: Uuid::new_v4(),
            user_id,
            post_id,
            created_at: Utc::now(),
        };
        state.likes.insert(key, like.clone());
        Ok(Some(like))
    }

    async fn delete_like(&self, user_id: Uuid, post_id: Uuid) -> Result<bool> {
        let mut state = self.state.lock().await;
        Ok(state.likes.remove(&(user_id, post_id)).is_some())
    }

    async fn like_count(&self, post_id: Uuid) -> Result<i64> {
        let state = self.state.lock().await;
        Ok(state
            .likes
            .keys()
            .filter(|(_, liked)| *liked == post_id)
            .count() as i64)
    }

    async fn create_comment(
        &self,
        post_id: Uuid,
        user_id: Uuid,
        content: &str,
    ) -> Result<Comment> {
        let comment = Comment {
            id: Uuid::new_v4(),
            post_id,
            user_id,
            content: content.to_string(),
            created_at: Utc::now(),
        };
        let mut state = self.state.lock().await;
        state.comments.push(comment.clone());
        Ok(comment)
    }

    async fn comments_for_post(
        &self,
        post_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Comment>> {
        let state = self.state.lock().await;
        let mut comments: Vec<Comment> = state
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();

        comments.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(comments
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }
}

#[async_trait::async_trait]
impl NotificationSink for MemoryStore {
    async fn record(
        &self,
        recipient_id: Uuid,
        actor_id: Uuid,
        verb: &str,
        subject_type: &str,
        subject_id: Uuid,
    ) -> Result<Notification> {
        let notification = Notification {
            id: Uuid::new_v4(),
            recipient_id,
            actor_id,
            verb: verb.to_string(),
            subject_type: subject_type.to_string(),
            subject_id,
            created_at: Utc::now(),
        };
        let mut state = self.state.lock().await;
        state.notifications.push(notification.clone());
        Ok(notification)
    }
}
