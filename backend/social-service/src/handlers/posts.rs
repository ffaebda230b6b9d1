/// Post endpoints - creation and lookup. Post editing/deletion is out of
/// scope for this service.
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::Post;
use crate::error::{AppError, Result};
use crate::handlers::AppState;
use crate::middleware::UserId;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
}

pub async fn create_post(
    state: web::Data<AppState>,
    user_id: UserId,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    if req.content.trim().is_empty() {
        return Err(AppError::InvalidInput("post content is empty".into()));
    }

    let post = state.posts.create_post(user_id.0, &req.content).await?;

    Ok(HttpResponse::Created().json(post))
}

/// Post detail with its current engagement stats.
#[derive(Debug, Serialize)]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub post: Post,
    pub like_count: i64,
}

pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let post_id = path.into_inner();
    match state.posts.post_by_id(post_id).await? {
        Some(post) => {
            let like_count = state.engagement.like_count(post.id).await?;
            Ok(HttpResponse::Ok().json(PostDetailResponse { post, like_count }))
        }
        None => Err(AppError::NotFound(format!("Post {}", post_id))),
    }
}
