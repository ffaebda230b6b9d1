/// Like/unlike/comment endpoints
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::Result;
use crate::handlers::AppState;
use crate::middleware::UserId;

pub async fn like_post(
    state: web::Data<AppState>,
    user_id: UserId,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    state.engagement.like(user_id.0, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "detail": "Post liked" })))
}

pub async fn unlike_post(
    state: web::Data<AppState>,
    user_id: UserId,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    state
        .engagement
        .unlike(user_id.0, path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "detail": "Post unliked" })))
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

pub async fn create_comment(
    state: web::Data<AppState>,
    user_id: UserId,
    path: web::Path<Uuid>,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    let comment = state
        .engagement
        .comment(user_id.0, path.into_inner(), &req.content)
        .await?;

    Ok(HttpResponse::Created().json(comment))
}

#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

pub async fn list_comments(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let comments = state
        .engagement
        .comments(path.into_inner(), query.limit.clamp(1, 100), query.offset)
        .await?;

    Ok(HttpResponse::Ok().json(comments))
}
