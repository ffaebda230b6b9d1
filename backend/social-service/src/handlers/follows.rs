/// Follow graph endpoints
use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::error::Result;
use crate::handlers::AppState;
use crate::middleware::UserId;

pub async fn follow_user(
    state: web::Data<AppState>,
    user_id: UserId,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let followee = path.into_inner();
    state.follows.follow(user_id.0, followee).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "detail": format!("Now following {}", followee)
    })))
}

pub async fn unfollow_user(
    state: web::Data<AppState>,
    user_id: UserId,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let followee = path.into_inner();
    state.follows.unfollow(user_id.0, followee).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "detail": format!("Unfollowed {}", followee)
    })))
}
