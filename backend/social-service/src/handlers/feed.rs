/// Feed endpoint - reverse-chronological posts from followed authors
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::Result;
use crate::handlers::AppState;
use crate::middleware::UserId;
use crate::services::feed::DEFAULT_PAGE_SIZE;

#[derive(Debug, Deserialize)]
pub struct FeedQueryParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_SIZE
}

pub async fn get_feed(
    state: web::Data<AppState>,
    user_id: UserId,
    query: web::Query<FeedQueryParams>,
) -> Result<HttpResponse> {
    let page = state
        .feed
        .feed_for(user_id.0, query.limit, query.offset)
        .await?;

    Ok(HttpResponse::Ok().json(page))
}
