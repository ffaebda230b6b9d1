/// User directory sync endpoint. The identity provider owns users; it pushes
/// directory entries here so follow targets can be validated locally.
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::Result;
use crate::handlers::AppState;

#[derive(Debug, Deserialize)]
pub struct SyncUserRequest {
    pub username: String,
}

pub async fn sync_user(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<SyncUserRequest>,
) -> Result<HttpResponse> {
    state
        .follows
        .register_user(path.into_inner(), &req.username)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
