/// Request identity extraction.
///
/// Authentication itself is the external identity provider's job; by the
/// time a request reaches this service the gateway has validated the token
/// and stamped the caller's id into the `X-User-Id` header. Handlers that
/// take a `UserId` argument therefore reject unauthenticated calls with 401
/// before any core logic runs.
use std::future::{ready, Ready};

use actix_web::{dev::Payload, FromRequest, HttpRequest};
use uuid::Uuid;

use crate::error::AppError;

pub const IDENTITY_HEADER: &str = "X-User-Id";

/// Authenticated caller identity, threaded explicitly into every core call.
#[derive(Debug, Clone, Copy)]
pub struct UserId(pub Uuid);

impl FromRequest for UserId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let user_id = req
            .headers()
            .get(IDENTITY_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized(format!("missing {} header", IDENTITY_HEADER)))
            .and_then(|raw| {
                Uuid::parse_str(raw).map_err(|_| {
                    AppError::Unauthorized(format!("invalid {} header", IDENTITY_HEADER))
                })
            })
            .map(UserId);

        ready(user_id)
    }
}
