/// Request identity extraction
///
/// Authentication happens upstream at the gateway, which forwards the
/// authenticated user's id in the `x-user-id` header. The value is trusted
/// as-is; handlers that need a caller take `UserId` as an extractor, and
/// optional-identity handlers take `Option<UserId>`.
use actix_web::{FromRequest, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::error::AppError;

const USER_ID_HEADER: &str = "x-user-id";

/// Authenticated user id taken from the gateway-forwarded header.
#[derive(Debug, Clone, Copy)]
pub struct UserId(pub Uuid);

impl FromRequest for UserId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(extract_user_id(req))
    }
}

fn extract_user_id(req: &HttpRequest) -> Result<UserId, AppError> {
    let header_value = req
        .headers()
        .get(USER_ID_HEADER)
        .ok_or_else(|| AppError::Unauthorized("Missing x-user-id header".into()))?;

    let value = header_value
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid x-user-id header".into()))?;

    Uuid::parse_str(value)
        .map(UserId)
        .map_err(|_| AppError::Unauthorized("Invalid x-user-id header value".into()))
}
