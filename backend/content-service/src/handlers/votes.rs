/// Vote handler - casting votes on posts
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::middleware::UserId;
use crate::services::VoteService;

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub value: i32,
}

/// Boolean surface only; richer outcome detail stays internal.
#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub success: bool,
}

/// Cast a vote on a post
pub async fn vote_post(
    pool: web::Data<PgPool>,
    user_id: UserId,
    post_id: web::Path<Uuid>,
    req: web::Json<VoteRequest>,
) -> Result<HttpResponse> {
    let service = VoteService::new(pool.get_ref().clone());
    let receipt = service.cast_vote(user_id.0, *post_id, req.value).await?;

    tracing::debug!(
        user_id = %user_id.0,
        post_id = %receipt.post_id,
        value = receipt.value,
        transition = ?receipt.transition,
        points = receipt.points,
        "vote applied"
    );

    Ok(HttpResponse::Ok().json(VoteResponse { success: true }))
}
