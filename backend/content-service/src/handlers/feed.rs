/// Feed handler - the paginated home feed
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

use crate::error::Result;
use crate::middleware::UserId;
use crate::services::FeedService;

#[derive(Debug, Deserialize)]
pub struct FeedQueryParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
    pub cursor: Option<String>,
}

fn default_limit() -> i64 {
    20
}

/// Get one page of the feed, newest posts first. Anonymous callers get the
/// same page without vote status.
pub async fn get_feed(
    pool: web::Data<PgPool>,
    viewer: Option<UserId>,
    query: web::Query<FeedQueryParams>,
) -> Result<HttpResponse> {
    let service = FeedService::new(pool.get_ref().clone());
    let page = service
        .page(viewer.map(|u| u.0), query.limit, query.cursor.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(page))
}
