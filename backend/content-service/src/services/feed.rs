/// Feed service - cursor pagination over posts, newest first
use chrono::{DateTime, TimeZone, Utc};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::db::{PostRepository, VoteRepository};
use crate::error::{AppError, Result};
use crate::models::{FeedPage, FeedPost};

/// Hard server-side cap on page size, whatever the caller asks for.
pub const MAX_PAGE_SIZE: i64 = 50;

#[derive(Clone)]
pub struct FeedService {
    posts: PostRepository,
    votes: VoteRepository,
}

impl FeedService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            posts: PostRepository::new(pool.clone()),
            votes: VoteRepository::new(pool),
        }
    }

    /// One page of the feed.
    ///
    /// Fetches `limit + 1` rows in a single statement; the extra row only
    /// answers `has_more` and never reaches the response. When a viewer is
    /// present their vote values for the page are attached from one batched
    /// lookup.
    pub async fn page(
        &self,
        viewer: Option<Uuid>,
        limit: i64,
        cursor: Option<&str>,
    ) -> Result<FeedPage> {
        let limit = limit.clamp(1, MAX_PAGE_SIZE);
        let before = cursor.map(decode_cursor).transpose()?;

        let mut rows = self.posts.page(before, limit + 1).await?;

        let has_more = rows.len() as i64 > limit;
        rows.truncate(limit as usize);

        let statuses: HashMap<Uuid, i16> = match viewer {
            Some(user_id) if !rows.is_empty() => {
                let ids: Vec<Uuid> = rows.iter().map(|p| p.id).collect();
                self.votes.vote_status_batch(user_id, &ids).await?
            }
            _ => HashMap::new(),
        };

        let next_cursor = if has_more {
            rows.last().map(|post| encode_cursor(post.created_at))
        } else {
            None
        };

        let posts = rows
            .into_iter()
            .map(|post| {
                let vote_status = statuses.get(&post.id).copied();
                FeedPost::from_post(post, vote_status)
            })
            .collect();

        Ok(FeedPage {
            posts,
            next_cursor,
            has_more,
        })
    }
}

/// Cursors are the post's creation time as decimal milliseconds since the
/// Unix epoch, opaque to callers.
pub(crate) fn encode_cursor(ts: DateTime<Utc>) -> String {
    ts.timestamp_millis().to_string()
}

pub(crate) fn decode_cursor(raw: &str) -> Result<DateTime<Utc>> {
    let millis = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| AppError::BadRequest("invalid cursor".to_string()))?;

    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| AppError::BadRequest("invalid cursor".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_round_trips() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 45).unwrap();
        let decoded = decode_cursor(&encode_cursor(ts)).unwrap();
        assert_eq!(decoded, ts);
    }

    #[test]
    fn cursor_accepts_surrounding_whitespace() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let raw = format!(" {} ", encode_cursor(ts));
        assert_eq!(decode_cursor(&raw).unwrap(), ts);
    }

    #[test]
    fn malformed_cursor_is_rejected() {
        assert!(matches!(
            decode_cursor("not-a-number"),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(decode_cursor(""), Err(AppError::BadRequest(_))));
        assert!(matches!(
            decode_cursor("12.5"),
            Err(AppError::BadRequest(_))
        ));
    }
}
