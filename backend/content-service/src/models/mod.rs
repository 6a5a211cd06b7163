/// Data models for the content service
///
/// - `Post`: a text post with its cached vote aggregate
/// - `Vote`: one user's current vote direction on one post
/// - `VoteTransition`: the state machine applied when a vote arrives
/// - `FeedPost` / `FeedPage`: the paginated feed payload
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Characters of post text exposed in feed listings.
const SNIPPET_CHARS: usize = 50;

/// Post entity. `points` is the cached sum of the post's vote values and is
/// only ever changed inside the vote ledger's transaction.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub title: String,
    pub text: String,
    pub points: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Leading slice of the post body for list views, character-boundary safe.
    pub fn text_snippet(&self) -> String {
        self.text.chars().take(SNIPPET_CHARS).collect()
    }
}

/// Vote entity - one row per (user, post), value is +1 or -1.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Vote {
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub value: i16,
}

/// Transition chosen when a normalized vote meets the existing ledger row.
///
/// Per (user, post) the states are NoVote, Upvoted, Downvoted. There is no
/// transition that removes a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteTransition {
    /// No prior row: insert the vote, points move by `value`.
    Created,
    /// Prior row with the opposite direction: overwrite it, points move by
    /// `2 * value` (the old contribution is removed and the new one added).
    Flipped,
    /// Prior row with the same direction: idempotent no-op.
    Unchanged,
}

impl VoteTransition {
    /// Decide the transition for a normalized `value` given the existing
    /// ledger row's value, if any.
    pub fn plan(existing: Option<i16>, value: i16) -> VoteTransition {
        match existing {
            None => VoteTransition::Created,
            Some(prior) if prior == value => VoteTransition::Unchanged,
            Some(_) => VoteTransition::Flipped,
        }
    }

    /// Net change to the post's points when this transition applies `value`.
    pub fn points_delta(self, value: i16) -> i64 {
        match self {
            VoteTransition::Created => i64::from(value),
            VoteTransition::Flipped => 2 * i64::from(value),
            VoteTransition::Unchanged => 0,
        }
    }
}

/// One feed entry. `vote_status` is the viewer's own vote on the post and is
/// absent for anonymous requests.
#[derive(Debug, Clone, Serialize)]
pub struct FeedPost {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub title: String,
    pub text_snippet: String,
    pub points: i64,
    pub created_at: DateTime<Utc>,
    pub vote_status: Option<i16>,
}

impl FeedPost {
    pub fn from_post(post: Post, vote_status: Option<i16>) -> Self {
        Self {
            text_snippet: post.text_snippet(),
            id: post.id,
            creator_id: post.creator_id,
            title: post.title,
            points: post.points,
            created_at: post.created_at,
            vote_status,
        }
    }
}

/// A page of the feed plus the cursor for the next one.
#[derive(Debug, Serialize)]
pub struct FeedPage {
    pub posts: Vec<FeedPost>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

/// Single-post payload: the full post plus the viewer's vote, if any.
#[derive(Debug, Serialize)]
pub struct PostView {
    #[serde(flatten)]
    pub post: Post,
    pub vote_status: Option<i16>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn post_with_text(text: &str) -> Post {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        Post {
            id: Uuid::new_v4(),
            creator_id: Uuid::new_v4(),
            title: "title".to_string(),
            text: text.to_string(),
            points: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn plan_covers_every_transition() {
        assert_eq!(VoteTransition::plan(None, 1), VoteTransition::Created);
        assert_eq!(VoteTransition::plan(None, -1), VoteTransition::Created);
        assert_eq!(VoteTransition::plan(Some(1), -1), VoteTransition::Flipped);
        assert_eq!(VoteTransition::plan(Some(-1), 1), VoteTransition::Flipped);
        assert_eq!(VoteTransition::plan(Some(1), 1), VoteTransition::Unchanged);
        assert_eq!(VoteTransition::plan(Some(-1), -1), VoteTransition::Unchanged);
    }

    #[test]
    fn points_delta_matches_transition() {
        assert_eq!(VoteTransition::Created.points_delta(1), 1);
        assert_eq!(VoteTransition::Created.points_delta(-1), -1);
        assert_eq!(VoteTransition::Flipped.points_delta(1), 2);
        assert_eq!(VoteTransition::Flipped.points_delta(-1), -2);
        assert_eq!(VoteTransition::Unchanged.points_delta(1), 0);
        assert_eq!(VoteTransition::Unchanged.points_delta(-1), 0);
    }

    #[test]
    fn snippet_truncates_long_text() {
        let post = post_with_text(&"a".repeat(120));
        assert_eq!(post.text_snippet().len(), 50);
    }

    #[test]
    fn snippet_keeps_short_text_whole() {
        let post = post_with_text("short body");
        assert_eq!(post.text_snippet(), "short body");
    }

    #[test]
    fn snippet_respects_multibyte_boundaries() {
        let post = post_with_text(&"é".repeat(80));
        assert_eq!(post.text_snippet().chars().count(), 50);
    }
}
