/// Vote service - normalizes incoming votes and applies them to the ledger
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::vote_repo::{is_write_conflict, VoteApply, VoteRepository};
use crate::error::{AppError, Result};
use crate::models::VoteTransition;

/// What a committed vote did, for logging and internal callers. The HTTP
/// boundary collapses this to a boolean.
#[derive(Debug, Clone, Copy)]
pub struct VoteReceipt {
    pub post_id: Uuid,
    pub value: i16,
    pub transition: VoteTransition,
    pub points: i64,
}

#[derive(Clone)]
pub struct VoteService {
    votes: VoteRepository,
}

impl VoteService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            votes: VoteRepository::new(pool),
        }
    }

    /// Apply one user's vote on one post.
    ///
    /// The raw value is normalized first: strictly -1 means downvote,
    /// anything else means upvote. A write conflict reported by the store
    /// retries the whole apply once; a second conflict surfaces as a
    /// transient failure instead of queuing further retries.
    pub async fn cast_vote(
        &self,
        user_id: Uuid,
        post_id: Uuid,
        raw_value: i32,
    ) -> Result<VoteReceipt> {
        let value = normalize_vote(raw_value);

        match self.votes.apply_vote(user_id, post_id, value).await {
            Ok(apply) => receipt(post_id, value, apply),
            Err(err) if is_write_conflict(&err) => {
                tracing::warn!(%user_id, %post_id, "vote apply hit write conflict, retrying: {}", err);

                match self.votes.apply_vote(user_id, post_id, value).await {
                    Ok(apply) => receipt(post_id, value, apply),
                    Err(err) if is_write_conflict(&err) => Err(AppError::TransientFailure(
                        "vote write conflict persisted after retry".to_string(),
                    )),
                    Err(err) => Err(err.into()),
                }
            }
            Err(err) => Err(err.into()),
        }
    }

    /// The viewer's current vote value on a post, if any
    pub async fn vote_status(&self, user_id: Uuid, post_id: Uuid) -> Result<Option<i16>> {
        let vote = self.votes.find_vote(user_id, post_id).await?;
        Ok(vote.map(|v| v.value))
    }
}

fn receipt(post_id: Uuid, value: i16, apply: VoteApply) -> Result<VoteReceipt> {
    match apply {
        VoteApply::Applied { transition, points } => Ok(VoteReceipt {
            post_id,
            value,
            transition,
            points,
        }),
        VoteApply::PostMissing => Err(AppError::NotFound(format!("post {} not found", post_id))),
    }
}

/// Strictly -1 means downvote, anything else means upvote. Malformed values
/// are normalized rather than rejected.
pub(crate) fn normalize_vote(raw: i32) -> i16 {
    if raw == -1 {
        -1
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_vote;

    #[test]
    fn minus_one_is_the_only_downvote() {
        assert_eq!(normalize_vote(-1), -1);
    }

    #[test]
    fn everything_else_counts_as_upvote() {
        assert_eq!(normalize_vote(1), 1);
        assert_eq!(normalize_vote(0), 1);
        assert_eq!(normalize_vote(7), 1);
        assert_eq!(normalize_vote(-2), 1);
        assert_eq!(normalize_vote(i32::MIN), 1);
    }
}
