use crate::models::{Vote, VoteTransition};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

/// Result of one ledger application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteApply {
    /// The transaction committed; `points` is the post's aggregate after it.
    Applied {
        transition: VoteTransition,
        points: i64,
    },
    /// The post does not exist; nothing was written.
    PostMissing,
}

/// Repository for the vote ledger
///
/// Owns the invariant "at most one vote row per (user, post)" and keeps
/// posts.points equal to the sum of the post's vote values. Both writes
/// happen in one transaction; the `FOR UPDATE` lock on the post row
/// serializes every writer touching the same aggregate.
#[derive(Clone)]
pub struct VoteRepository {
    pool: PgPool,
}

impl VoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply a normalized vote (`value` must be +1 or -1) for one user on
    /// one post.
    ///
    /// Inside a single transaction: lock the post row, read the existing
    /// vote, then insert / overwrite / skip per the transition state machine
    /// and move points by the transition's delta. Two voters on the same
    /// post queue on the row lock, so neither adjustment is lost; two racing
    /// calls for the same (user, post) serialize the same way and arrival
    /// order decides which transition wins.
    pub async fn apply_vote(
        &self,
        user_id: Uuid,
        post_id: Uuid,
        value: i16,
    ) -> Result<VoteApply, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let points: Option<i64> =
            sqlx::query_scalar("SELECT points FROM posts WHERE id = $1 FOR UPDATE")
                .bind(post_id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some(points) = points else {
            // Dropping the transaction rolls it back; no ledger row is left.
            return Ok(VoteApply::PostMissing);
        };

        let existing: Option<i16> =
            sqlx::query_scalar("SELECT value FROM votes WHERE user_id = $1 AND post_id = $2")
                .bind(user_id)
                .bind(post_id)
                .fetch_optional(&mut *tx)
                .await?;

        let transition = VoteTransition::plan(existing, value);

        match transition {
            VoteTransition::Created => {
                sqlx::query(
                    r#"
                    INSERT INTO votes (user_id, post_id, value)
                    VALUES ($1, $2, $3)
                    "#,
                )
                .bind(user_id)
                .bind(post_id)
                .bind(value)
                .execute(&mut *tx)
                .await?;
            }
            VoteTransition::Flipped => {
                sqlx::query(
                    r#"
                    UPDATE votes
                    SET value = $1
                    WHERE user_id = $2 AND post_id = $3
                    "#,
                )
                .bind(value)
                .bind(user_id)
                .bind(post_id)
                .execute(&mut *tx)
                .await?;
            }
            VoteTransition::Unchanged => {}
        }

        let delta = transition.points_delta(value);
        if delta != 0 {
            sqlx::query("UPDATE posts SET points = points + $1 WHERE id = $2")
                .bind(delta)
                .bind(post_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(VoteApply::Applied {
            transition,
            points: points + delta,
        })
    }

    /// Find one user's vote on one post
    pub async fn find_vote(
        &self,
        user_id: Uuid,
        post_id: Uuid,
    ) -> Result<Option<Vote>, sqlx::Error> {
        let vote = sqlx::query_as::<_, Vote>(
            r#"
            SELECT user_id, post_id, value
            FROM votes
            WHERE user_id = $1 AND post_id = $2
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vote)
    }

    /// Batch-load one user's vote values for a set of posts.
    /// Returns a map of post_id -> value containing only posts the user
    /// has voted on.
    pub async fn vote_status_batch(
        &self,
        user_id: Uuid,
        post_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, i16>, sqlx::Error> {
        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, (Uuid, i16)>(
            r#"
            SELECT post_id, value
            FROM votes
            WHERE user_id = $1 AND post_id = ANY($2)
            "#,
        )
        .bind(user_id)
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().collect())
    }
}

/// Write contention the store asks us to retry: serialization failure or
/// deadlock between concurrent appliers.
pub(crate) fn is_write_conflict(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .map(|code| code == "40001" || code == "40P01")
        .unwrap_or(false)
}
