use crate::models::Post;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Repository for post rows
#[derive(Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new post with zero points
    pub async fn create(
        &self,
        creator_id: Uuid,
        title: &str,
        text: &str,
    ) -> Result<Post, sqlx::Error> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (creator_id, title, text)
            VALUES ($1, $2, $3)
            RETURNING id, creator_id, title, text, points, created_at, updated_at
            "#,
        )
        .bind(creator_id)
        .bind(title)
        .bind(text)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    /// Find a post by ID
    pub async fn find_by_id(&self, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, creator_id, title, text, points, created_at, updated_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    /// Update title and text of a post owned by `creator_id`.
    /// Returns None when the post does not exist or belongs to someone else.
    pub async fn update(
        &self,
        post_id: Uuid,
        creator_id: Uuid,
        title: &str,
        text: &str,
    ) -> Result<Option<Post>, sqlx::Error> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET title = $1, text = $2, updated_at = NOW()
            WHERE id = $3 AND creator_id = $4
            RETURNING id, creator_id, title, text, points, created_at, updated_at
            "#,
        )
        .bind(title)
        .bind(text)
        .bind(post_id)
        .bind(creator_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    /// Delete a post owned by `creator_id`. Vote rows go with it via the
    /// ON DELETE CASCADE on votes.post_id.
    pub async fn delete(&self, post_id: Uuid, creator_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1 AND creator_id = $2
            "#,
        )
        .bind(post_id)
        .bind(creator_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Fetch one feed window: up to `fetch` posts strictly older than
    /// `before` (when given), newest first. The id tie-break makes the
    /// ordering total even when created_at collides.
    pub async fn page(
        &self,
        before: Option<DateTime<Utc>>,
        fetch: i64,
    ) -> Result<Vec<Post>, sqlx::Error> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, creator_id, title, text, points, created_at, updated_at
            FROM posts
            WHERE $1::timestamptz IS NULL OR created_at < $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(before)
        .bind(fetch)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }
}
