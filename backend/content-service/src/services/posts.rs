/// Post service - post creation, retrieval, and owner-scoped management
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{PostRepository, VoteRepository};
use crate::error::Result;
use crate::models::{Post, PostView};

#[derive(Clone)]
pub struct PostService {
    posts: PostRepository,
    votes: VoteRepository,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            posts: PostRepository::new(pool.clone()),
            votes: VoteRepository::new(pool),
        }
    }

    /// Create a new post
    pub async fn create_post(&self, creator_id: Uuid, title: &str, text: &str) -> Result<Post> {
        let post = self.posts.create(creator_id, title, text).await?;
        Ok(post)
    }

    /// Get a post by ID, with the viewer's vote attached when known
    pub async fn get_post(&self, post_id: Uuid, viewer: Option<Uuid>) -> Result<Option<PostView>> {
        let Some(post) = self.posts.find_by_id(post_id).await? else {
            return Ok(None);
        };

        let vote_status = match viewer {
            Some(user_id) => self
                .votes
                .find_vote(user_id, post_id)
                .await?
                .map(|v| v.value),
            None => None,
        };

        Ok(Some(PostView { post, vote_status }))
    }

    /// Update a post's title and text; only the creator may edit.
    /// Returns None when the post is missing or owned by someone else.
    pub async fn update_post(
        &self,
        post_id: Uuid,
        editor: Uuid,
        title: &str,
        text: &str,
    ) -> Result<Option<Post>> {
        let post = self.posts.update(post_id, editor, title, text).await?;
        Ok(post)
    }

    /// Delete a post; only the creator may delete. The ledger rows cascade.
    pub async fn delete_post(&self, post_id: Uuid, editor: Uuid) -> Result<bool> {
        let deleted = self.posts.delete(post_id, editor).await?;
        Ok(deleted)
    }
}
