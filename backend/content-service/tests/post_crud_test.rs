//! Integration Tests: Post CRUD
//!
//! Coverage:
//! - Create and fetch, including the viewer's vote on the payload
//! - Owner-scoped updates (edits by strangers read as missing)
//! - Owner-scoped deletes cascading the post's ledger rows

mod common;

use common::{post_points, setup_test_db, vote_rows};
use content_service::services::{PostService, VoteService};
use uuid::Uuid;

#[tokio::test]
#[ignore] // Run manually: cargo test --test post_crud_test -- --ignored
async fn test_create_and_fetch_post() {
    let pool = setup_test_db().await.unwrap();
    let posts = PostService::new(pool.clone());
    let votes = VoteService::new(pool.clone());

    let creator = Uuid::new_v4();
    let post = posts
        .create_post(creator, "hello", "first post body")
        .await
        .unwrap();
    assert_eq!(post.creator_id, creator);
    assert_eq!(post.title, "hello");
    assert_eq!(post.points, 0);

    // Anonymous fetch carries no vote status.
    let view = posts.get_post(post.id, None).await.unwrap().unwrap();
    assert_eq!(view.post.id, post.id);
    assert_eq!(view.vote_status, None);

    // After voting, the viewer sees their own direction and the new points.
    let viewer = Uuid::new_v4();
    votes.cast_vote(viewer, post.id, 1).await.unwrap();

    let view = posts.get_post(post.id, Some(viewer)).await.unwrap().unwrap();
    assert_eq!(view.vote_status, Some(1));
    assert_eq!(view.post.points, 1);

    assert!(posts.get_post(Uuid::new_v4(), None).await.unwrap().is_none());
}

#[tokio::test]
#[ignore]
async fn test_update_is_creator_scoped() {
    let pool = setup_test_db().await.unwrap();
    let posts = PostService::new(pool.clone());

    let creator = Uuid::new_v4();
    let post = posts
        .create_post(creator, "original", "body")
        .await
        .unwrap();

    // A stranger's edit reads as missing and changes nothing.
    let stranger = Uuid::new_v4();
    let result = posts
        .update_post(post.id, stranger, "hijacked", "body")
        .await
        .unwrap();
    assert!(result.is_none());

    let view = posts.get_post(post.id, None).await.unwrap().unwrap();
    assert_eq!(view.post.title, "original");

    // The creator's edit lands.
    let updated = posts
        .update_post(post.id, creator, "revised", "new body")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.title, "revised");
    assert_eq!(updated.text, "new body");
    assert!(updated.updated_at >= updated.created_at);
}

#[tokio::test]
#[ignore]
async fn test_delete_is_creator_scoped_and_clears_ledger() {
    let pool = setup_test_db().await.unwrap();
    let posts = PostService::new(pool.clone());
    let votes = VoteService::new(pool.clone());

    let creator = Uuid::new_v4();
    let post = posts.create_post(creator, "doomed", "body").await.unwrap();

    votes.cast_vote(Uuid::new_v4(), post.id, 1).await.unwrap();
    votes.cast_vote(Uuid::new_v4(), post.id, -1).await.unwrap();
    assert_eq!(vote_rows(&pool, post.id).await, 2);
    assert_eq!(post_points(&pool, post.id).await, 0);

    // Strangers cannot delete.
    assert!(!posts.delete_post(post.id, Uuid::new_v4()).await.unwrap());
    assert!(posts.get_post(post.id, None).await.unwrap().is_some());

    // The creator can, and the ledger rows go with the post.
    assert!(posts.delete_post(post.id, creator).await.unwrap());
    assert!(posts.get_post(post.id, None).await.unwrap().is_none());
    assert_eq!(vote_rows(&pool, post.id).await, 0);
}
